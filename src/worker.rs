//! Background request worker
//!
//! Runs lookup calls off the UI thread. The UI sends requests and drains
//! events on every tick; outcomes carry the search generation so the
//! controller can tell stale answers apart.

use crate::controller::SearchTicket;
use crate::error::Result;
use crate::model::{SearchResultSet, ServiceStatus};
use crate::service::LookupService;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Work the UI hands to the worker
pub enum WorkerRequest {
    Search(SearchTicket),
    Status,
}

/// Messages from the worker thread
pub enum WorkerEvent {
    SearchFinished {
        generation: u64,
        outcome: Result<SearchResultSet>,
        elapsed: Duration,
    },
    StatusChecked(Result<ServiceStatus>),
}

/// Channel ends held by the UI
pub struct WorkerHandle {
    pub requests: Sender<WorkerRequest>,
    pub events: Receiver<WorkerEvent>,
}

impl WorkerHandle {
    /// Queue a request; false if the worker is gone
    pub fn send(&self, request: WorkerRequest) -> bool {
        self.requests.send(request).is_ok()
    }

    /// Every event that has arrived so far, without blocking
    pub fn drain(&self) -> Vec<WorkerEvent> {
        self.events.try_iter().collect()
    }
}

/// Start the detached worker thread. It exits once every request sender is
/// dropped.
pub fn spawn(service: Arc<dyn LookupService>) -> WorkerHandle {
    let (req_tx, req_rx) = unbounded::<WorkerRequest>();
    let (event_tx, event_rx) = unbounded::<WorkerEvent>();

    thread::spawn(move || {
        while let Ok(request) = req_rx.recv() {
            let event = match request {
                WorkerRequest::Search(ticket) => {
                    let start = Instant::now();
                    let outcome = service.search(&ticket.query);
                    WorkerEvent::SearchFinished {
                        generation: ticket.generation,
                        outcome,
                        elapsed: start.elapsed(),
                    }
                }
                WorkerRequest::Status => WorkerEvent::StatusChecked(service.status()),
            };

            if event_tx.send(event).is_err() {
                break;
            }
        }
        log::debug!(target: "worker", "request channel closed, worker exiting");
    });

    WorkerHandle {
        requests: req_tx,
        events: event_rx,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LookupError;
    use crate::model::{Modality, OperatorSummary, SearchQuery};

    struct EchoService;

    impl LookupService for EchoService {
        fn search(&self, query: &SearchQuery) -> Result<SearchResultSet> {
            Ok(SearchResultSet {
                operators: vec![OperatorSummary {
                    trade_name: Some(query.term().to_string()),
                    ..Default::default()
                }],
                total: 1,
            })
        }

        fn status(&self) -> Result<ServiceStatus> {
            Err(LookupError::Decode("offline".to_string()))
        }

        fn details(&self, _registration: &str) -> Result<OperatorSummary> {
            Ok(OperatorSummary::default())
        }

        fn modalities(&self) -> Result<Vec<Modality>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_worker_answers_in_order() {
        let worker = spawn(Arc::new(EchoService));

        assert!(worker.send(WorkerRequest::Search(SearchTicket {
            generation: 7,
            query: SearchQuery::new("amil", 10).unwrap(),
        })));
        assert!(worker.send(WorkerRequest::Status));

        let timeout = Duration::from_secs(5);
        match worker.events.recv_timeout(timeout).unwrap() {
            WorkerEvent::SearchFinished {
                generation,
                outcome,
                ..
            } => {
                assert_eq!(generation, 7);
                let set = outcome.unwrap();
                assert_eq!(set.operators[0].trade_name.as_deref(), Some("amil"));
            }
            WorkerEvent::StatusChecked(_) => panic!("expected search result first"),
        }
        assert!(matches!(
            worker.events.recv_timeout(timeout).unwrap(),
            WorkerEvent::StatusChecked(Err(_))
        ));

        // Closing the request side ends the thread, which drops its sender
        let WorkerHandle { requests, events } = worker;
        drop(requests);
        assert!(matches!(
            events.recv_timeout(timeout),
            Err(crossbeam_channel::RecvTimeoutError::Disconnected)
        ));
    }
}
