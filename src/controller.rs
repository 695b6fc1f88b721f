//! Search view controller
//!
//! Owns every piece of UI state and is only mutated through the action
//! methods below. Requests are split in two halves: `begin_*` validates and
//! hands back a ticket describing the request, `finish_*` applies whatever
//! the service answered. Front-ends decide where the request actually runs
//! (inline for the CLI, on the worker thread for the TUI).

use crate::config::AppConfig;
use crate::error::{LookupError, Result};
use crate::messages::Messages;
use crate::model::{OperatorSummary, SearchQuery, SearchResultSet, ServiceStatus};
use crate::service::LookupService;
use chrono::Datelike;

/// Everything the view renders
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Text bound to the search input
    pub query: String,
    /// True only while the latest search is in flight
    pub loading: bool,
    /// Inline error notice
    pub error: Option<String>,
    /// Set once any search has succeeded
    pub search_performed: bool,
    pub results: SearchResultSet,
    /// Record shown in the detail overlay
    pub selected: Option<OperatorSummary>,
    pub detail_visible: bool,
    /// Year printed in the footer, fixed at start-up
    pub footer_year: i32,
}

/// A dispatched search, stamped with the generation it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub query: SearchQuery,
}

/// Outcome of the start-up status check
#[derive(Debug, Clone, PartialEq)]
pub enum Availability {
    Ready(ServiceStatus),
    /// Service answered but has no operator data yet; logged, never shown
    DataNotLoaded(ServiceStatus),
    Unreachable,
}

pub struct SearchController {
    state: UiState,
    limit: u32,
    messages: &'static Messages,
    /// Generation of the most recent dispatched search
    generation: u64,
}

impl SearchController {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            state: UiState {
                footer_year: chrono::Local::now().year(),
                ..Default::default()
            },
            limit: config.result_limit.max(1),
            messages: config.locale.messages(),
            generation: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn messages(&self) -> &'static Messages {
        self.messages
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.query = text.into();
    }

    /// Validate the bound query and mark a request as in flight.
    ///
    /// Returns `None` for a blank query, after setting the validation notice.
    /// Loading is left untouched in that case.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        let query = match SearchQuery::new(&self.state.query, self.limit) {
            Ok(query) => query,
            Err(_) => {
                self.state.error = Some(self.messages.empty_query.to_string());
                return None;
            }
        };

        self.generation += 1;
        self.state.error = None;
        self.state.loading = true;

        log::debug!(
            target: "controller",
            "search #{} dispatched: '{}' (limit {})",
            self.generation,
            query.term(),
            query.limit()
        );

        Some(SearchTicket {
            generation: self.generation,
            query,
        })
    }

    /// Apply a search outcome. Returns false when the outcome belongs to an
    /// older request than the latest one and was discarded.
    pub fn finish_search(&mut self, generation: u64, outcome: Result<SearchResultSet>) -> bool {
        if generation != self.generation || !self.state.loading {
            log::debug!(
                target: "controller",
                "discarding stale search #{} (latest #{})",
                generation,
                self.generation
            );
            return false;
        }

        match outcome {
            Ok(results) => {
                log::info!(
                    target: "controller",
                    "search #{} returned {} operators (total {})",
                    generation,
                    results.operators.len(),
                    results.total
                );
                self.state.error = None;
                self.state.results = results;
                self.state.search_performed = true;
            }
            Err(e) => {
                log::error!(target: "controller", "search #{} failed: {}", generation, e);
                self.state.error = Some(self.search_error_message(&e));
                self.state.results = SearchResultSet::default();
            }
        }

        self.state.loading = false;
        true
    }

    /// Run a whole search against `service` on the calling thread
    pub fn submit_search<S>(&mut self, service: &S) -> bool
    where
        S: LookupService + ?Sized,
    {
        match self.begin_search() {
            Some(ticket) => {
                let outcome = service.search(&ticket.query);
                self.finish_search(ticket.generation, outcome)
            }
            None => false,
        }
    }

    /// Open the detail overlay for a row of the current result set.
    /// Uses the already-fetched record; nothing is requested.
    pub fn show_detail(&mut self, index: usize) -> bool {
        match self.state.results.operators.get(index) {
            Some(operator) => {
                self.state.selected = Some(operator.clone());
                self.state.detail_visible = true;
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self) {
        self.state.detail_visible = false;
    }

    /// Apply the answer of the status endpoint
    pub fn finish_status_check(&mut self, outcome: Result<ServiceStatus>) -> Availability {
        match outcome {
            Ok(status) if status.data_loaded => {
                log::info!(
                    target: "status",
                    "service online, {} operators loaded",
                    status.operator_count.unwrap_or(0)
                );
                Availability::Ready(status)
            }
            Ok(status) => {
                log::warn!(target: "status", "{}", self.messages.data_not_loaded);
                Availability::DataNotLoaded(status)
            }
            Err(e) => {
                log::error!(target: "status", "status check failed: {}", e);
                self.state.error = Some(self.messages.service_unreachable.to_string());
                Availability::Unreachable
            }
        }
    }

    pub fn check_service_availability<S>(&mut self, service: &S) -> Availability
    where
        S: LookupService + ?Sized,
    {
        let outcome = service.status();
        self.finish_status_check(outcome)
    }

    fn search_error_message(&self, error: &LookupError) -> String {
        error
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.messages.search_failed.to_string())
    }
}
