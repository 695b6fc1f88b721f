use crate::config::AppConfig;
use crate::controller::{Availability, SearchController};
use crate::format::format_tax_id;
use crate::service::LookupService;
use crate::tui::search::SearchState;
use crate::tui::table::TableState;
use crate::tui::ui;
use crate::worker::{self, WorkerEvent, WorkerHandle, WorkerRequest};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub struct App {
    pub controller: SearchController,

    // Sub-states
    pub search: SearchState,
    pub table: TableState,

    pub status_message: String,
    pub api_base_url: String,
    pub last_elapsed: Option<Duration>,

    worker: Option<WorkerHandle>,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: &AppConfig,
        service: Arc<dyn LookupService>,
        initial_query: Option<String>,
    ) -> Self {
        let worker = worker::spawn(service);

        let mut app = Self {
            controller: SearchController::new(config),
            search: initial_query
                .map(SearchState::with_query)
                .unwrap_or_default(),
            table: TableState::default(),
            status_message: "Connecting...".to_string(),
            api_base_url: config.api_base_url.clone(),
            last_elapsed: None,
            worker: Some(worker),
            should_quit: false,
        };

        app.request(WorkerRequest::Status);
        if !app.search.query.trim().is_empty() {
            app.submit_search();
        }

        app
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                last_tick = Instant::now();
            }

            if self.should_quit {
                // Dropping the handle lets the worker exit after its current call
                self.worker = None;
                return Ok(());
            }
        }
    }

    fn request(&mut self, request: WorkerRequest) {
        let sent = self
            .worker
            .as_ref()
            .map(|worker| worker.send(request))
            .unwrap_or(false);
        if !sent {
            log::error!(target: "tui", "request worker is not running");
            self.status_message = "Request worker stopped".to_string();
        }
    }

    /// Submit the bound query. Ignored while a search is in flight, the same
    /// way a disabled submit button would be.
    pub fn submit_search(&mut self) {
        if self.controller.state().loading {
            return;
        }

        self.controller.set_query(self.search.query.clone());
        if let Some(ticket) = self.controller.begin_search() {
            self.status_message = self.controller.messages().searching.to_string();
            self.request(WorkerRequest::Search(ticket));
        }
    }

    pub fn process_messages(&mut self) {
        let events = match &self.worker {
            Some(worker) => worker.drain(),
            None => return,
        };

        for event in events {
            match event {
                WorkerEvent::SearchFinished {
                    generation,
                    outcome,
                    elapsed,
                } => {
                    if !self.controller.finish_search(generation, outcome) {
                        continue;
                    }
                    self.last_elapsed = Some(elapsed);
                    let state = self.controller.state();
                    self.table.reset(state.results.operators.len());
                    self.status_message = if state.error.is_some() {
                        "Search failed".to_string()
                    } else if state.results.is_empty() {
                        self.controller.messages().no_results.to_string()
                    } else {
                        format!(
                            "{} of {} operators",
                            state.results.operators.len(),
                            state.results.total
                        )
                    };
                    if !state.results.is_empty() {
                        self.search.focused = false;
                    }
                }
                WorkerEvent::StatusChecked(outcome) => {
                    self.status_message = match self.controller.finish_status_check(outcome) {
                        Availability::Ready(status) => format!(
                            "API online, {} operators",
                            status.operator_count.unwrap_or(0)
                        ),
                        // Logged by the controller; the view stays quiet
                        Availability::DataNotLoaded(_) => "API online".to_string(),
                        Availability::Unreachable => "API offline".to_string(),
                    };
                }
            }
        }
    }

    pub fn open_selected(&mut self) {
        if let Some(index) = self.table.selected {
            self.controller.show_detail(index);
        }
    }

    fn copy_selected_tax_id(&mut self) {
        let tax_id = match &self.controller.state().selected {
            Some(operator) => format_tax_id(operator.tax_id.as_deref()),
            None => return,
        };

        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(tax_id.clone())) {
            Ok(()) => self.status_message = format!("Copied {}", tax_id),
            Err(e) => {
                log::warn!(target: "tui", "clipboard unavailable: {}", e);
                self.status_message = "Clipboard unavailable".to_string();
            }
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        if let KeyCode::Char('c') | KeyCode::Char('q') = key.code {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                self.should_quit = true;
                return;
            }
        }

        if self.controller.state().detail_visible {
            self.handle_detail_key(key);
            return;
        }

        if key.code == KeyCode::Esc {
            if self.search.focused && !self.search.query.is_empty() {
                self.search.clear();
            } else if self.search.focused {
                self.search.focused = false;
            } else {
                self.should_quit = true;
            }
            return;
        }

        if self.search.focused {
            self.handle_search_key(key);
        } else {
            self.handle_table_key(key);
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.controller.close_detail(),
            KeyCode::Char('c') => self.copy_selected_tax_id(),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_search(),
            KeyCode::Char(c) => self.search.insert(c),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.home(),
            KeyCode::End => self.search.end(),
            KeyCode::Tab | KeyCode::Down => {
                if !self.controller.state().results.is_empty() {
                    self.search.focused = false;
                }
            }
            _ => {}
        }
    }

    fn handle_table_key(&mut self, key: KeyEvent) {
        let total = self.controller.state().results.operators.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.table.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(total),
            KeyCode::PageUp => self.table.page_up(),
            KeyCode::PageDown => self.table.page_down(total),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(total),
            KeyCode::Enter => self.open_selected(),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.search.focused = true;
            }

            // Any other printable char focuses search and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.focused = true;
                self.search.end();
                self.search.insert(c);
            }

            _ => {}
        }
    }
}
