//! Interactive terminal front end.

pub mod app;
pub mod colors;
pub mod search;
pub mod table;
pub mod ui;

use crate::config::AppConfig;
use crate::service::LookupService;
use app::App;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;

/// Run the search screen until the user quits.
pub fn run(
    config: &AppConfig,
    service: Arc<dyn LookupService>,
    initial_query: Option<String>,
) -> crate::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    log::info!(target: "tui", "starting against {}", config.api_base_url);
    let mut app = App::new(config, service, initial_query);
    let result = app.run(&mut terminal);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
