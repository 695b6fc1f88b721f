//! anslookup - Search client for the ANS health-plan operator registry
//!
//! Talks to the registry lookup API (search, operator details, modality
//! listing, service status) and keeps the state a search screen needs:
//! the bound query, loading flag, error notice, results and the operator
//! shown in the detail overlay.
//!
//! # Features
//!
//! - **Search**: Free-text search by corporate name, trade name, CNPJ or registration
//! - **Details**: Formatted CNPJ, postal code, phone and address for one operator
//! - **Availability check**: Warns when the API is up but its data is not loaded
//! - **Terminal UI**: Search box, results table and detail overlay
//! - **Localized notices**: English and Brazilian Portuguese
//!
//! # Example
//!
//! ```no_run
//! use anslookup::{AppConfig, HttpLookupService, SearchController, format_tax_id};
//!
//! fn main() -> anslookup::Result<()> {
//!     let config = AppConfig::default();
//!     let service = HttpLookupService::from_config(&config)?;
//!
//!     let mut controller = SearchController::new(&config);
//!     controller.set_query("unimed");
//!     controller.submit_search(&service);
//!
//!     for operator in &controller.state().results.operators {
//!         println!(
//!             "{} {}",
//!             format_tax_id(operator.tax_id.as_deref()),
//!             operator.display_name()
//!         );
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod logging;
pub mod messages;
pub mod model;
pub mod service;
pub mod tui;
pub mod worker;

// Re-export main types
pub use config::AppConfig;
pub use controller::{Availability, SearchController, SearchTicket, UiState};
pub use error::{LookupError, Result};
pub use messages::{Locale, Messages};
pub use model::{Modality, OperatorSummary, SearchQuery, SearchResultSet, ServiceStatus};
pub use service::{HttpLookupService, LookupService};

// Re-export formatters used by the CLI and the table view
pub use format::{
    format_address, format_phone, format_phone_with_area, format_postal_code, format_tax_id,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
