//! anslookup CLI
//!
//! Command-line interface for the ANS operator lookup client.
//! Provides both scripted commands and an interactive search screen.

use anslookup::logging::{self, LookupLogger};
use anslookup::format::{city_state, operator_fields, or_placeholder};
use anslookup::{
    AppConfig, Availability, HttpLookupService, Locale, LookupService, SearchController,
};
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{HumanDuration, ProgressBar};
use log::LevelFilter;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// anslookup - ANS health-plan operator lookup
///
/// Searches the ANS operator registry through its lookup API by
/// corporate name, trade name, CNPJ or registration number.
#[derive(Parser)]
#[command(name = "anslookup")]
#[command(author = "anslookup contributors")]
#[command(version)]
#[command(about = "ANS health-plan operator lookup", long_about = None)]
struct Cli {
    /// Base URL of the lookup API (falls back to $ANSLOOKUP_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Maximum results per search
    #[arg(short, long, global = true, default_value = "10")]
    limit: u32,

    /// Language for notices (en, pt-br)
    #[arg(long, global = true, default_value = "en")]
    lang: Locale,

    /// Write log lines to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search operators by name, CNPJ or registration
    Search {
        /// Search term (use -- before the term if it starts with -)
        #[arg(allow_hyphen_values = true)]
        term: String,

        /// Print the raw result set as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the full record of one operator
    Show {
        /// ANS registration number
        registration: String,
    },

    /// Check whether the API is up and has its data loaded
    Status,

    /// List modalities with their operator counts
    Modalities,

    /// Open the interactive search screen
    Browse {
        /// Term to search right away
        term: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = AppConfig::default()
        .with_api_base_url(AppConfig::resolve_api_url(cli.api_url))
        .with_result_limit(cli.limit)
        .with_locale(cli.lang)
        .with_log_file(cli.log_file);

    // The browse screen owns the terminal, so its logs always go to a file
    let interactive = matches!(cli.command, Commands::Browse { .. });
    let log_file = match (&config.log_file, interactive) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => Some(LookupLogger::default_log_path()),
        (None, false) => None,
    };
    let level = if interactive {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    if let Err(e) = logging::init(log_file.as_deref(), level) {
        eprintln!("{} cannot open log file: {}", style("Warning:").yellow().bold(), e);
    }
    log::info!(target: "main", "anslookup {} starting", anslookup::VERSION);

    let result = match cli.command {
        Commands::Search { term, json } => cmd_search(&config, &term, json),
        Commands::Show { registration } => cmd_show(&config, &registration),
        Commands::Status => cmd_status(&config),
        Commands::Modalities => cmd_modalities(&config),
        Commands::Browse { term } => cmd_browse(&config, term),
    };

    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(message.into());
    spinner
}

/// Search command implementation
fn cmd_search(config: &AppConfig, term: &str, json: bool) -> anslookup::Result<()> {
    let service = HttpLookupService::from_config(config)?;
    let mut controller = SearchController::new(config);
    controller.set_query(term);

    let start = Instant::now();
    let pb = spinner(controller.messages().searching);
    controller.submit_search(&service);
    pb.finish_and_clear();

    let state = controller.state();
    if let Some(notice) = &state.error {
        eprintln!("{} {}", style("Error:").red().bold(), notice);
        std::process::exit(1);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&state.results)?);
        return Ok(());
    }

    if state.results.is_empty() {
        println!("{}", style(controller.messages().no_results).yellow());
        return Ok(());
    }

    println!(
        "Found {} of {} operators in {}:",
        style(state.results.operators.len()).green(),
        state.results.total,
        style(HumanDuration(start.elapsed())).cyan()
    );
    println!();

    for (i, operator) in state.results.operators.iter().enumerate() {
        println!(
            "{:3}. {} {}",
            i + 1,
            style(or_placeholder(operator.registration.as_deref())).yellow(),
            style(operator.display_name()).bold()
        );
        println!(
            "     {} {}  {}",
            anslookup::format_tax_id(operator.tax_id.as_deref()),
            style(or_placeholder(operator.modality.as_deref())).dim(),
            style(city_state(operator)).dim()
        );
    }

    Ok(())
}

/// Show command implementation
fn cmd_show(config: &AppConfig, registration: &str) -> anslookup::Result<()> {
    let service = HttpLookupService::from_config(config)?;
    let pb = spinner(format!("Fetching {}...", registration));
    let operator = service.details(registration);
    pb.finish_and_clear();
    let operator = operator?;

    let messages = config.locale.messages();
    println!(
        "{} {}",
        style(messages.details_title).cyan().bold(),
        style(operator.display_name()).bold()
    );
    println!();

    let fields = operator_fields(&operator, &messages.labels);
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in fields {
        println!(
            "  {} {}",
            style(format!("{:<width$}", label, width = width)).bold(),
            value
        );
    }

    Ok(())
}

/// Status command implementation
fn cmd_status(config: &AppConfig) -> anslookup::Result<()> {
    let service = HttpLookupService::from_config(config)?;
    let mut controller = SearchController::new(config);

    let pb = spinner(format!("Contacting {}...", config.api_base_url));
    let availability = controller.check_service_availability(&service);
    pb.finish_and_clear();

    match availability {
        Availability::Ready(status) => {
            println!("{} API online", style("✓").green().bold());
            print_status_details(&status);
        }
        Availability::DataNotLoaded(status) => {
            println!(
                "{} {}",
                style("!").yellow().bold(),
                controller.messages().data_not_loaded
            );
            print_status_details(&status);
        }
        Availability::Unreachable => {
            let notice = controller.state().error.as_deref().unwrap_or_default();
            eprintln!("{} {}", style("✗").red().bold(), notice);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_status_details(status: &anslookup::ServiceStatus) {
    if let Some(version) = &status.version {
        println!("  {} {}", style("Version:").bold(), version);
    }
    if let Some(count) = status.operator_count {
        println!("  {} {}", style("Operators:").bold(), count);
    }
    match status.parsed_timestamp() {
        Some(ts) => println!("  {} {}", style("Server time:").bold(), ts.format("%Y-%m-%d %H:%M:%S")),
        None => {
            if let Some(raw) = &status.timestamp {
                println!("  {} {}", style("Server time:").bold(), raw);
            }
        }
    }
}

/// Modalities command implementation
fn cmd_modalities(config: &AppConfig) -> anslookup::Result<()> {
    let service = HttpLookupService::from_config(config)?;
    let pb = spinner("Loading modalities...");
    let modalities = service.modalities();
    pb.finish_and_clear();
    let mut modalities = modalities?;

    modalities.sort_by(|a, b| b.count.cmp(&a.count));
    let total: u64 = modalities.iter().map(|m| m.count).sum();

    for modality in &modalities {
        println!(
            "  {:>6}  {}",
            style(modality.count).green(),
            or_placeholder(modality.name.as_deref())
        );
    }
    println!();
    println!("  {:>6}  {}", style(total).bold(), style("total").bold());

    Ok(())
}

/// Browse command implementation
fn cmd_browse(config: &AppConfig, term: Option<String>) -> anslookup::Result<()> {
    let service: Arc<dyn LookupService> = Arc::new(HttpLookupService::from_config(config)?);
    anslookup::tui::run(config, service, term)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "anslookup", "search", "unimed", "--limit", "5", "--lang", "pt-br",
        ]);
        assert_eq!(cli.limit, 5);
        assert_eq!(cli.lang, Locale::PtBr);
        match cli.command {
            Commands::Search { term, json } => {
                assert_eq!(term, "unimed");
                assert!(!json);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_unknown_language_rejected() {
        assert!(Cli::try_parse_from(["anslookup", "--lang", "fr", "status"]).is_err());
    }
}
