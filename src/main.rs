//! sales-report - Read-only console reports over a sales-sample SQLite database.

use std::process::ExitCode;

use sales_report::cli::Cli;
use sales_report::config::Config;
use sales_report::error::{ReportError, Result};
use sales_report::report::{sales_report, write_diagnostic, ReportRunner};
use sales_report::{db, logging};
use tracing::{error, info, warn};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let (config, skipped) = match load_config(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            // Logging is configured from the file, so it is not up yet.
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init_stderr_logging(&config.logging.level);
    if let Some(e) = skipped {
        warn!("Ignoring config file, using defaults: {e}");
    }

    match run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}: {}", e.category(), e);
            ExitCode::FAILURE
        }
    }
}

/// Loads the config, then applies command-line overrides.
///
/// A file passed with `--config` must load. A broken file at the default
/// path is skipped and its error returned for a warning.
fn load_config(cli: &Cli) -> Result<(Config, Option<ReportError>)> {
    let (config, skipped) = match &cli.config {
        Some(path) => (Config::load_from_file(path)?, None),
        None => Config::load_or_default(&Config::default_path()),
    };
    Ok((config.with_database_override(cli.database.clone()), skipped))
}

/// Connects, runs every report step, and closes the connection.
///
/// Only a failed connect or a failed write to stdout is an error here; step
/// failures are printed and the run goes on.
async fn run(config: &Config) -> Result<()> {
    info!("Opening {}", config.database.display_string());

    let client = match db::connect(&config.database).await {
        Ok(client) => client,
        Err(e) => {
            write_diagnostic(
                &mut std::io::stdout(),
                &format!("Error connecting to database: {e}"),
            );
            return Err(e);
        }
    };

    let mut runner = ReportRunner::new(client);
    let mut stdout = std::io::stdout();
    let outcome = runner.run(sales_report(), &mut stdout).await;

    if let Err(e) = runner.close().await {
        write_diagnostic(
            &mut stdout,
            &format!("Error closing the database connection: {e}"),
        );
        warn!("{}: {}", e.category(), e);
    }

    let summary = outcome?;
    if summary.failed > 0 {
        warn!("{} of {} steps failed", summary.failed, summary.total());
    }
    Ok(())
}
