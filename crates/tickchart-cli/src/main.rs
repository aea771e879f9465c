mod browser;
mod cli;
mod error;
mod prompt;
mod session;

use std::process::ExitCode;

use clap::Parser;
use tickchart_core::{ChartWriter, IntradayInterval, ProviderConfig, SeriesFetcher};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::Cli;
use crate::error::CliError;
use crate::prompt::Prompter;
use crate::session::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let interval = cli.interval.parse::<IntradayInterval>()?;

    if !cli.output_dir.is_dir() {
        return Err(CliError::OutputDir {
            path: cli.output_dir,
        });
    }

    let mut config = ProviderConfig::from_env();
    if cli.timeout_ms.is_some() {
        config.timeout_ms = cli.timeout_ms;
    }
    tracing::debug!(?config, %interval, output_dir = %cli.output_dir.display(), "starting");

    let prompter = Prompter::new(std::io::stdin().lock(), std::io::stdout().lock());
    let mut session = Session::new(
        prompter,
        SeriesFetcher::new(config),
        ChartWriter::new(cli.output_dir),
    )
    .with_interval(interval);

    if !cli.no_open {
        session = session.with_opener(Box::new(browser::open_in_browser));
    }

    session.run().await?;
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
