mod cli;
mod error;
mod portfolio;
mod prefs;
mod scheduler;
mod view;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use tickwatch_core::{
    CsvQuoteSource, ExchangeRegistry, FixedQuoteSource, QuoteSource, ReqwestHttpClient,
};

use crate::cli::Cli;
use crate::error::CliError;
use crate::portfolio::Portfolio;
use crate::prefs::Preferences;
use crate::scheduler::{RefreshEvent, RefreshScheduler, RefreshUpdate};

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    match run().await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let prefs = Preferences::new(cli.refresh_minutes)?;
    let registry = ExchangeRegistry::from_path(&cli.exchanges)?;
    let portfolio = Portfolio::from_path(&cli.portfolio, &registry)?;
    info!(
        "monitoring {} holdings, refreshing every {} minutes",
        portfolio.len(),
        prefs.refresh_minutes()
    );

    let source: Arc<dyn QuoteSource> = if cli.offline {
        Arc::new(FixedQuoteSource)
    } else {
        Arc::new(CsvQuoteSource::new(Arc::new(ReqwestHttpClient::new())))
    };

    if cli.once {
        let quotes = source.quotes(portfolio.stocks(), cli.progress).await?;
        print!("{}", view::render_table(&quotes));
        println!(
            "{}",
            view::refresh_status(scheduler::first_zero_price(&quotes).as_ref())
        );
        return Ok(ExitCode::SUCCESS);
    }

    let (events_tx, events_rx) = mpsc::channel(16);
    // Populate the table before the first timer tick.
    let _ = events_tx.send(RefreshEvent::ManualRefresh).await;
    let console = tokio::spawn(read_console(
        events_tx,
        cli.portfolio.clone(),
        registry.clone(),
    ));

    let scheduler = RefreshScheduler::new(
        source,
        portfolio.stocks().to_vec(),
        prefs.update_period(),
        cli.progress,
    );
    scheduler
        .run(events_rx, |update| match update {
            RefreshUpdate::Quotes { quotes, warning } => {
                print!("{}", view::render_table(&quotes));
                println!("{}", view::refresh_status(warning.as_ref()));
            }
            RefreshUpdate::Failed { message } => {
                println!("{}", view::status_failed(&message));
            }
        })
        .await;

    console.abort();
    Ok(ExitCode::SUCCESS)
}

/// Interactive console on stdin.
///
/// An empty line or `r` refreshes now, a number changes the refresh period
/// in minutes, `l` reloads the portfolio file, and `q` quits. Dropping the
/// event sender is what stops the scheduler.
async fn read_console(
    events: mpsc::Sender<RefreshEvent>,
    portfolio_path: PathBuf,
    registry: ExchangeRegistry,
) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let input = line.trim();
        let event = if input.eq_ignore_ascii_case("q") {
            break;
        } else if input.is_empty() || input.eq_ignore_ascii_case("r") {
            Some(RefreshEvent::ManualRefresh)
        } else if input.eq_ignore_ascii_case("l") {
            match Portfolio::from_path(&portfolio_path, &registry) {
                Ok(portfolio) => {
                    info!("reloaded {} holdings", portfolio.len());
                    Some(RefreshEvent::InstrumentSetChanged(
                        portfolio.stocks().to_vec(),
                    ))
                }
                Err(err) => {
                    error!("cannot reload portfolio: {err}");
                    None
                }
            }
        } else if let Ok(minutes) = input.parse::<u32>() {
            match Preferences::new(minutes) {
                Ok(prefs) => {
                    info!("refresh period set to {minutes} minutes");
                    Some(RefreshEvent::PeriodChanged(prefs.update_period()))
                }
                Err(err) => {
                    warn!("{err}");
                    None
                }
            }
        } else {
            warn!("unrecognized command: '{input}'");
            None
        };

        if let Some(event) = event {
            if events.send(event).await.is_err() {
                break;
            }
        }
    }
}
