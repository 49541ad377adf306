//! CLI argument definitions for Tickwatch.
//!
//! Tickwatch runs as a single long-lived monitor rather than a set of
//! subcommands: it loads a portfolio, refreshes quotes on a timer, and
//! re-renders the table after every fetch.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--portfolio` | `portfolio.txt` | Tracked holdings file |
//! | `--exchanges` | `exchanges.txt` | Known exchange resource |
//! | `--refresh-minutes` | `5` | Minutes between automatic refreshes |
//! | `--progress` | `false` | Log a line when each fetch starts |
//! | `--offline` | `false` | Serve fixed quotes without the network |
//! | `--once` | `false` | Fetch once, render, and exit |
//!
//! # Examples
//!
//! ```bash
//! # Monitor the default portfolio, refreshing every 5 minutes
//! tickwatch
//!
//! # One-shot snapshot of a custom portfolio
//! tickwatch --portfolio mine.txt --once
//!
//! # Develop without network access
//! tickwatch --offline --refresh-minutes 1
//! ```

use std::path::PathBuf;

use clap::Parser;

/// Tickwatch - terminal stock portfolio monitor
///
/// Periodically fetches quotes for a portfolio of tracked stocks and
/// renders them as a table, with price change and profit columns.
#[derive(Debug, Parser)]
#[command(
    name = "tickwatch",
    author,
    version,
    about = "Terminal stock portfolio monitor"
)]
pub struct Cli {
    /// Portfolio file listing tracked holdings, one per line as
    /// `TICKER:Name:Exchange Name:Shares:AveragePrice`.
    #[arg(long, default_value = "portfolio.txt")]
    pub portfolio: PathBuf,

    /// Exchange resource file, one tab-separated venue per line.
    #[arg(long, default_value = "exchanges.txt")]
    pub exchanges: PathBuf,

    /// Minutes between automatic refreshes (1 to 60).
    #[arg(long, default_value_t = 5)]
    pub refresh_minutes: u32,

    /// Log a progress line when each fetch starts.
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Serve fixed quotes without touching the network.
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Fetch once, render the table, and exit.
    #[arg(long, default_value_t = false)]
    pub once: bool,
}
