//! Command-line flags for tickchart.
//!
//! Everything a query needs is asked interactively; the flags only adjust
//! where charts go and how the provider is called.
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--output-dir` | `.` | Directory receiving `<SYMBOL>_stock_chart.svg` |
//! | `--interval` | `60min` | Intraday bucket size |
//! | `--no-open` | `false` | Write charts without launching a browser |
//! | `--timeout-ms` | unset | Provider request timeout |
//!
//! The provider credential comes from `TICKCHART_ALPHAVANTAGE_API_KEY`
//! (a `.env` file in the working directory is honoured).

use std::path::PathBuf;

use clap::Parser;

/// Interactive stock chart generator backed by Alpha Vantage.
///
/// Prompts for a symbol, chart type, series granularity and date window,
/// then writes an SVG chart and opens it in the default browser.
#[derive(Debug, Parser)]
#[command(name = "tickchart", author, version, about = "Interactive stock chart generator")]
pub struct Cli {
    /// Directory where chart files are written.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Intraday bucket size: 1min, 5min, 15min, 30min or 60min.
    #[arg(long, default_value = "60min")]
    pub interval: String,

    /// Write charts without opening them in a browser.
    #[arg(long, default_value_t = false)]
    pub no_open: bool,

    /// Provider request timeout in milliseconds (overrides TICKCHART_TIMEOUT_MS).
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}
