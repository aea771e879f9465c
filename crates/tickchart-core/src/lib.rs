//! # Tickchart Core
//!
//! Fetches historical stock price series from Alpha Vantage, narrows them to
//! a date window and renders the result as an SVG chart.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`chart`] | SVG rendering and chart file output |
//! | [`config`] | Provider settings and prompt defaults |
//! | [`domain`] | Dates, symbols, granularities, raw series, filtered tables |
//! | [`error`] | Validation and chart errors |
//! | [`fetch`] | Series fetcher and envelope lookup |
//! | [`filter`] | Range and single-day filters |
//! | [`http_client`] | HTTP transport abstraction |
//! | [`query`] | One query: plan, fetch, filter |
//!
//! ## Pipeline
//!
//! ```text
//! CalendarDate::parse ──▶ QueryPlan ──▶ SeriesFetcher::fetch ──▶ RawSeries
//!                                                                   │
//!                          ┌────────────────────────────────────────┘
//!                          ▼
//!          filter_by_range / filter_by_day ──▶ FilteredTable ──▶ ChartWriter
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use tickchart_core::{
//!     run_query, CalendarDate, ChartKind, ChartWriter, Granularity, ProviderConfig,
//!     QueryOutcome, QueryPlan, SeriesFetcher, Symbol,
//! };
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let fetcher = SeriesFetcher::new(ProviderConfig::from_env());
//! let symbol = Symbol::parse("aapl")?;
//! let plan = QueryPlan::over_range(
//!     symbol.clone(),
//!     Granularity::Daily,
//!     CalendarDate::parse("2024-01-01")?,
//!     CalendarDate::parse("2024-01-31")?,
//! )?;
//!
//! if let QueryOutcome::Table(table) = run_query(&fetcher, &plan).await? {
//!     let path = ChartWriter::default().write(&table, ChartKind::Line, &symbol)?;
//!     println!("Chart saved to {}.", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Security
//!
//! The API key is only sent as a query parameter; logs use a redacted URL
//! and `ProviderConfig`'s `Debug` output masks it.

pub mod chart;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod http_client;
pub mod query;

pub use chart::{chart_file_name, render_svg, ChartKind, ChartWriter, SERIES_NAMES};
pub use config::{PromptDefaults, ProviderConfig};
pub use domain::{
    CalendarDate, FilteredTable, Granularity, IntradayInterval, OhlcRow, OhlcValues, RawFields,
    RawSeries, RawSeriesEntry, SeriesTimestamp, Symbol, YearMonth,
};
pub use error::{ChartError, ValidationError};
pub use fetch::{FetchError, FetchErrorKind, SeriesFetcher, SeriesLookup, SeriesRequest};
pub use filter::{filter_by_day, filter_by_range, FilterError};
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
pub use query::{run_query, DateWindow, EmptyResult, QueryError, QueryOutcome, QueryPlan};
