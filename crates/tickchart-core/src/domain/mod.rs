//! # Domain Models
//!
//! Strongly-typed values that flow through the fetch → filter → chart
//! pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`CalendarDate`] | Strict `YYYY-MM-DD` date |
//! | [`YearMonth`] | `YYYY-MM` intraday month selector |
//! | [`SeriesTimestamp`] | Parsed provider timestamp key, used for ordering |
//! | [`Symbol`] | Validated, uppercased ticker |
//! | [`Granularity`] | Intraday, daily, weekly or monthly series |
//! | [`IntradayInterval`] | Intraday bucket size (1min … 60min) |
//! | [`RawSeries`] | Provider series with string-valued fields |
//! | [`FilteredTable`] | Ordered, numeric, date-bounded rows |
//!
//! Construction validates input; a failed parse never yields a default
//! value:
//!
//! ```rust
//! use tickchart_core::{CalendarDate, ValidationError};
//!
//! let date = CalendarDate::parse("2024-02-29").unwrap();
//! assert_eq!(date.to_string(), "2024-02-29");
//!
//! let invalid = CalendarDate::parse("2023-02-30");
//! assert!(matches!(invalid, Err(ValidationError::InvalidDate { .. })));
//! ```

mod date;
mod granularity;
mod series;
mod symbol;
mod table;

pub use date::{CalendarDate, SeriesTimestamp, YearMonth};
pub use granularity::{Granularity, IntradayInterval};
pub use series::{RawFields, RawSeries, RawSeriesEntry};
pub use symbol::Symbol;
pub use table::{FilteredTable, OhlcRow, OhlcValues};
