use thiserror::Error;

/// Validation errors for user-supplied input exposed by `tickchart-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid date format '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },
    #[error("end date {end} is earlier than start date {start}")]
    EndBeforeStart { start: String, end: String },

    #[error("invalid intraday interval '{value}', expected one of 1min, 5min, 15min, 30min, 60min")]
    InvalidInterval { value: String },
}

/// Failures while writing a chart artifact.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("cannot render a chart with no rows")]
    EmptyTable,

    #[error("failed to write chart '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
