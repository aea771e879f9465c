use std::fmt::{Debug, Formatter};

use crate::chart::ChartKind;
use crate::domain::Granularity;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
pub const API_KEY_ENV: &str = "TICKCHART_ALPHAVANTAGE_API_KEY";
pub const BASE_URL_ENV: &str = "TICKCHART_ALPHAVANTAGE_URL";
pub const TIMEOUT_ENV: &str = "TICKCHART_TIMEOUT_MS";

/// Connection settings handed to [`SeriesFetcher`](crate::SeriesFetcher) at
/// construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: String,
    /// Per-request timeout; `None` uses the transport default.
    pub timeout_ms: Option<u64>,
}

impl ProviderConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_ms: None,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Reads the provider settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the settings from an arbitrary variable lookup.
    ///
    /// Blank values count as unset. An unparseable timeout is ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let timeout_ms = read(TIMEOUT_ENV).and_then(|raw| match raw.parse::<u64>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(variable = TIMEOUT_ENV, value = %raw, "ignoring invalid timeout");
                None
            }
        });

        Self {
            base_url: read(BASE_URL_ENV).unwrap_or_else(|| String::from(DEFAULT_BASE_URL)),
            api_key: read(API_KEY_ENV).unwrap_or_else(|| String::from("demo")),
            timeout_ms,
        }
    }
}

impl Debug for ProviderConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout_ms", &self.timeout_ms)
            .finish()
    }
}

/// Fallbacks applied when a menu choice is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptDefaults {
    pub chart_kind: ChartKind,
    pub granularity: Granularity,
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self {
            chart_kind: ChartKind::Line,
            granularity: Granularity::Daily,
        }
    }
}
