//! Series fetcher for the Alpha Vantage `TIME_SERIES_*` endpoints.
//!
//! One call issues exactly one HTTP request. Failures are not retried; the
//! caller decides whether to ask again.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::ProviderConfig;
use crate::domain::{
    Granularity, IntradayInterval, RawFields, RawSeries, RawSeriesEntry, Symbol, YearMonth,
};
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};

const SERIES_KEY_MARKER: &str = "Time Series";
const PROVIDER_MESSAGE_KEYS: [&str; 3] = ["Error Message", "Note", "Information"];

/// Parameters of one series request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesRequest {
    pub symbol: Symbol,
    pub granularity: Granularity,
    /// Bucket size; only sent for intraday requests.
    pub interval: IntradayInterval,
    /// Month selector; only sent for intraday requests.
    pub month: Option<YearMonth>,
}

impl SeriesRequest {
    pub fn new(symbol: Symbol, granularity: Granularity) -> Self {
        Self {
            symbol,
            granularity,
            interval: IntradayInterval::default(),
            month: None,
        }
    }

    pub fn with_interval(mut self, interval: IntradayInterval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_month(mut self, month: YearMonth) -> Self {
        self.month = Some(month);
        self
    }
}

/// Fetch failure classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Transport,
    MalformedResponse,
    NoData,
}

/// Structured fetch error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::Transport,
            message: message.into(),
        }
    }

    pub fn malformed_response(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::MalformedResponse,
            message: message.into(),
        }
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self {
            kind: FetchErrorKind::NoData,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Transport => "fetch.transport",
            FetchErrorKind::MalformedResponse => "fetch.malformed_response",
            FetchErrorKind::NoData => "fetch.no_data",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Result of looking for the time-series payload inside a response envelope.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesLookup<'a> {
    Found { key: &'a str, payload: &'a Value },
    Missing { provider_message: Option<String> },
}

/// Locates the series payload in a decoded envelope.
///
/// The key the provider documents for `granularity` wins; otherwise the
/// first key containing `Time Series` is used.
pub fn lookup_series<'a>(
    envelope: &'a Map<String, Value>,
    granularity: Granularity,
    interval: IntradayInterval,
) -> SeriesLookup<'a> {
    let expected = expected_series_key(granularity, interval);
    let found = envelope
        .get_key_value(expected.as_str())
        .or_else(|| {
            envelope
                .iter()
                .find(|(key, _)| key.contains(SERIES_KEY_MARKER))
        });

    match found {
        Some((key, payload)) => SeriesLookup::Found {
            key: key.as_str(),
            payload,
        },
        None => SeriesLookup::Missing {
            provider_message: PROVIDER_MESSAGE_KEYS
                .iter()
                .find_map(|name| envelope.get(*name).and_then(Value::as_str))
                .map(str::to_owned),
        },
    }
}

/// Envelope key the provider uses for each granularity.
pub fn expected_series_key(granularity: Granularity, interval: IntradayInterval) -> String {
    match granularity {
        Granularity::Intraday => format!("Time Series ({interval})"),
        Granularity::Daily => String::from("Time Series (Daily)"),
        Granularity::Weekly => String::from("Weekly Time Series"),
        Granularity::Monthly => String::from("Monthly Time Series"),
    }
}

/// Fetches raw price series through an injected transport.
#[derive(Clone)]
pub struct SeriesFetcher {
    http_client: Arc<dyn HttpClient>,
    config: ProviderConfig,
}

impl SeriesFetcher {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::default()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: ProviderConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Builds the provider request for `req`.
    pub fn build_request(&self, req: &SeriesRequest) -> HttpRequest {
        let mut request = HttpRequest::get(&self.config.base_url)
            .with_query("function", req.granularity.function_code())
            .with_query("symbol", req.symbol.as_str())
            .with_query("apikey", &self.config.api_key)
            .with_query("datatype", "json")
            .with_query("outputsize", "full")
            .with_timeout_ms(self.config.timeout_ms);

        if req.granularity.is_intraday() {
            request = request.with_query("interval", req.interval.as_str());
            if let Some(month) = req.month {
                request = request.with_query("month", month.to_string());
            }
        }

        request
    }

    pub async fn fetch(&self, req: &SeriesRequest) -> Result<RawSeries, FetchError> {
        let request = self.build_request(req);
        tracing::debug!(url = %request.redacted_url(), "requesting series");

        let response = self.http_client.execute(request).await.map_err(|error| {
            FetchError::transport(format!("quote provider transport error: {}", error.message()))
        })?;

        if !response.is_success() {
            return Err(FetchError::transport(format!(
                "quote provider returned status {}",
                response.status
            )));
        }

        let envelope: Map<String, Value> = serde_json::from_str(&response.body).map_err(|e| {
            FetchError::malformed_response(format!("failed to parse provider response: {e}"))
        })?;

        match lookup_series(&envelope, req.granularity, req.interval) {
            SeriesLookup::Found { key, payload } => {
                let series = decode_series(key, payload)?;
                tracing::info!(
                    symbol = %req.symbol,
                    granularity = %req.granularity,
                    key,
                    entries = series.len(),
                    "fetched series"
                );
                Ok(series)
            }
            SeriesLookup::Missing { provider_message } => {
                tracing::warn!(
                    symbol = %req.symbol,
                    granularity = %req.granularity,
                    provider_message = provider_message.as_deref().unwrap_or(""),
                    "no time series in provider response"
                );
                Err(FetchError::no_data(match provider_message {
                    Some(message) => format!("no valid time series data found: {message}"),
                    None => String::from("no valid time series data found"),
                }))
            }
        }
    }
}

fn decode_series(key: &str, payload: &Value) -> Result<RawSeries, FetchError> {
    let entries = payload.as_object().ok_or_else(|| {
        FetchError::malformed_response(format!("'{key}' is not a timestamp mapping"))
    })?;

    entries
        .iter()
        .map(|(timestamp, fields)| {
            RawFields::deserialize(fields)
                .map(|fields| RawSeriesEntry {
                    timestamp: timestamp.clone(),
                    fields,
                })
                .map_err(|e| {
                    FetchError::malformed_response(format!(
                        "entry '{timestamp}' has unexpected fields: {e}"
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(RawSeries::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn prefers_documented_key_over_substring_match() {
        let env = envelope(json!({
            "Meta Data": {},
            "Time Series (5min)": {},
            "Time Series (60min)": {"2023-01-02 10:00:00": {}},
        }));

        match lookup_series(&env, Granularity::Intraday, IntradayInterval::SixtyMinutes) {
            SeriesLookup::Found { key, .. } => assert_eq!(key, "Time Series (60min)"),
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn falls_back_to_any_time_series_key() {
        let env = envelope(json!({
            "Meta Data": {},
            "Weekly Adjusted Time Series": {},
        }));

        match lookup_series(&env, Granularity::Weekly, IntradayInterval::default()) {
            SeriesLookup::Found { key, .. } => assert_eq!(key, "Weekly Adjusted Time Series"),
            other => panic!("unexpected lookup result: {other:?}"),
        }
    }

    #[test]
    fn missing_series_carries_provider_message() {
        let env = envelope(json!({
            "Error Message": "Invalid API call.",
        }));

        assert_eq!(
            lookup_series(&env, Granularity::Daily, IntradayInterval::default()),
            SeriesLookup::Missing {
                provider_message: Some(String::from("Invalid API call."))
            }
        );
    }

    #[test]
    fn expected_keys_follow_provider_naming() {
        assert_eq!(
            expected_series_key(Granularity::Intraday, IntradayInterval::FiveMinutes),
            "Time Series (5min)"
        );
        assert_eq!(
            expected_series_key(Granularity::Daily, IntradayInterval::default()),
            "Time Series (Daily)"
        );
        assert_eq!(
            expected_series_key(Granularity::Monthly, IntradayInterval::default()),
            "Monthly Time Series"
        );
    }

    #[test]
    fn intraday_request_carries_interval_and_month() {
        let fetcher = SeriesFetcher::new(ProviderConfig::new("https://example.test/query", "k"));
        let month = crate::CalendarDate::parse("2023-01-02")
            .expect("valid")
            .year_month();
        let req = SeriesRequest::new(Symbol::parse("ibm").expect("valid"), Granularity::Intraday)
            .with_interval(IntradayInterval::FifteenMinutes)
            .with_month(month);

        let request = fetcher.build_request(&req);
        assert_eq!(request.query_value("function"), Some("TIME_SERIES_INTRADAY"));
        assert_eq!(request.query_value("symbol"), Some("IBM"));
        assert_eq!(request.query_value("interval"), Some("15min"));
        assert_eq!(request.query_value("month"), Some("2023-01"));
        assert_eq!(request.query_value("outputsize"), Some("full"));
        assert_eq!(request.query_value("datatype"), Some("json"));
    }

    #[test]
    fn daily_request_ignores_intraday_parameters() {
        let fetcher = SeriesFetcher::new(ProviderConfig::new("https://example.test/query", "k"));
        let month = crate::CalendarDate::parse("2023-01-02")
            .expect("valid")
            .year_month();
        let req = SeriesRequest::new(Symbol::parse("IBM").expect("valid"), Granularity::Daily)
            .with_month(month);

        let request = fetcher.build_request(&req);
        assert_eq!(request.query_value("function"), Some("TIME_SERIES_DAILY"));
        assert_eq!(request.query_value("interval"), None);
        assert_eq!(request.query_value("month"), None);
    }

    #[test]
    fn decode_rejects_non_object_payload() {
        let err = decode_series("Time Series (Daily)", &json!(["x"])).expect_err("must fail");
        assert_eq!(err.kind(), FetchErrorKind::MalformedResponse);
    }
}
