use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

const REDACTED_PARAMS: [&str; 1] = ["apikey"];

/// HTTP GET request with ordered query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub base_url: String,
    pub query: Vec<(String, String)>,
    /// `None` leaves the transport default in place.
    pub timeout_ms: Option<u64>,
}

impl HttpRequest {
    pub fn get(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            query: Vec::new(),
            timeout_ms: None,
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Full URL with percent-encoded query string.
    pub fn url(&self) -> String {
        self.render(|_, value| urlencoding::encode(value).into_owned())
    }

    /// URL safe for logs: credentials are masked.
    pub fn redacted_url(&self) -> String {
        self.render(|name, value| {
            if REDACTED_PARAMS.contains(&name) {
                String::from("***")
            } else {
                urlencoding::encode(value).into_owned()
            }
        })
    }

    fn render(&self, encode_value: impl Fn(&str, &str) -> String) -> String {
        if self.query.is_empty() {
            return self.base_url.clone();
        }

        let query = self
            .query
            .iter()
            .map(|(name, value)| {
                format!("{}={}", urlencoding::encode(name), encode_value(name, value))
            })
            .collect::<Vec<_>>()
            .join("&");
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        format!("{}{separator}{query}", self.base_url)
    }
}

/// HTTP response returned by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok_json(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport failure; the fetcher reports it without retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    message: String,
}

impl HttpError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for HttpError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for HttpError {}

/// Transport seam used by the series fetcher; tests substitute fakes.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>>;
}

/// Provider transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tickchart/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            let mut builder = self.client.get(request.url());

            if let Some(timeout_ms) = request.timeout_ms {
                builder = builder.timeout(Duration::from_millis(timeout_ms));
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    HttpError::new(format!("request timeout: {}", e.without_url()))
                } else if e.is_connect() {
                    HttpError::new(format!("connection failed: {}", e.without_url()))
                } else if e.is_builder() {
                    HttpError::new(format!("invalid request: {}", e.without_url()))
                } else {
                    HttpError::new(format!("request failed: {}", e.without_url()))
                }
            })?;

            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .map_err(|e| HttpError::new(format!("failed to read response body: {}", e.without_url())))?;

            Ok(HttpResponse { status, body })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_query_in_insertion_order() {
        let request = HttpRequest::get("https://example.test/query")
            .with_query("function", "TIME_SERIES_DAILY")
            .with_query("symbol", "BRK.B");

        assert_eq!(
            request.url(),
            "https://example.test/query?function=TIME_SERIES_DAILY&symbol=BRK.B"
        );
    }

    #[test]
    fn encodes_reserved_characters() {
        let request = HttpRequest::get("https://example.test/query").with_query("q", "a b&c");
        assert_eq!(request.url(), "https://example.test/query?q=a%20b%26c");
    }

    #[test]
    fn redacts_api_key_for_logging() {
        let request = HttpRequest::get("https://example.test/query")
            .with_query("symbol", "AAPL")
            .with_query("apikey", "secret-key");

        let redacted = request.redacted_url();
        assert!(!redacted.contains("secret-key"));
        assert!(redacted.ends_with("apikey=***"));
        assert_eq!(request.query_value("apikey"), Some("secret-key"));
    }

    #[test]
    fn appends_to_existing_query_string() {
        let request = HttpRequest::get("https://example.test/query?mode=x").with_query("a", "1");
        assert_eq!(request.url(), "https://example.test/query?mode=x&a=1");
    }

    #[test]
    fn transport_error_is_just_its_message() {
        let error = HttpError::new("connection failed: refused");
        assert_eq!(error.message(), "connection failed: refused");
        assert_eq!(error.to_string(), "connection failed: refused");
    }
}
