//! Remote sink that POSTs each event as JSON.

use async_trait::async_trait;
use fanlog_core::time::format_timestamp;
use fanlog_types::{FanlogError, LogEvent, LogLevel, LogSink, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// JSON body sent for one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpPayload {
    /// Severity, lowercase
    pub level: LogLevel,
    /// Log message
    pub message: String,
    /// Rendered error chain, if an error was attached
    #[serde(default)]
    pub error: Option<String>,
    /// Stack trace, if one was attached
    #[serde(default)]
    pub stack_trace: Option<String>,
    /// RFC 3339 timestamp with milliseconds
    pub timestamp: String,
    /// Name of the emitting logger
    pub source: String,
}

impl From<&LogEvent> for HttpPayload {
    fn from(event: &LogEvent) -> Self {
        Self {
            level: event.level,
            message: event.message.clone(),
            error: event.error_text(),
            stack_trace: event.stack_trace.clone(),
            timestamp: format_timestamp(event.timestamp),
            source: event.source.clone(),
        }
    }
}

/// Sink that sends every accepted event to an HTTP endpoint.
#[derive(Clone)]
pub struct HttpSink {
    name: String,
    minimum_level: LogLevel,
    endpoint: Url,
    timeout: Duration,
    headers: HeaderMap,
    client: Client,
}

impl HttpSink {
    /// Create a sink posting to `url`.
    pub fn new(url: &str) -> Result<Self> {
        let endpoint = Url::parse(url)
            .map_err(|e| FanlogError::Config(format!("Invalid endpoint URL '{}': {}", url, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(FanlogError::Config(format!(
                "Endpoint URL '{}' must use http or https",
                url
            )));
        }

        let client = Client::builder()
            .build()
            .map_err(|e| FanlogError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            name: "http".to_string(),
            minimum_level: LogLevel::Verbose,
            endpoint,
            timeout: DEFAULT_TIMEOUT,
            headers: HeaderMap::new(),
            client,
        })
    }

    /// Set the sink name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Ignore events below `level`.
    pub fn with_minimum_level(mut self, level: LogLevel) -> Self {
        self.minimum_level = level;
        self
    }

    /// Per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send `name: value` with every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let header = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| FanlogError::Config(format!("Invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| FanlogError::Config(format!("Invalid value for header '{}': {}", name, e)))?;
        self.headers.insert(header, value);
        Ok(self)
    }

    /// The endpoint events are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl LogSink for HttpSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn minimum_level(&self) -> LogLevel {
        self.minimum_level
    }

    async fn deliver(&self, event: &LogEvent) -> Result<()> {
        if !self.accepts(event.level) {
            return Ok(());
        }

        let payload = HttpPayload::from(event);
        let response = self
            .client
            .post(self.endpoint.clone())
            .timeout(self.timeout)
            .headers(self.headers.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| FanlogError::Transport(format!("POST {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FanlogError::Transport(format!(
                "POST {} returned {}: {}",
                self.endpoint,
                status,
                body.trim()
            )));
        }

        Ok(())
    }
}
