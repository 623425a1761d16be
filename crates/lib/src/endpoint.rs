//! Destination URL resolution. Resolved on every invocation, never cached.

use reqwest::Url;

use crate::config::RelayConfig;
use crate::error::RelayError;

/// Where the notification endpoint URL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointSource {
    /// Read the named environment variable on each call; `fallback` is used when it is unset or blank.
    Env {
        var: String,
        fallback: Option<String>,
    },
    /// Fixed URL (tests, or an explicit override).
    Fixed(String),
}

impl EndpointSource {
    /// Build from the `relay` config section.
    pub fn from_config(relay: &RelayConfig) -> Self {
        EndpointSource::Env {
            var: relay.url_env.clone(),
            fallback: relay.slack_url.clone(),
        }
    }

    /// Resolve and validate the URL for this invocation.
    pub fn resolve(&self) -> Result<Url, RelayError> {
        let raw = match self {
            EndpointSource::Env { var, fallback } => non_empty(std::env::var(var).ok())
                .or_else(|| non_empty(fallback.clone()))
                .ok_or_else(|| RelayError::Configuration(format!("{} is not set", var)))?,
            EndpointSource::Fixed(url) => non_empty(Some(url.clone()))
                .ok_or_else(|| RelayError::Configuration("destination URL is empty".to_string()))?,
        };
        parse_destination(&raw)
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn parse_destination(raw: &str) -> Result<Url, RelayError> {
    let url = Url::parse(raw)
        .map_err(|e| RelayError::Configuration(format!("invalid destination URL: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RelayError::Configuration(format!(
            "invalid destination URL: unsupported scheme {}",
            other
        ))),
    }
}
