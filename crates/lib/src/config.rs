//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.hookrelay/config.json`) and environment.
//! The destination URL itself is not resolved here; see [`crate::endpoint`].

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the Slack webhook URL unless `relay.urlEnv` says otherwise.
pub const DEFAULT_URL_ENV: &str = "SLACK_URL";

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Gateway server settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Relay (outbound Slack) settings.
    #[serde(default)]
    pub relay: RelayConfig,
}

/// Gateway bind and port.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Port for HTTP (default 15152).
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Bind address (default "127.0.0.1").
    #[serde(default = "default_gateway_bind")]
    pub bind: String,
}

fn default_gateway_port() -> u16 {
    15152
}

fn default_gateway_bind() -> String {
    "127.0.0.1".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_gateway_port(),
            bind: default_gateway_bind(),
        }
    }
}

/// Outbound relay settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayConfig {
    /// Name of the environment variable read on every invocation for the destination URL.
    #[serde(default = "default_url_env")]
    pub url_env: String,
    /// Used only when the environment variable is unset or blank.
    #[serde(default)]
    pub slack_url: Option<String>,
    /// Request timeout in seconds. Unset means the HTTP client's default (none).
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_url_env() -> String {
    DEFAULT_URL_ENV.to_string()
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url_env: default_url_env(),
            slack_url: None,
            timeout_secs: None,
        }
    }
}

impl RelayConfig {
    /// Configured request timeout; zero is treated as unset.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("HOOKRELAY_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".hookrelay").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load config from the given path, or the default path (or HOOKRELAY_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gateway_port_and_bind() {
        let g = GatewayConfig::default();
        assert_eq!(g.port, 15152);
        assert_eq!(g.bind, "127.0.0.1");
    }

    #[test]
    fn empty_object_yields_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.relay.url_env, "SLACK_URL");
        assert!(config.relay.slack_url.is_none());
        assert!(config.relay.timeout().is_none());
    }

    #[test]
    fn camel_case_relay_section() {
        let config: Config = serde_json::from_str(
            r#"{"gateway":{"port":8080},"relay":{"urlEnv":"MY_HOOK","slackUrl":"https://hooks.slack.test/x","timeoutSecs":5}}"#,
        )
        .unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.gateway.bind, "127.0.0.1");
        assert_eq!(config.relay.url_env, "MY_HOOK");
        assert_eq!(config.relay.slack_url.as_deref(), Some("https://hooks.slack.test/x"));
        assert_eq!(config.relay.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn zero_timeout_is_unset() {
        let relay = RelayConfig {
            timeout_secs: Some(0),
            ..RelayConfig::default()
        };
        assert!(relay.timeout().is_none());
    }

    #[test]
    fn load_config_missing_file_is_default() {
        let path = std::env::temp_dir()
            .join(format!("hookrelay-missing-{}", uuid::Uuid::new_v4()))
            .join("config.json");
        let (config, used) = load_config(Some(path.clone())).unwrap();
        assert_eq!(used, path);
        assert_eq!(config.gateway.port, 15152);
    }

    #[test]
    fn load_config_rejects_invalid_json() {
        let dir = std::env::temp_dir().join(format!("hookrelay-bad-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        let err = load_config(Some(path)).unwrap_err();
        assert!(format!("{:#}", err).contains("parsing config from"));
    }
}
