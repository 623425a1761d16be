//! Gateway HTTP server (single port).

use crate::config::Config;
use crate::context::InvocationContext;
use crate::relay::WebhookRelayHandler;
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// GitHub sends a per-delivery GUID in this header; reused as the invocation's request id.
const GITHUB_DELIVERY_HEADER: &str = "x-github-delivery";
const GITHUB_EVENT_HEADER: &str = "x-github-event";

/// Shared state for the gateway.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<Config>,
    pub handler: Arc<WebhookRelayHandler>,
}

impl GatewayState {
    /// State with a handler built from `config.relay`.
    pub fn new(config: Config) -> Result<Self> {
        let handler = WebhookRelayHandler::from_config(&config.relay)
            .context("building relay HTTP client")?;
        Ok(Self {
            config: Arc::new(config),
            handler: Arc::new(handler),
        })
    }
}

/// Routes: `GET /` health, `POST /webhook` relay.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(health_http))
        .route("/webhook", post(github_webhook))
        .with_state(state)
}

/// Run the gateway server; binds to config.gateway.bind:config.gateway.port.
/// Blocks until shutdown (e.g. Ctrl+C or SIGTERM).
pub async fn run_gateway(config: Config) -> Result<()> {
    let bind_addr = format!("{}:{}", config.gateway.bind.trim(), config.gateway.port);
    let state = GatewayState::new(config)?;
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("gateway listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server exited")?;
    log::info!("gateway stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// POST /webhook — hands the raw body bytes to the relay handler (non-UTF-8 bodies fail as invalid JSON).
/// Always 200; the body is the handler's string.
async fn github_webhook(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let ctx = match header_str(&headers, GITHUB_DELIVERY_HEADER) {
        Some(id) => InvocationContext::with_request_id("gateway", id),
        None => InvocationContext::new("gateway"),
    };
    if let Some(event) = header_str(&headers, GITHUB_EVENT_HEADER) {
        log::debug!("webhook event type: {}", event);
    }
    let result = state.handler.handle(&body, &ctx).await;
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        result,
    )
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "port": state.config.gateway.port,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_str_trims_and_skips_empty() {
        let mut headers = HeaderMap::new();
        headers.insert(GITHUB_DELIVERY_HEADER, " abc ".parse().unwrap());
        headers.insert(GITHUB_EVENT_HEADER, "".parse().unwrap());
        assert_eq!(header_str(&headers, GITHUB_DELIVERY_HEADER), Some("abc"));
        assert_eq!(header_str(&headers, GITHUB_EVENT_HEADER), None);
        assert_eq!(header_str(&headers, "missing"), None);
    }
}
