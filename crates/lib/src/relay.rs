//! Webhook relay handler: GitHub issue event in, one Slack notification out.
//!
//! One invocation = parse payload, pull `issue.html_url`, POST `{"text": "Issue Created: <url>"}`
//! to the destination resolved for this invocation, return Slack's body. Every failure is
//! returned as `"Error: <message>"`; nothing propagates past [`WebhookRelayHandler::handle`].

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::Duration;

use crate::config::RelayConfig;
use crate::context::ExecutionContext;
use crate::endpoint::EndpointSource;
use crate::error::RelayError;
use crate::notification::OutboundNotification;
use crate::payload::extract_issue_url;

const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Stateless relay. Holds only an HTTP client and where to find the destination; safe to share across invocations.
#[derive(Clone)]
pub struct WebhookRelayHandler {
    client: reqwest::Client,
    endpoint: EndpointSource,
    timeout: Option<Duration>,
}

impl WebhookRelayHandler {
    /// Redirects are not followed: a 3xx is reported as a status error, so one invocation
    /// never issues more than one request.
    pub fn new(endpoint: EndpointSource) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            endpoint,
            timeout: None,
        })
    }

    /// Handler wired from the `relay` config section.
    pub fn from_config(relay: &RelayConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(EndpointSource::from_config(relay))?.with_timeout(relay.timeout()))
    }

    /// Per-request timeout. `None` leaves the client default in place.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &EndpointSource {
        &self.endpoint
    }

    /// Run one invocation and return its string result (Slack body, or `Error: ...`).
    /// The payload must be UTF-8 JSON; anything else takes the parse error path.
    pub async fn handle(&self, payload: impl AsRef<[u8]>, ctx: &dyn ExecutionContext) -> String {
        let payload = payload.as_ref();
        ctx.log_info(&format!("relay received: {}", String::from_utf8_lossy(payload)));
        match self.try_relay(payload).await {
            Ok(body) => body,
            Err(e) => {
                ctx.log_error(&format!("Error occurred: {}", e));
                e.to_result_string()
            }
        }
    }

    /// Same as [`handle`](Self::handle) without logging, returning the typed outcome.
    pub async fn try_relay(&self, payload: impl AsRef<[u8]>) -> Result<String, RelayError> {
        let issue_url = extract_issue_url(payload)?;
        let notification = OutboundNotification::issue_created(&issue_url);
        let url = self.endpoint.resolve()?;
        log::debug!("relaying issue {} to {}", issue_url, url.host_str().unwrap_or(""));

        let mut req = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8))
            .json(&notification);
        if let Some(t) = self.timeout {
            req = req.timeout(t);
        }
        let res = req.send().await?;
        if !res.status().is_success() {
            return Err(RelayError::Status(res.status()));
        }
        Ok(res.text().await?)
    }
}
