//! Outbound Slack message body.

use serde::Serialize;

/// Slack incoming-webhook payload: a single `text` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundNotification {
    pub text: String,
}

impl OutboundNotification {
    /// `Issue Created: <url>`, with the URL inserted as-is.
    pub fn issue_created(issue_url: &str) -> Self {
        Self {
            text: format!("Issue Created: {}", issue_url),
        }
    }
}
