//! Inbound GitHub issue event: narrow typed view exposing only `issue.html_url`.

use serde::Deserialize;

use crate::error::RelayError;

/// GitHub "issues" webhook body. Every field other than `issue.html_url` is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct InboundEvent {
    #[serde(default)]
    pub issue: Option<Issue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub html_url: Option<String>,
}

impl InboundEvent {
    /// The issue URL when present and non-empty.
    pub fn issue_url(&self) -> Option<&str> {
        self.issue
            .as_ref()
            .and_then(|i| i.html_url.as_deref())
            .filter(|u| !u.is_empty())
    }
}

/// Parse a raw payload and pull out `issue.html_url`.
///
/// Invalid JSON, including bytes that are not UTF-8, is a [`RelayError::Parse`]. Valid JSON
/// that does not have the expected shape (no `issue`, `html_url` absent, empty, or not a
/// string, top-level not an object) is [`RelayError::MissingIssueUrl`].
pub fn extract_issue_url(raw: impl AsRef<[u8]>) -> Result<String, RelayError> {
    let value: serde_json::Value = serde_json::from_slice(raw.as_ref())?;
    let event: InboundEvent = serde_json::from_value(value).unwrap_or_default();
    event
        .issue_url()
        .map(str::to_string)
        .ok_or(RelayError::MissingIssueUrl)
}
