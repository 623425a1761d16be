//! Relay failure kinds. Every variant ends up as `"Error: <message>"` at the handler boundary.

use reqwest::StatusCode;

/// Message returned when `issue.html_url` is absent or empty.
pub const MISSING_ISSUE_URL: &str = "Issue URL is missing in the payload.";

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Payload is not syntactically valid JSON.
    #[error("payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// `issue.html_url` missing, empty, or of the wrong shape.
    #[error("Issue URL is missing in the payload.")]
    MissingIssueUrl,
    /// Destination URL unset or malformed.
    #[error("{0}")]
    Configuration(String),
    /// Network, DNS, or connection failure talking to the endpoint.
    #[error("request to notification endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// Endpoint answered with a non-success status, redirects included (status only, never the body).
    #[error("notification endpoint returned {0}")]
    Status(StatusCode),
}

impl RelayError {
    /// Text handed back to the invoking runtime.
    pub fn to_result_string(&self) -> String {
        format!("Error: {}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_issue_url_message_is_exact() {
        assert_eq!(RelayError::MissingIssueUrl.to_string(), MISSING_ISSUE_URL);
        assert_eq!(
            RelayError::MissingIssueUrl.to_result_string(),
            "Error: Issue URL is missing in the payload."
        );
    }

    #[test]
    fn status_error_mentions_status_only() {
        let e = RelayError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            e.to_result_string(),
            "Error: notification endpoint returned 500 Internal Server Error"
        );
    }

    #[test]
    fn parse_error_is_prefixed() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let e = RelayError::from(err);
        assert!(e.to_result_string().starts_with("Error: payload is not valid JSON: "));
    }
}
