//! Execution context handed to every invocation: logging channel plus invocation metadata.

/// Per-invocation handle supplied by whatever hosts the handler (gateway, CLI, tests).
pub trait ExecutionContext: Send + Sync {
    /// Unique id of this invocation.
    fn request_id(&self) -> &str;
    /// Informational log line. Must never fail the invocation.
    fn log_info(&self, message: &str);
    /// Error log line. Must never fail the invocation.
    fn log_error(&self, message: &str);
}

const LOG_TARGET: &str = "hookrelay::invocation";

/// Default context: forwards to the `log` facade, tagging each line with the request id.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    request_id: String,
    source: &'static str,
}

impl InvocationContext {
    /// New context with a fresh uuid v4 request id. `source` names the surface (e.g. "gateway", "cli").
    pub fn new(source: &'static str) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            source,
        }
    }

    /// Context reusing an id supplied by the event source (e.g. a GitHub delivery id).
    pub fn with_request_id(source: &'static str, request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            source,
        }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }
}

impl ExecutionContext for InvocationContext {
    fn request_id(&self) -> &str {
        &self.request_id
    }

    fn log_info(&self, message: &str) {
        log::info!(target: LOG_TARGET, "[{} {}] {}", self.source, self.request_id, message);
    }

    fn log_error(&self, message: &str) {
        log::error!(target: LOG_TARGET, "[{} {}] {}", self.source, self.request_id, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique_per_invocation() {
        let a = InvocationContext::new("test");
        let b = InvocationContext::new("test");
        assert_ne!(a.request_id(), b.request_id());
        assert_eq!(a.source(), "test");
        assert!(uuid::Uuid::parse_str(a.request_id()).is_ok());
    }

    #[test]
    fn supplied_request_id_is_kept() {
        let ctx = InvocationContext::with_request_id("gateway", "72d3162e-cc78-11e3-81ab-4c9367dc0958");
        assert_eq!(ctx.request_id(), "72d3162e-cc78-11e3-81ab-4c9367dc0958");
        assert_eq!(ctx.source(), "gateway");
    }

    #[test]
    fn logging_without_a_logger_is_harmless() {
        let ctx = InvocationContext::new("test");
        ctx.log_info("hello");
        ctx.log_error("oops");
    }
}
