//! hookrelay core library: GitHub issue webhook to Slack relay handler, its configuration,
//! and the HTTP gateway that hosts it. Used by the `hookrelay` CLI.

pub mod config;
pub mod context;
pub mod endpoint;
pub mod error;
pub mod gateway;
pub mod init;
pub mod notification;
pub mod payload;
pub mod relay;

pub use context::{ExecutionContext, InvocationContext};
pub use error::RelayError;
pub use relay::WebhookRelayHandler;
