//! Gateway: HTTP surface that feeds inbound GitHub webhooks to the relay handler.
//!
//! Single port. `GET /` is a health probe; `POST /webhook` runs one relay invocation on the
//! raw request body and answers with the handler's string.

mod server;

pub use server::{router, run_gateway, GatewayState};
