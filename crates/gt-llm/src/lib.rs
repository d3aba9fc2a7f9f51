//! # gt-llm
//!
//! Language-model side of GhostTrace.
//!
//! - [`ReportGenerator`]: builds the analyst prompt for a target, calls the
//!   model with Google Search grounding enabled, and decodes the reply into a
//!   validated [`gt_core::OsintReport`] (merging grounding citations into
//!   `sources`).
//! - [`ChatClient`]: answers follow-up questions using only the supplied
//!   report as context.
//! - [`LlmTransport`]: the seam between both clients and the network.
//!   [`GeminiTransport`] talks to the Gemini REST API; tests substitute a
//!   scripted transport.
//!
//! Every call is a single request: no retries, streaming, or pagination.

mod chat;
mod error;
mod http;
pub mod prompt;
mod report;
mod transport;
pub mod wire;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use chat::{CONNECTION_ERROR_REPLY, ChatClient, EMPTY_REPLY};
pub use error::{ChatError, GenerationError, TransportError};
pub use report::ReportGenerator;
pub use transport::{GeminiTransport, LlmTransport};
