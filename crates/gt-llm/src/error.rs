//! Error types for model calls.

use gt_schema::SchemaError;
use thiserror::Error;

/// Failures talking to the model endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message extracted from the body, or the raw body.
        message: String,
    },

    /// The API returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// No API key was supplied.
    #[error("no Gemini API key configured, run `gtrace key set <KEY>`")]
    MissingApiKey,
}

/// Failure to produce a report. The message is shown verbatim to the user.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The query was empty or whitespace-only.
    #[error("query must not be empty")]
    EmptyQuery,

    /// The upstream call failed.
    #[error(transparent)]
    Upstream(#[from] TransportError),

    /// The model refused the prompt.
    #[error("request blocked by model safety filters: {0}")]
    Blocked(String),

    /// The reply was not a valid report.
    #[error(transparent)]
    Decode(#[from] SchemaError),
}

/// Failure to answer a follow-up question.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The question was empty or whitespace-only.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// The upstream call failed.
    #[error(transparent)]
    Upstream(#[from] TransportError),
}
