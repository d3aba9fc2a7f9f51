//! Cross-cutting error types for GhostTrace.
//!
//! Domain-specific errors (`GenerationError`, `AuthError`, ...) live in their
//! own crates and converge as `anyhow::Error` in `gt-cli`.

use thiserror::Error;

use crate::enums::ViewKind;

/// Errors that can be raised by any GhostTrace crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A view transition was attempted that is not allowed.
    #[error("Invalid view transition from {from} to {to}")]
    InvalidTransition { from: ViewKind, to: ViewKind },

    /// Data failed validation (schema, format, ranges).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
