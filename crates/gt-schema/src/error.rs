//! Schema validation and decode error types.

use thiserror::Error;

/// Errors from the schema registry and the report decode step.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("Validation failed: {}", errors.join("; "))]
    ValidationFailed {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// Schema generation or compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),

    /// The model returned no text at all.
    #[error("Empty response from model")]
    EmptyResponse,

    /// The text was not parseable as JSON.
    #[error("Response is not valid JSON: {0}")]
    NotJson(String),

    /// The JSON passed validation but could not be mapped onto the model type.
    #[error("Response does not match the report shape: {0}")]
    Deserialize(String),
}
