//! # gt-schema
//!
//! JSON Schema generation, validation, and the report decode step.
//!
//! This crate provides:
//! - `SchemaRegistry`: schemas for every gt-core type that crosses a trust
//!   boundary (model output, backend rows)
//! - `decode_report`: strips code fences from raw model text, parses JSON,
//!   validates it against the `osint_report` schema, and only then
//!   deserializes it. The result is either a complete `OsintReport` or a
//!   `SchemaError` naming the reason; a partial report is never produced.

mod decode;
mod error;
mod registry;

pub use decode::{decode_report, decode_report_value, extract_json_text, strip_code_fence};
pub use error::SchemaError;
pub use registry::SchemaRegistry;
