//! Decode raw model text into a validated [`OsintReport`].
//!
//! Pipeline: strip code fences → isolate the JSON object → parse → validate
//! against the `osint_report` schema → deserialize. Any failure returns a
//! [`SchemaError`]; values are never clamped or defaulted into range.

use gt_core::OsintReport;

use crate::error::SchemaError;
use crate::registry::{OSINT_REPORT, SchemaRegistry};

/// Remove a surrounding Markdown code fence (```` ``` ```` or ```` ```json ````).
///
/// Text without a leading fence is returned trimmed but otherwise unchanged.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string (`json`, `JSON`, ...) up to the first newline.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Isolate the JSON object in a model reply.
///
/// Grounded replies often put prose before or after the object, or close the
/// fence and keep talking. After fence stripping, the text is narrowed to the
/// first balanced `{ ... }` object; braces inside JSON strings do not count.
/// An object that never closes runs to the end of the text, and text with no
/// `{` at all is returned as-is, so the JSON parser reports the real problem.
#[must_use]
pub fn extract_json_text(text: &str) -> &str {
    let stripped = strip_code_fence(text);
    let Some(start) = stripped.find('{') else {
        return stripped;
    };
    let candidate = &stripped[start..];
    match balanced_object_len(candidate) {
        Some(len) => &candidate[..len],
        None => candidate,
    }
}

/// Byte length of the object opening at `text[0]`, or `None` if it never closes.
fn balanced_object_len(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (index, byte) in text.bytes().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(index + 1);
                }
            }
            _ => {}
        }
    }
    None
}

/// Decode raw model text into a report.
///
/// # Errors
///
/// - [`SchemaError::EmptyResponse`] for blank text
/// - [`SchemaError::NotJson`] when the text does not parse
/// - [`SchemaError::ValidationFailed`] for missing fields, wrong types, or
///   out-of-range `confidenceScore` / `strength`
/// - [`SchemaError::Deserialize`] if validated JSON still fails to map
pub fn decode_report(raw: &str) -> Result<OsintReport, SchemaError> {
    if raw.trim().is_empty() {
        return Err(SchemaError::EmptyResponse);
    }

    let text = extract_json_text(raw);
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| SchemaError::NotJson(e.to_string()))?;
    decode_report_value(value)
}

/// Validate and deserialize an already-parsed JSON value.
///
/// # Errors
///
/// See [`decode_report`].
pub fn decode_report_value(value: serde_json::Value) -> Result<OsintReport, SchemaError> {
    SchemaRegistry::global().validate(OSINT_REPORT, &value)?;
    let report: OsintReport =
        serde_json::from_value(value).map_err(|e| SchemaError::Deserialize(e.to_string()))?;
    tracing::debug!(
        target_name = %report.target_name,
        connections = report.connections.len(),
        "decoded report"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("{\"a\":1}", "{\"a\":1}")]
    #[case("```json\n{\"a\":1}\n```", "{\"a\":1}")]
    #[case("```JSON\n{\"a\":1}\n```\n", "{\"a\":1}")]
    #[case("```\n{\"a\":1}\n```", "{\"a\":1}")]
    #[case("  ```json{\"a\":1}```  ", "{\"a\":1}")]
    #[case("not json", "not json")]
    fn strips_fences(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(strip_code_fence(input), expected);
    }

    #[test]
    fn unterminated_fence_keeps_body() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn extracts_object_from_prose() {
        let text = "Here is the dossier:\n{\"a\": {\"b\": 2}}\nLet me know.";
        assert_eq!(extract_json_text(text), "{\"a\": {\"b\": 2}}");
    }

    #[rstest]
    #[case::fence_then_remark("```json\n{\"a\":1}\n```\nLet me know if you need more.", "{\"a\":1}")]
    #[case::object_then_sources("{\"a\":1}\n\nSources: {1} nestle.com", "{\"a\":1}")]
    #[case::braces_in_strings("{\"a\":\"}{\\\"}\"} trailing", "{\"a\":\"}{\\\"}\"}")]
    #[case::never_closes("note: {\"a\": {\"b\": 1}", "{\"a\": {\"b\": 1}")]
    fn narrows_to_first_balanced_object(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(extract_json_text(input), expected);
    }

    #[test]
    fn blank_text_is_empty_response() {
        assert!(matches!(decode_report("  \n"), Err(SchemaError::EmptyResponse)));
    }

    #[test]
    fn non_json_is_rejected() {
        let err = decode_report("not json").unwrap_err();
        assert!(matches!(err, SchemaError::NotJson(_)));
        assert!(err.to_string().starts_with("Response is not valid JSON"));
    }
}
