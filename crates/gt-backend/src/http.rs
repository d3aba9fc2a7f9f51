//! Response checks shared by the auth and data endpoints.

use crate::error::BackendError;

pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::Api {
        status,
        message: error_message(&body),
    })
}

/// Supabase error bodies use `msg` (GoTrue), `error_description` (OAuth),
/// or `message` (PostgREST). Fall back to the raw body.
fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| value[*key].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
