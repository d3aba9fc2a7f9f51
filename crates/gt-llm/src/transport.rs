//! The network seam between the clients and the Gemini REST API.

use std::future::Future;
use std::time::Duration;

use gt_config::GeminiConfig;

use crate::error::TransportError;
use crate::http::check_response;
use crate::wire::{GenerateContentRequest, GenerateContentResponse};

/// Sends one `generateContent` request and returns the decoded response.
///
/// Implementations perform exactly one call: no retries, no streaming.
pub trait LlmTransport: Send + Sync {
    fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, TransportError>> + Send;
}

/// Gemini REST transport.
#[derive(Debug, Clone)]
pub struct GeminiTransport {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiTransport {
    /// Build a transport for `model` at `base_url` with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ghosttrace/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    /// Build a transport from the `[gemini]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, TransportError> {
        Self::new(
            config.base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full `generateContent` endpoint for the configured model.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        )
    }
}

impl LlmTransport for GeminiTransport {
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, TransportError> {
        if api_key.trim().is_empty() {
            return Err(TransportError::MissingApiKey);
        }
        let url = self.endpoint();
        tracing::debug!(model = %self.model, contents = request.contents.len(), "gemini: generateContent");

        let resp = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key.trim())
            .json(request)
            .send()
            .await?;
        let resp = check_response(resp).await?;
        Ok(resp.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_uses_model_and_trims_slash() {
        let t = GeminiTransport::new(
            "https://generativelanguage.googleapis.com/v1beta/",
            "gemini-2.5-flash",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(
            t.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn from_config_uses_defaults() {
        let t = GeminiTransport::from_config(&GeminiConfig::default()).unwrap();
        assert_eq!(t.model(), "gemini-2.5-flash");
    }

    #[tokio::test]
    async fn blank_key_is_rejected_before_any_request() {
        let t = GeminiTransport::new("http://127.0.0.1:9", "m", Duration::from_secs(1)).unwrap();
        let err = t
            .generate_content("  ", &GenerateContentRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::MissingApiKey));
    }
}
