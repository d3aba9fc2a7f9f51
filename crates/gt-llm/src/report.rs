//! Report generation: prompt, grounded model call, validated decode.

use gt_core::OsintReport;
use gt_schema::decode_report;

use crate::error::GenerationError;
use crate::prompt::report_prompt;
use crate::transport::LlmTransport;
use crate::wire::{Content, GenerateContentRequest, Tool};

/// Turns a free-text target query into a validated [`OsintReport`].
#[derive(Debug, Clone)]
pub struct ReportGenerator<T> {
    transport: T,
}

impl<T: LlmTransport> ReportGenerator<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the grounded request for `query`.
    #[must_use]
    pub fn request_for(query: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::user(report_prompt(query))],
            system_instruction: None,
            tools: vec![Tool::google_search()],
            generation_config: None,
        }
    }

    /// Generate a report for `query`.
    ///
    /// The reply must decode into a complete report; partial reports are never
    /// returned. Grounding citation URLs are merged into `sources`.
    ///
    /// # Errors
    ///
    /// - [`GenerationError::EmptyQuery`] for a blank query (no request is sent).
    /// - [`GenerationError::Upstream`] if the model call fails.
    /// - [`GenerationError::Blocked`] if the prompt was refused.
    /// - [`GenerationError::Decode`] if the reply is empty, not JSON, or fails
    ///   schema validation.
    pub async fn generate(&self, query: &str, api_key: &str) -> Result<OsintReport, GenerationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GenerationError::EmptyQuery);
        }

        let request = Self::request_for(query);
        let response = self.transport.generate_content(api_key, &request).await?;

        if let Some(reason) = response.block_reason() {
            tracing::warn!(query, reason, "report: prompt blocked");
            return Err(GenerationError::Blocked(reason.to_string()));
        }

        let report = decode_report(&response.text())?;
        let grounding = response.grounding_urls();
        tracing::debug!(
            target_name = %report.target_name,
            citations = grounding.len(),
            "report: decoded"
        );
        Ok(report.with_grounding_sources(grounding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;

    #[tokio::test]
    async fn blank_query_sends_nothing() {
        let stub = StubTransport::new();
        let generator = ReportGenerator::new(stub.clone());
        let err = generator.generate("   ", "key").await.unwrap_err();
        assert!(matches!(err, GenerationError::EmptyQuery));
        assert_eq!(stub.request_count(), 0);
    }

    #[test]
    fn request_enables_search_grounding() {
        let req = ReportGenerator::<StubTransport>::request_for("Nestlé");
        assert!(req.has_search_grounding());
        assert_eq!(req.contents.len(), 1);
        assert!(req.contents[0].text().contains("\"Nestlé\""));
    }
}
