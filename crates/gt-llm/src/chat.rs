//! Follow-up questions answered from a single report.

use gt_core::{ChatTurn, OsintReport};

use crate::error::ChatError;
use crate::prompt::chat_instruction;
use crate::transport::LlmTransport;
use crate::wire::{Content, GenerateContentRequest};

/// Shown when the model answers with no text.
pub const EMPTY_REPLY: &str = "I couldn't generate a response based on the current context.";

/// Shown in place of an answer when the model call fails.
pub const CONNECTION_ERROR_REPLY: &str = "Connection error. Unable to query intelligence database.";

/// Answers follow-up questions with the report as the only context.
#[derive(Debug, Clone)]
pub struct ChatClient<T> {
    transport: T,
}

impl<T: LlmTransport> ChatClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Build the request: dossier as system instruction, prior turns replayed
    /// in order, then `question` as the newest user turn.
    #[must_use]
    pub fn request_for(history: &[ChatTurn], question: &str, report: &OsintReport) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history.iter().map(Content::from).collect();
        contents.push(Content::user(question.trim()));
        GenerateContentRequest {
            contents,
            system_instruction: Some(Content::instruction(chat_instruction(report))),
            tools: Vec::new(),
            generation_config: None,
        }
    }

    /// Ask `question` about `report`, given the prior conversation.
    ///
    /// Returns the model's reply verbatim, or [`EMPTY_REPLY`] when the model
    /// returns no text.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::EmptyQuestion`] for a blank question and
    /// [`ChatError::Upstream`] when the model call fails.
    pub async fn ask(
        &self,
        history: &[ChatTurn],
        question: &str,
        report: &OsintReport,
        api_key: &str,
    ) -> Result<String, ChatError> {
        if question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        let request = Self::request_for(history, question, report);
        let response = self.transport.generate_content(api_key, &request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            tracing::debug!(turns = history.len(), "chat: empty reply");
            return Ok(EMPTY_REPLY.to_string());
        }
        Ok(text)
    }

    /// Like [`ask`](Self::ask), but a failed call becomes
    /// [`CONNECTION_ERROR_REPLY`] so callers always have something to show.
    pub async fn ask_or_fallback(
        &self,
        history: &[ChatTurn],
        question: &str,
        report: &OsintReport,
        api_key: &str,
    ) -> String {
        match self.ask(history, question, report, api_key).await {
            Ok(reply) => reply,
            Err(error) => {
                tracing::warn!(%error, "chat: falling back");
                CONNECTION_ERROR_REPLY.to_string()
            }
        }
    }
}
