//! One follow-up conversation about a report.

use gt_core::{ChatMessage, ChatTurn, OsintReport};
use gt_llm::{ChatClient, LlmTransport};

use crate::error::AppError;

/// Opening message from the model.
#[must_use]
pub fn greeting(target: &str) -> String {
    format!(
        "I've analyzed the data for {target}. What specific details or connections would you like to explore further?"
    )
}

/// A question accepted by [`ChatPanel::begin`] and awaiting its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuestion {
    /// Conversation before the question, as replayed to the model.
    pub history: Vec<ChatTurn>,
    pub question: String,
}

/// Append-only conversation with at most one unanswered question.
#[derive(Debug)]
pub struct ChatPanel<T> {
    client: ChatClient<T>,
    report: OsintReport,
    api_key: String,
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl<T: LlmTransport> ChatPanel<T> {
    /// Open a panel for `report`, starting with the model's greeting.
    #[must_use]
    pub fn new(client: ChatClient<T>, report: OsintReport, api_key: impl Into<String>) -> Self {
        let messages = vec![ChatMessage::model(greeting(&report.target_name))];
        Self {
            client,
            report,
            api_key: api_key.into(),
            messages,
            pending: false,
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub const fn report(&self) -> &OsintReport {
        &self.report
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Accept `question`: append it and mark an answer as pending.
    ///
    /// # Errors
    ///
    /// [`AppError::EmptyQuestion`] for a blank question and
    /// [`AppError::AnswerPending`] while a previous answer is outstanding.
    pub fn begin(&mut self, question: &str) -> Result<PendingQuestion, AppError> {
        if question.trim().is_empty() {
            return Err(AppError::EmptyQuestion);
        }
        if self.pending {
            return Err(AppError::AnswerPending);
        }
        let history = self.messages.iter().map(ChatTurn::from).collect();
        self.messages.push(ChatMessage::user(question));
        self.pending = true;
        Ok(PendingQuestion {
            history,
            question: question.to_string(),
        })
    }

    /// Append the model's answer and clear the pending flag.
    pub fn finish(&mut self, answer: impl Into<String>) -> &ChatMessage {
        self.pending = false;
        self.messages.push(ChatMessage::model(answer));
        &self.messages[self.messages.len() - 1]
    }

    /// Ask `question` and append the answer. Upstream failures become the
    /// connection-error message rather than an error.
    ///
    /// # Errors
    ///
    /// See [`Self::begin`].
    pub async fn ask(&mut self, question: &str) -> Result<&ChatMessage, AppError> {
        let pending = self.begin(question)?;
        let answer = self
            .client
            .ask_or_fallback(&pending.history, &pending.question, &self.report, &self.api_key)
            .await;
        Ok(self.finish(answer))
    }
}
