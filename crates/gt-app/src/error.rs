use gt_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The question was empty or whitespace-only.
    #[error("question must not be empty")]
    EmptyQuestion,

    /// A previous question is still being answered.
    #[error("an answer is still pending")]
    AnswerPending,

    /// No history entry at that position.
    #[error("no history entry #{0}")]
    NoSuchHistoryEntry(usize),

    #[error(transparent)]
    Core(#[from] CoreError),
}
