//! Entity structs for the GhostTrace domain.
//!
//! Report structs serialize with `camelCase` keys, which is the shape the
//! language model is instructed to emit. All structs derive `JsonSchema` so the
//! decode step can validate untrusted model output before deserializing it.

mod chat;
mod history;
mod report;

pub use chat::{ChatMessage, ChatTurn};
pub use history::{HistoryEntry, NewHistoryEntry};
pub use report::{Connection, KeyStat, OsintReport, TimelineEvent};
