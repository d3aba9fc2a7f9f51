//! # gt-core
//!
//! Core types shared by every GhostTrace crate:
//! - The report data model (`OsintReport` and its nested records)
//! - Chat and search-history records
//! - View enums with state machine transitions
//! - Cross-cutting error types
//! - Scoped change subscriptions (`Subscribers` / `Subscription`)

pub mod entities;
pub mod enums;
pub mod errors;
pub mod subscription;

pub use entities::{
    ChatMessage, ChatTurn, Connection, HistoryEntry, KeyStat, NewHistoryEntry, OsintReport,
    TimelineEvent,
};
pub use enums::{ChatRole, EntityType, NodeStatus, Trend, ViewKind};
pub use errors::CoreError;
pub use subscription::{Subscribers, Subscription};
