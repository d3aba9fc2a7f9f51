//! Entity kinds, trends, chat roles, and view states for GhostTrace.
//!
//! Serialized spellings match what the language model is told to emit
//! (`Individual`, `up`, `model`, ...). `ViewKind` carries its allowed
//! transitions so the controller can reject illegal navigation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// The kind of subject a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum EntityType {
    Individual,
    Company,
    Unknown,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Company => "Company",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Direction indicator attached to a key statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChatRole
// ---------------------------------------------------------------------------

/// Author of a chat message. `Model` is the wire name the LLM API expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ViewKind
// ---------------------------------------------------------------------------

/// Top-level screen of the application.
///
/// ```text
/// home ──submit──→ report ──reset──→ home
///   │                │
///   └──→ history ←───┘
///          │ close → home
///          └ rerun → report
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    Home,
    History,
    Report,
}

impl ViewKind {
    /// Valid next views from the current view.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Home => &[Self::Report, Self::History],
            Self::History => &[Self::Home, Self::Report, Self::History],
            Self::Report => &[Self::Home, Self::History, Self::Report],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::History => "history",
            Self::Report => "report",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NodeStatus
// ---------------------------------------------------------------------------

/// Network connectivity as shown by the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Online,
    Offline,
}

impl NodeStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ViewKind::Home, ViewKind::Report, true)]
    #[case(ViewKind::Home, ViewKind::History, true)]
    #[case(ViewKind::Home, ViewKind::Home, false)]
    #[case(ViewKind::History, ViewKind::Home, true)]
    #[case(ViewKind::Report, ViewKind::Home, true)]
    #[case(ViewKind::Report, ViewKind::History, true)]
    fn view_transitions(#[case] from: ViewKind, #[case] to: ViewKind, #[case] allowed: bool) {
        assert_eq!(from.can_transition_to(to), allowed);
    }

    #[rstest]
    #[case(r#""Individual""#, EntityType::Individual)]
    #[case(r#""Company""#, EntityType::Company)]
    #[case(r#""Unknown""#, EntityType::Unknown)]
    fn entity_type_wire_names(#[case] json: &str, #[case] expected: EntityType) {
        let parsed: EntityType = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(serde_json::to_string(&expected).unwrap(), json);
    }

    #[test]
    fn entity_type_rejects_lowercase() {
        assert!(serde_json::from_str::<EntityType>(r#""company""#).is_err());
    }

    #[test]
    fn trend_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Neutral).unwrap(), r#""neutral""#);
        assert_eq!(Trend::Up.to_string(), "up");
    }
}
