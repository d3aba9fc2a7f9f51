//! Terminal rendering of chat messages.

use gt_core::{ChatMessage, ChatRole};

use crate::style::{Style, wrap};

/// One message as an indented block under a role label.
#[must_use]
pub fn render_message(message: &ChatMessage, style: Style, width: usize) -> String {
    let label = match message.role {
        ChatRole::User => style.bold("you ›"),
        ChatRole::Model => style.cyan(&style.bold("ghosttrace ›")),
    };
    let mut out = label;
    out.push('\n');
    for paragraph in message.content.lines() {
        if paragraph.trim().is_empty() {
            out.push('\n');
            continue;
        }
        for line in wrap(paragraph, width.saturating_sub(2)) {
            out.push_str("  ");
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

/// Placeholder shown while an answer is pending.
#[must_use]
pub fn typing_indicator(style: Style) -> String {
    style.dim("ghosttrace is typing …")
}
