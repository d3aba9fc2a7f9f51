//! # gt-app
//!
//! Application state for GhostTrace, independent of any particular front end.
//!
//! - [`ViewController`]: the home / history / report state machine. It owns
//!   the current query and the report sub-state (loading, error, or data) and
//!   drives report generation and history bookkeeping.
//! - [`ChatPanel`]: one follow-up conversation about a report.
//! - [`ConnectivityMonitor`]: online/offline indicator with scoped
//!   subscriptions.

mod chat_panel;
mod connectivity;
mod controller;
mod error;

pub use chat_panel::{ChatPanel, PendingQuestion, greeting};
pub use connectivity::ConnectivityMonitor;
pub use controller::{ReportState, Ticket, ViewController};
pub use error::AppError;
