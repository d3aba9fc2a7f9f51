//! # gt-render
//!
//! Pure renderers over the report data model. Nothing here touches the
//! network or any shared state; every function maps its inputs to a string.
//!
//! - [`dashboard`]: the terminal report view.
//! - [`graph`]: relationship graph model and SVG output.
//! - [`print`]: standalone printable HTML for dossiers and chat transcripts.
//! - [`manual`]: the field manual.

pub mod chat;
pub mod dashboard;
pub mod graph;
mod html;
pub mod manual;
pub mod print;
pub mod risk;
pub mod style;

pub use dashboard::{DashboardOptions, render_dashboard};
pub use graph::{GraphEdge, GraphModel, GraphNode};
pub use print::{PrintMeta, render_dossier_html, render_transcript_html};
pub use risk::RiskLevel;
pub use style::Style;
