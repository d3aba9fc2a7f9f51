//! # gt-backend
//!
//! Supabase-backed accounts and search history for GhostTrace.
//!
//! - [`SupabaseClient`]: auth endpoints (sign-up gated by the site
//!   registration password, password sign-in, refresh, sign-out).
//! - [`SessionContext`]: the current session, passed explicitly to whatever
//!   needs it, with `on_change` subscriptions instead of ambient global state.
//! - [`HistoryStore`]: append and list investigation queries, implemented by
//!   [`SupabaseHistory`] and the in-process [`MemoryHistory`].
//! - [`secret_store`]: keyring → env → file storage for the persisted session
//!   and the Gemini API key.

mod auth;
mod client;
mod error;
mod history;
mod http;
pub mod secret_store;
mod session;

pub use auth::{AuthUser, Session, SignUpOutcome};
pub use client::SupabaseClient;
pub use error::{AuthError, BackendError};
pub use history::{HistoryStore, MemoryHistory, SupabaseHistory};
pub use session::{AuthEvent, SessionContext};
