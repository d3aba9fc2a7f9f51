//! Per-user investigation history.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use gt_core::{HistoryEntry, NewHistoryEntry};
use reqwest::Method;

use crate::client::SupabaseClient;
use crate::error::BackendError;
use crate::http::check_response;
use crate::session::SessionContext;

/// Append-and-list store for history entries.
///
/// `list` returns entries newest first, so an entry appended and then listed
/// by the same user comes back at index 0.
pub trait HistoryStore: Send + Sync {
    fn insert(&self, entry: &NewHistoryEntry) -> impl Future<Output = Result<(), BackendError>> + Send;

    fn list(&self, user_id: &str) -> impl Future<Output = Result<Vec<HistoryEntry>, BackendError>> + Send;
}

// ── Supabase ───────────────────────────────────────────────────────

/// History rows in the configured Supabase table, written and read as the
/// signed-in user.
#[derive(Debug, Clone)]
pub struct SupabaseHistory {
    client: SupabaseClient,
    session: SessionContext,
}

impl SupabaseHistory {
    #[must_use]
    pub const fn new(client: SupabaseClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    fn access_token(&self) -> Result<String, BackendError> {
        self.session
            .access_token()
            .ok_or(BackendError::NotAuthenticated)
    }

    fn list_url(&self, user_id: &str) -> String {
        format!(
            "{}?select=*&user_id=eq.{}&order=created_at.desc",
            self.client.rest_url(self.client.history_table()),
            urlencoding::encode(user_id)
        )
    }
}

impl HistoryStore for SupabaseHistory {
    async fn insert(&self, entry: &NewHistoryEntry) -> Result<(), BackendError> {
        let token = self.access_token()?;
        let url = self.client.rest_url(self.client.history_table());
        let resp = self
            .client
            .request(Method::POST, &url, Some(&token))
            .header("Prefer", "return=minimal")
            .json(entry)
            .send()
            .await?;
        check_response(resp).await?;
        tracing::debug!(query = %entry.query, "history: inserted");
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<HistoryEntry>, BackendError> {
        let token = self.access_token()?;
        let resp = self
            .client
            .request(Method::GET, &self.list_url(user_id), Some(&token))
            .send()
            .await?;
        let entries: Vec<HistoryEntry> = check_response(resp).await?.json().await?;
        tracing::debug!(count = entries.len(), "history: listed");
        Ok(entries)
    }
}

// ── In-memory ──────────────────────────────────────────────────────

/// Process-local history, used offline and in tests. Clones share entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl MemoryHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with an explicit timestamp.
    pub fn insert_at(&self, entry: &NewHistoryEntry, created_at: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let id = i64::try_from(entries.len()).unwrap_or(i64::MAX).saturating_add(1);
        entries.push(HistoryEntry {
            id: Some(id),
            user_id: entry.user_id.clone(),
            query: entry.query.clone(),
            created_at,
        });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoryStore for MemoryHistory {
    async fn insert(&self, entry: &NewHistoryEntry) -> Result<(), BackendError> {
        self.insert_at(entry, Utc::now());
        Ok(())
    }

    async fn list(&self, user_id: &str) -> Result<Vec<HistoryEntry>, BackendError> {
        let mut entries: Vec<HistoryEntry> = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        // Later ids break created_at ties.
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(entries)
    }
}
