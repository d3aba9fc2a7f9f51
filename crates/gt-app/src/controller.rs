//! Home / history / report state machine.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use gt_backend::{HistoryStore, SessionContext};
use gt_core::{CoreError, HistoryEntry, NewHistoryEntry, OsintReport, Subscription, ViewKind};
use gt_llm::{GenerationError, LlmTransport, ReportGenerator};

use crate::error::AppError;

/// Report sub-state. At most one of loading, error, or data is held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportState {
    #[default]
    Idle,
    Loading,
    Error(String),
    Data(Box<OsintReport>),
}

impl ReportState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn report(&self) -> Option<&OsintReport> {
        match self {
            Self::Data(report) => Some(report),
            _ => None,
        }
    }
}

/// Identifies one submission. Only the latest ticket may complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Owns the current view, query, report sub-state, and the history list.
pub struct ViewController<T, H> {
    generator: ReportGenerator<T>,
    history: H,
    session: SessionContext,
    api_key: String,

    view: ViewKind,
    query: String,
    report: ReportState,
    entries: Vec<HistoryEntry>,

    issued: u64,
    current: Option<Ticket>,
    history_stale: Arc<AtomicBool>,
}

impl<T, H> std::fmt::Debug for ViewController<T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewController")
            .field("view", &self.view)
            .field("query", &self.query)
            .field("report", &self.report)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<T: LlmTransport, H: HistoryStore> ViewController<T, H> {
    #[must_use]
    pub fn new(generator: ReportGenerator<T>, history: H, session: SessionContext, api_key: impl Into<String>) -> Self {
        Self {
            generator,
            history,
            session,
            api_key: api_key.into(),
            view: ViewKind::Home,
            query: String::new(),
            report: ReportState::Idle,
            entries: Vec::new(),
            issued: 0,
            current: None,
            history_stale: Arc::new(AtomicBool::new(true)),
        }
    }

    #[must_use]
    pub const fn view(&self) -> ViewKind {
        self.view
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn report_state(&self) -> &ReportState {
        &self.report
    }

    #[must_use]
    pub fn history_entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn generator(&self) -> &ReportGenerator<T> {
        &self.generator
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    fn go(&mut self, to: ViewKind) -> Result<(), CoreError> {
        if self.view != to && !self.view.can_transition_to(to) {
            return Err(CoreError::InvalidTransition { from: self.view, to });
        }
        self.view = to;
        Ok(())
    }

    /// Start a submission: enter `report[loading]` and return its ticket.
    ///
    /// A blank query is a no-op and returns `None`.
    pub fn begin(&mut self, query: &str) -> Option<Ticket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        if let Err(error) = self.go(ViewKind::Report) {
            tracing::warn!(%error, "submit ignored");
            return None;
        }
        self.issued += 1;
        let ticket = Ticket(self.issued);
        if let Some(previous) = self.current.replace(ticket) {
            tracing::debug!(?previous, ?ticket, "superseding in-flight generation");
        }
        self.query = query.to_string();
        self.report = ReportState::Loading;
        Some(ticket)
    }

    /// Apply the outcome of `ticket`'s generation.
    ///
    /// A ticket that is no longer current (superseded, or the controller was
    /// reset) is discarded and `false` is returned. On success the query is
    /// appended to history and the history list re-read.
    pub async fn complete(&mut self, ticket: Ticket, result: Result<OsintReport, GenerationError>) -> bool {
        if self.current != Some(ticket) {
            tracing::debug!(?ticket, current = ?self.current, "discarding stale generation result");
            return false;
        }
        self.current = None;
        match result {
            Ok(report) => {
                self.report = ReportState::Data(Box::new(report));
                self.record_history().await;
            }
            Err(error) => {
                tracing::debug!(%error, "generation failed");
                self.report = ReportState::Error(error.to_string());
            }
        }
        true
    }

    /// Submit `query` and drive it to completion.
    ///
    /// Returns `false` without issuing a request for a blank query.
    pub async fn submit(&mut self, query: &str) -> bool {
        let Some(ticket) = self.begin(query) else {
            return false;
        };
        let result = self.generator.generate(&self.query, &self.api_key).await;
        self.complete(ticket, result).await
    }

    /// Re-run the history entry at `index` (as listed, newest first).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoSuchHistoryEntry`] for an out-of-range index.
    pub async fn rerun(&mut self, index: usize) -> Result<bool, AppError> {
        let query = self
            .entries
            .get(index)
            .map(|e| e.query.clone())
            .ok_or(AppError::NoSuchHistoryEntry(index))?;
        Ok(self.submit(&query).await)
    }

    /// Return to `home`, clearing the query and report state. Any in-flight
    /// generation becomes stale.
    pub fn reset(&mut self) {
        self.view = ViewKind::Home;
        self.query.clear();
        self.report = ReportState::Idle;
        self.current = None;
    }

    /// Navigate to the history view.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] if not allowed from here.
    pub fn open_history(&mut self) -> Result<(), CoreError> {
        self.go(ViewKind::History)
    }

    /// Leave the history view for `home`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTransition`] when not in the history view.
    pub fn close_history(&mut self) -> Result<(), CoreError> {
        if self.view != ViewKind::History {
            return Err(CoreError::InvalidTransition {
                from: self.view,
                to: ViewKind::Home,
            });
        }
        self.go(ViewKind::Home)
    }

    /// Re-read history for the signed-in user. Failures are logged and the
    /// previous list is kept; signed out clears the list.
    pub async fn refresh_history(&mut self) {
        self.history_stale.store(false, Ordering::SeqCst);
        let Some(user_id) = self.session.user_id() else {
            self.entries.clear();
            return;
        };
        match self.history.list(&user_id).await {
            Ok(entries) => self.entries = entries,
            Err(error) => tracing::warn!(%error, "history refresh failed"),
        }
    }

    /// Mark history stale whenever the session changes. Keep the guard for as
    /// long as the controller should react to sign-in and sign-out.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn watch_session(&self) -> Subscription {
        let stale = Arc::clone(&self.history_stale);
        self.session.on_change(move |_| stale.store(true, Ordering::SeqCst))
    }

    #[must_use]
    pub fn history_is_stale(&self) -> bool {
        self.history_stale.load(Ordering::SeqCst)
    }

    /// Refresh history if the session changed since the last read.
    pub async fn sync_history(&mut self) {
        if self.history_is_stale() {
            self.refresh_history().await;
        }
    }

    async fn record_history(&mut self) {
        let Some(user_id) = self.session.user_id() else {
            return;
        };
        let entry = NewHistoryEntry {
            user_id,
            query: self.query.clone(),
        };
        if let Err(error) = self.history.insert(&entry).await {
            tracing::warn!(%error, "failed to record history");
            return;
        }
        self.refresh_history().await;
    }
}
