//! The current session, shared explicitly with whoever needs it.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use gt_core::{Subscribers, Subscription};

use crate::auth::Session;
use crate::client::SupabaseClient;
use crate::error::AuthError;

/// A change to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn(Session),
    TokenRefreshed(Session),
    SignedOut,
}

impl AuthEvent {
    /// The session after the change, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(s) | Self::TokenRefreshed(s) => Some(s),
            Self::SignedOut => None,
        }
    }
}

/// Holds the current session and notifies subscribers when it changes.
///
/// Clones share the same session and subscriber set.
#[derive(Clone, Default)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
    subscribers: Subscribers<AuthEvent>,
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("user_id", &self.user_id())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context that starts signed in, without notifying anyone.
    #[must_use]
    pub fn with_session(session: Session) -> Self {
        let ctx = Self::default();
        *ctx.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        ctx
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.current().map(|s| s.user.id)
    }

    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.current().map(|s| s.access_token)
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Register `callback` for session changes until the guard drops.
    #[must_use = "dropping the subscription immediately unsubscribes"]
    pub fn on_change<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&AuthEvent) + Send + Sync + 'static,
    {
        self.subscribers.subscribe(callback)
    }

    pub fn sign_in(&self, session: Session) {
        self.replace(Some(session.clone()));
        self.subscribers.notify(&AuthEvent::SignedIn(session));
    }

    pub fn refreshed(&self, session: Session) {
        self.replace(Some(session.clone()));
        self.subscribers.notify(&AuthEvent::TokenRefreshed(session));
    }

    /// Clear the session. Subscribers hear about it only if one was set.
    pub fn sign_out(&self) {
        if self.replace(None).is_some() {
            self.subscribers.notify(&AuthEvent::SignedOut);
        }
    }

    /// Refresh the session through `client` when it is about to expire.
    ///
    /// Returns the (possibly new) session, or `None` when signed out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::SessionExpired`] if the refresh is rejected; the
    /// context is signed out in that case.
    pub async fn ensure_fresh(&self, client: &SupabaseClient) -> Result<Option<Session>, AuthError> {
        let Some(session) = self.current() else {
            return Ok(None);
        };
        if !session.needs_refresh(Utc::now()) {
            return Ok(Some(session));
        }
        match client.refresh_session(&session.refresh_token).await {
            Ok(fresh) => {
                self.refreshed(fresh.clone());
                Ok(Some(fresh))
            }
            Err(AuthError::Rejected(message)) => {
                tracing::warn!(%message, "session refresh rejected");
                self.sign_out();
                Err(AuthError::SessionExpired)
            }
            Err(other) => Err(other),
        }
    }

    fn replace(&self, session: Option<Session>) -> Option<Session> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use std::sync::Mutex;

    fn session(id: &str) -> Session {
        Session {
            access_token: format!("at-{id}"),
            refresh_token: format!("rt-{id}"),
            expires_at: Utc::now() + chrono::Duration::hours(1),
            user: AuthUser {
                id: id.into(),
                email: None,
            },
        }
    }

    #[test]
    fn subscribers_see_sign_in_and_out() {
        let ctx = SessionContext::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = ctx.on_change(move |event| {
            sink.lock().unwrap().push(event.session().map(|s| s.user.id.clone()));
        });

        ctx.sign_in(session("u-1"));
        ctx.sign_out();
        ctx.sign_out();

        assert_eq!(*seen.lock().unwrap(), vec![Some("u-1".to_string()), None]);
        assert!(!ctx.is_signed_in());
    }

    #[test]
    fn dropped_subscription_stops_notifications() {
        let ctx = SessionContext::new();
        let count = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&count);
        let sub = ctx.on_change(move |_| *sink.lock().unwrap() += 1);

        ctx.sign_in(session("u-1"));
        sub.unsubscribe();
        ctx.sign_in(session("u-2"));

        assert_eq!(*count.lock().unwrap(), 1);
        assert_eq!(ctx.user_id().as_deref(), Some("u-2"));
    }

    #[test]
    fn clones_share_state() {
        let ctx = SessionContext::with_session(session("u-1"));
        let other = ctx.clone();
        other.sign_out();
        assert!(ctx.current().is_none());
    }

    #[test]
    fn debug_omits_tokens() {
        let ctx = SessionContext::with_session(session("u-1"));
        let dbg = format!("{ctx:?}");
        assert!(dbg.contains("u-1"));
        assert!(!dbg.contains("at-u-1"));
    }
}
