//! Account operations: gated sign-up, sign-in, refresh, sign-out.

use chrono::{DateTime, Duration, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::client::SupabaseClient;
use crate::error::AuthError;
use crate::http::check_response;

/// Refresh this long before the access token actually expires.
const EXPIRY_LEEWAY_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A signed-in session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub user: AuthUser,
}

impl Session {
    /// Whether the access token expires within the refresh leeway of `now`.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_LEEWAY_SECS) <= now
    }

    /// Parse a GoTrue token response.
    fn from_token_response(value: &Value, now: DateTime<Utc>) -> Option<Self> {
        let access_token = value["access_token"].as_str()?.to_string();
        let refresh_token = value["refresh_token"].as_str().unwrap_or_default().to_string();
        let expires_at = value["expires_at"]
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .or_else(|| {
                value["expires_in"]
                    .as_i64()
                    .map(|secs| now + Duration::seconds(secs))
            })
            .unwrap_or(now);
        let user: AuthUser = serde_json::from_value(value["user"].clone()).ok()?;
        Some(Self {
            access_token,
            refresh_token,
            expires_at,
            user,
        })
    }
}

/// Result of a successful sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    /// The project auto-confirms accounts; the user is signed in.
    SignedIn(Session),
    /// A confirmation email was sent; sign in after confirming.
    ConfirmationRequired { email: String },
}

impl SupabaseClient {
    /// Check the site registration password with the configured RPC.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the call fails; a wrong password is `Ok(false)`.
    pub async fn verify_site_password(&self, attempt: &str) -> Result<bool, AuthError> {
        let url = self.rest_url(&format!("rpc/{}", self.site_password_rpc()));
        let resp = self
            .request(Method::POST, &url, None)
            .json(&json!({ "attempt": attempt }))
            .send()
            .await?;
        let resp = check_response(resp).await?;
        let value: Value = resp.json().await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Create an account, after the site registration password check passes.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidSitePassword`] if the site password is wrong; no
    ///   account request is made.
    /// - [`AuthError::Rejected`] with the backend's message otherwise.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        site_password: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        if !self.verify_site_password(site_password).await? {
            tracing::debug!("auth: site password rejected");
            return Err(AuthError::InvalidSitePassword);
        }

        let resp = self
            .request(Method::POST, &self.auth_url("signup"), None)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let value: Value = check_response(resp).await?.json().await?;

        if let Some(session) = Session::from_token_response(&value, Utc::now()) {
            tracing::info!(user_id = %session.user.id, "auth: signed up");
            return Ok(SignUpOutcome::SignedIn(session));
        }
        let email = value["email"]
            .as_str()
            .or_else(|| value["user"]["email"].as_str())
            .unwrap_or(email)
            .to_string();
        Ok(SignUpOutcome::ConfirmationRequired { email })
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] with the backend's message (for example
    /// "Invalid login credentials").
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        self.token_grant("password", &json!({ "email": email, "password": password }))
            .await
    }

    /// Exchange a refresh token for a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] when the refresh token is no longer valid.
    pub async fn refresh_session(&self, refresh_token: &str) -> Result<Session, AuthError> {
        self.token_grant("refresh_token", &json!({ "refresh_token": refresh_token }))
            .await
    }

    /// Revoke the session server-side.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError`] if the call fails.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let resp = self
            .request(Method::POST, &self.auth_url("logout"), Some(access_token))
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }

    async fn token_grant(&self, grant_type: &str, body: &Value) -> Result<Session, AuthError> {
        let url = format!(
            "{}?grant_type={}",
            self.auth_url("token"),
            urlencoding::encode(grant_type)
        );
        let resp = self.request(Method::POST, &url, None).json(body).send().await?;
        let value: Value = check_response(resp).await?.json().await?;
        let session = Session::from_token_response(&value, Utc::now())
            .ok_or_else(|| AuthError::Rejected("malformed session response".into()))?;
        tracing::debug!(user_id = %session.user.id, grant_type, "auth: session issued");
        Ok(session)
    }
}
