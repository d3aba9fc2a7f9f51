//! Supabase REST client: endpoint layout and common headers.

use std::time::Duration;

use gt_config::SupabaseConfig;
use reqwest::{Method, RequestBuilder};

use crate::error::BackendError;

/// Thin client over the Supabase auth (`/auth/v1`) and data (`/rest/v1`)
/// APIs. Every request carries the anon key as `apikey`; authenticated
/// requests add the user's access token as the bearer.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    history_table: String,
    site_password_rpc: String,
}

impl SupabaseClient {
    /// Build a client from the `[supabase]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Config`] when the URL or anon key is missing,
    /// or [`BackendError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &SupabaseConfig) -> Result<Self, BackendError> {
        let config = config.require()?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("ghosttrace/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            anon_key: config.anon_key.clone(),
            history_table: config.history_table.clone(),
            site_password_rpc: config.site_password_rpc.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn history_table(&self) -> &str {
        &self.history_table
    }

    #[must_use]
    pub fn site_password_rpc(&self) -> &str {
        &self.site_password_rpc
    }

    pub(crate) fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    pub(crate) fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{path}", self.base_url)
    }

    /// Start a request with `apikey` set and the bearer set to `access_token`
    /// (or the anon key for anonymous calls).
    pub(crate) fn request(&self, method: Method, url: &str, access_token: Option<&str>) -> RequestBuilder {
        let bearer = access_token.unwrap_or(&self.anon_key);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SupabaseConfig {
        SupabaseConfig {
            url: "https://abcd.supabase.co/".into(),
            anon_key: "anon".into(),
            ..Default::default()
        }
    }

    #[test]
    fn unconfigured_backend_is_rejected() {
        let err = SupabaseClient::from_config(&SupabaseConfig::default()).unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }

    #[test]
    fn urls_are_rooted_at_project() {
        let client = SupabaseClient::from_config(&config()).unwrap();
        assert_eq!(client.auth_url("signup"), "https://abcd.supabase.co/auth/v1/signup");
        assert_eq!(
            client.rest_url("search_history"),
            "https://abcd.supabase.co/rest/v1/search_history"
        );
        assert_eq!(client.history_table(), "search_history");
        assert_eq!(client.site_password_rpc(), "verify_site_password");
    }
}
