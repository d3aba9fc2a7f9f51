//! Supabase (backend-as-a-service) configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_history_table() -> String {
    "search_history".to_string()
}

fn default_site_password_rpc() -> String {
    "verify_site_password".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    #[serde(default)]
    pub url: String,

    /// Public anon key sent as `apikey` on every request.
    #[serde(default)]
    pub anon_key: String,

    /// Table holding `{user_id, query, created_at}` rows.
    #[serde(default = "default_history_table")]
    pub history_table: String,

    /// RPC that checks the site registration password before sign-up.
    #[serde(default = "default_site_password_rpc")]
    pub site_password_rpc: String,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            history_table: default_history_table(),
            site_password_rpc: default_site_password_rpc(),
        }
    }
}

impl SupabaseConfig {
    /// Check if the URL and anon key are both set.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    /// Return `self` if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when URL or anon key is missing.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(ConfigError::NotConfigured {
                section: "supabase".into(),
            })
        }
    }

    /// Project URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = SupabaseConfig::default();
        assert!(!config.is_configured());
        assert!(config.require().is_err());
        assert_eq!(config.history_table, "search_history");
    }

    #[test]
    fn configured_when_url_and_key_set() {
        let config = SupabaseConfig {
            url: "https://abcd.supabase.co/".into(),
            anon_key: "anon".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
        assert_eq!(config.base_url(), "https://abcd.supabase.co");
    }

    #[test]
    fn not_configured_without_key() {
        let config = SupabaseConfig {
            url: "https://abcd.supabase.co".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
