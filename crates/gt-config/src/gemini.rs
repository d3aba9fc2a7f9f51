//! Gemini (LLM provider) configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    /// API key. When empty, the locally stored key is used instead.
    #[serde(default)]
    pub api_key: String,

    /// Model identifier used for both report generation and chat.
    #[serde(default = "default_model")]
    pub model: String,

    /// REST base URL (without trailing slash).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GeminiConfig {
    /// Whether an API key is present in configuration.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Check the fields that must hold regardless of where the key comes from.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty model, a non-HTTP
    /// base URL, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "gemini.model".into(),
                reason: "must not be empty".into(),
            });
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "gemini.base_url".into(),
                reason: format!("'{}' is not an http(s) URL", self.base_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "gemini.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GeminiConfig::default();
        assert!(!config.is_configured());
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout_secs, 120);
    }

    #[test]
    fn rejects_bad_base_url() {
        let config = GeminiConfig {
            base_url: "generativelanguage.googleapis.com".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = GeminiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
