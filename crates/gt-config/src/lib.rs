//! # gt-config
//!
//! Layered configuration loading for GhostTrace using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GHOSTTRACE_*` prefix, `__` as separator)
//! 2. Externally supplied overrides (see [`GhostConfig::load_with_env_overrides`])
//! 3. Project-level `.ghosttrace/config.toml`
//! 4. User-level `~/.config/ghosttrace/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GHOSTTRACE_GEMINI__API_KEY` -> `gemini.api_key`,
//! `GHOSTTRACE_SUPABASE__URL` -> `supabase.url`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use gt_config::GhostConfig;
//!
//! let config = GhostConfig::load_with_dotenv().expect("config");
//! if config.supabase.is_configured() {
//!     println!("backend: {}", config.supabase.url);
//! }
//! ```

mod error;
mod gemini;
mod general;
mod supabase;

pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use general::GeneralConfig;
pub use supabase::SupabaseConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment variables.
pub const ENV_PREFIX: &str = "GHOSTTRACE_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GhostConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl GhostConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed or a
    /// value has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env_overrides(&[])
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with extra `GHOSTTRACE_*` style key/value pairs.
    ///
    /// Overrides sit above the TOML files but below the real process
    /// environment, so an explicitly exported variable always wins. Keys
    /// without the `GHOSTTRACE_` prefix are ignored.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_env_overrides(overrides: &[(String, String)]) -> Result<Self, ConfigError> {
        Self::figment_with_overrides(overrides)
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with_overrides(&[])
    }

    fn figment_with_overrides(overrides: &[(String, String)]) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".ghosttrace/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: External overrides
        for (key, value) in overrides {
            if let Some(path) = override_key_path(key) {
                figment = figment.merge(Serialized::default(&path, value));
            }
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ghosttrace").join("config.toml"))
    }
}

/// Map `GHOSTTRACE_GEMINI__API_KEY` to the figment key path `gemini.api_key`.
fn override_key_path(key: &str) -> Option<String> {
    let rest = key.strip_prefix(ENV_PREFIX)?;
    if rest.is_empty() {
        return None;
    }
    Some(
        rest.split("__")
            .map(str::to_ascii_lowercase)
            .collect::<Vec<_>>()
            .join("."),
    )
}
