use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read GhostTrace configuration: {0}")]
    Figment(#[from] figment::Error),

    /// Set `GHOSTTRACE_<SECTION>__*` or the `[section]` table to enable it.
    #[error("[{section}] is not configured; set it in config.toml or via GHOSTTRACE_ env vars")]
    NotConfigured { section: String },

    #[error("{field} is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}
