use gt_config::ConfigError;
use thiserror::Error;

/// Account operation failures. Backend messages are carried verbatim so the
/// auth form can show exactly what Supabase said.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the request; the message is the backend's own.
    #[error("{0}")]
    Rejected(String),

    /// The site registration password check returned false.
    #[error("Invalid site registration password.")]
    InvalidSitePassword,

    #[error("not signed in, run `gtrace auth login`")]
    NotAuthenticated,

    #[error("session expired, run `gtrace auth login`")]
    SessionExpired,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("credential store error: {0}")]
    Store(String),
}

/// History and data API failures.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the data API.
    #[error("backend error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("not signed in, run `gtrace auth login`")]
    NotAuthenticated,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Http(e) => Self::Http(e),
            BackendError::Api { message, .. } => Self::Rejected(message),
            BackendError::NotAuthenticated => Self::NotAuthenticated,
            BackendError::Config(e) => Self::Config(e),
        }
    }
}
