//! Local credential storage: OS keychain first, then env, then a 0600 file
//! under `~/.ghosttrace/`.
//!
//! Two slots exist: the persisted Supabase session and the Gemini API key.
//! Neither ever leaves this machine except towards its own service.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::Session;
use crate::error::AuthError;

const DEFAULT_KEYRING_SERVICE: &str = "ghosttrace-cli";
const STORE_DIR: &str = ".ghosttrace";

/// Keyring service name. `GHOSTTRACE_KEYRING_SERVICE` overrides it so tests
/// never touch real credentials.
fn keyring_service() -> String {
    std::env::var("GHOSTTRACE_KEYRING_SERVICE").unwrap_or_else(|_| DEFAULT_KEYRING_SERVICE.to_string())
}

/// Where a secret was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretSource {
    Keyring,
    Env,
    Config,
    File,
}

impl SecretSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyring => "keyring",
            Self::Env => "env",
            Self::Config => "config",
            Self::File => "file",
        }
    }
}

impl fmt::Display for SecretSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named secret.
#[derive(Debug, Clone, Copy)]
pub struct SecretSlot {
    keyring_user: &'static str,
    env_var: Option<&'static str>,
    file_name: &'static str,
}

/// The persisted Supabase session (JSON).
pub const SESSION: SecretSlot = SecretSlot {
    keyring_user: "supabase-session",
    env_var: None,
    file_name: "session.json",
};

/// The Gemini API key.
pub const GEMINI_KEY: SecretSlot = SecretSlot {
    keyring_user: "gemini-api-key",
    env_var: Some("GHOSTTRACE_GEMINI__API_KEY"),
    file_name: "gemini_key",
};

impl SecretSlot {
    /// Store in the keychain, falling back to the file.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if both keychain and file storage fail.
    pub fn store(&self, value: &str) -> Result<(), AuthError> {
        match keyring::Entry::new(&keyring_service(), self.keyring_user) {
            Ok(entry) => match entry.set_password(value) {
                Ok(()) => Ok(()),
                Err(error) => {
                    tracing::warn!(%error, slot = self.keyring_user, "keyring store failed; falling back to file");
                    write_secret(&self.default_path()?, value)
                }
            },
            Err(error) => {
                tracing::warn!(%error, slot = self.keyring_user, "keyring unavailable; falling back to file");
                write_secret(&self.default_path()?, value)
            }
        }
    }

    /// Load from keychain, then env, then file.
    #[must_use]
    pub fn load(&self) -> Option<String> {
        self.load_with_source().map(|(value, _)| value)
    }

    #[must_use]
    pub fn load_with_source(&self) -> Option<(String, SecretSource)> {
        if let Some(value) = self.load_keyring() {
            return Some((value, SecretSource::Keyring));
        }
        if let Some(var) = self.env_var
            && let Ok(value) = std::env::var(var)
            && !value.trim().is_empty()
        {
            return Some((value, SecretSource::Env));
        }
        self.default_path()
            .ok()
            .and_then(|path| read_secret(&path))
            .map(|value| (value, SecretSource::File))
    }

    /// Remove from keychain and file.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Store`] if the file exists but cannot be removed.
    pub fn delete(&self) -> Result<(), AuthError> {
        if let Ok(entry) = keyring::Entry::new(&keyring_service(), self.keyring_user) {
            let _ = entry.delete_credential();
        }
        remove_secret(&self.default_path()?)
    }

    fn load_keyring(&self) -> Option<String> {
        let entry = keyring::Entry::new(&keyring_service(), self.keyring_user).ok()?;
        entry.get_password().ok().filter(|v| !v.trim().is_empty())
    }

    fn default_path(&self) -> Result<PathBuf, AuthError> {
        dirs::home_dir()
            .map(|home| self.path_in(&home.join(STORE_DIR)))
            .ok_or_else(|| AuthError::Store("home directory not found, cannot store credentials".into()))
    }

    /// File location of this slot inside `dir`.
    #[must_use]
    pub fn path_in(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name)
    }
}

/// Resolve the Gemini API key: keychain, then the configured value (which
/// already includes `GHOSTTRACE_GEMINI__API_KEY`), then the file.
#[must_use]
pub fn resolve_api_key(configured: &str) -> Option<(String, SecretSource)> {
    if let Some(value) = GEMINI_KEY.load_keyring() {
        return Some((value, SecretSource::Keyring));
    }
    if !configured.trim().is_empty() {
        return Some((configured.trim().to_string(), SecretSource::Config));
    }
    GEMINI_KEY
        .default_path()
        .ok()
        .and_then(|path| read_secret(&path))
        .map(|value| (value, SecretSource::File))
}

/// Persist `session` so the next run starts signed in.
///
/// # Errors
///
/// Returns [`AuthError::Store`] if the session cannot be serialized or stored.
pub fn save_session(session: &Session) -> Result<(), AuthError> {
    let json = serde_json::to_string(session).map_err(|e| AuthError::Store(e.to_string()))?;
    SESSION.store(&json)
}

/// Load the persisted session. A corrupt entry is ignored.
#[must_use]
pub fn load_session() -> Option<Session> {
    let raw = SESSION.load()?;
    match serde_json::from_str(&raw) {
        Ok(session) => Some(session),
        Err(error) => {
            tracing::warn!(%error, "ignoring unreadable stored session");
            None
        }
    }
}

/// Forget the persisted session.
///
/// # Errors
///
/// Returns [`AuthError::Store`] if the session file cannot be removed.
pub fn clear_session() -> Result<(), AuthError> {
    SESSION.delete()
}

// --- File helpers ---

pub(crate) fn write_secret(path: &Path, value: &str) -> Result<(), AuthError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::Store(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }
    fs::write(path, value).map_err(|e| AuthError::Store(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::Store(format!("chmod {}: {e}", path.display())))?;
    }
    Ok(())
}

pub(crate) fn read_secret(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub(crate) fn remove_secret(path: &Path) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path)
            .map_err(|e| AuthError::Store(format!("failed to delete {}: {e}", path.display())))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_paths() {
        let dir = Path::new("/home/analyst/.ghosttrace");
        assert!(GEMINI_KEY.path_in(dir).ends_with(".ghosttrace/gemini_key"));
        assert!(SESSION.path_in(dir).ends_with(".ghosttrace/session.json"));
    }

    #[test]
    fn file_write_read_remove_cycle() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = GEMINI_KEY.path_in(&tmp.path().join("nested"));

        write_secret(&path, "AIza-test\n").expect("write");
        assert_eq!(read_secret(&path).as_deref(), Some("AIza-test"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
            assert_eq!(mode, 0o600, "secret file should be 0600");
        }

        remove_secret(&path).expect("remove");
        assert!(!path.exists());
        remove_secret(&path).expect("removing twice is fine");
    }

    #[test]
    fn whitespace_file_reads_as_none() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("gemini_key");
        fs::write(&path, "  \n ").expect("write");
        assert!(read_secret(&path).is_none());
    }

    #[test]
    fn source_labels() {
        assert_eq!(SecretSource::Keyring.to_string(), "keyring");
        assert_eq!(SecretSource::Config.as_str(), "config");
    }
}
