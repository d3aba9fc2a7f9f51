use clap::Subcommand;

/// Gemini API key commands.
#[derive(Clone, Debug, Subcommand)]
pub enum KeyCommands {
    /// Store the key in the OS keychain (file fallback).
    Set {
        /// The API key. Prompted for when omitted.
        key: Option<String>,
    },
    /// Show where the key comes from, masked.
    Show,
    /// Remove the stored key.
    Clear,
}
