use clap::{Args, Subcommand};

/// Account commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Create an account (requires the site registration password).
    Signup(AuthCredentialArgs),
    /// Sign in with email and password.
    Login(AuthCredentialArgs),
    /// Sign out and forget the stored session.
    Logout,
    /// Show the current session.
    Status,
}

/// Missing values are prompted for.
#[derive(Clone, Debug, Args)]
pub struct AuthCredentialArgs {
    #[arg(long)]
    pub email: Option<String>,
}
