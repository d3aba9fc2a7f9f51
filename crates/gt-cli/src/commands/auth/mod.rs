mod login;
mod logout;
mod signup;
mod status;

use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Shared response for the auth subcommands.
#[derive(Debug, Default, Serialize)]
struct AuthResponse {
    status: &'static str,
    user_id: Option<String>,
    email: Option<String>,
    expires_at: Option<String>,
    note: Option<String>,
}

impl AuthResponse {
    fn from_session(status: &'static str, session: &gt_backend::Session) -> Self {
        Self {
            status,
            user_id: Some(session.user.id.clone()),
            email: session.user.email.clone(),
            expires_at: Some(session.expires_at.to_rfc3339()),
            note: None,
        }
    }
}

/// Handle `gtrace auth <subcommand>`.
pub async fn handle(action: &AuthCommands, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    match action {
        AuthCommands::Signup(args) => signup::handle(args, flags, ctx).await,
        AuthCommands::Login(args) => login::handle(args, flags, ctx).await,
        AuthCommands::Logout => logout::handle(flags, ctx).await,
        AuthCommands::Status => status::handle(flags, ctx),
    }
}
