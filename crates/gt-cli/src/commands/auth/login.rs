use anyhow::Context;

use super::AuthResponse;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthCredentialArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::prompt;

pub async fn handle(args: &AuthCredentialArgs, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let client = ctx.supabase()?;
    let email = prompt::value_or_prompt(args.email.as_deref(), "email: ", "email")?;
    let password = prompt::require("password: ", "password")?;

    let session = client
        .sign_in_with_password(&email, &password)
        .await
        .context("sign-in failed")?;

    let response = AuthResponse::from_session("signed_in", &session);
    ctx.session.sign_in(session);
    output(&response, flags.format)
}
