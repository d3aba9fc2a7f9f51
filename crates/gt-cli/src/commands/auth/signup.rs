use anyhow::Context;
use gt_backend::SignUpOutcome;

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
    let site_password = prompt::require("site registration password: ", "site registration password")?;

    let outcome = client
        .sign_up(&email, &password, &site_password)
        .await
        .context("sign-up failed")?;

    let response = match outcome {
        SignUpOutcome::SignedIn(session) => {
            let response = AuthResponse::from_session("signed_in", &session);
            ctx.session.sign_in(session);
            response
        }
        SignUpOutcome::ConfirmationRequired { email } => AuthResponse {
            status: "confirmation_required",
            note: Some(format!("Confirmation email sent to {email}. Sign in after confirming.")),
            email: Some(email),
            ..AuthResponse::default()
        },
    };
    output(&response, flags.format)
}
