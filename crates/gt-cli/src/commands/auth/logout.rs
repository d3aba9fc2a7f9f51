use gt_backend::secret_store;

use super::AuthResponse;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let mut note = None;

    if let Some(token) = ctx.session.access_token() {
        match ctx.supabase() {
            Ok(client) => {
                if let Err(error) = client.sign_out(&token).await {
                    tracing::warn!(%error, "remote sign-out failed; clearing local session anyway");
                    note = Some(format!("remote sign-out failed: {error}"));
                }
            }
            Err(_) => note = Some("backend unavailable; cleared local session only".into()),
        }
    }

    ctx.session.sign_out();
    // Also covers a stored session that failed to load.
    secret_store::clear_session()?;

    output(
        &AuthResponse {
            status: "signed_out",
            note,
            ..AuthResponse::default()
        },
        flags.format,
    )
}
