use super::AuthResponse;
use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub fn handle(flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let response = match ctx.session.current() {
        Some(session) => AuthResponse::from_session("signed_in", &session),
        None if !ctx.config.supabase.is_configured() => AuthResponse {
            status: "signed_out",
            note: Some("GHOSTTRACE_SUPABASE__URL / GHOSTTRACE_SUPABASE__ANON_KEY not configured".into()),
            ..AuthResponse::default()
        },
        None => AuthResponse {
            status: "signed_out",
            note: Some("run `gtrace auth login`".into()),
            ..AuthResponse::default()
        },
    };
    output(&response, flags.format)
}
