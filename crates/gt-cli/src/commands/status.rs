use std::time::Duration;

use gt_app::ConnectivityMonitor;
use gt_backend::secret_store;
use gt_core::NodeStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct StatusRow {
    component: &'static str,
    status: String,
    detail: String,
}

pub async fn handle(flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let mut rows = Vec::new();

    let spinner = Progress::spinner("Probing nodes");
    let monitor = ConnectivityMonitor::default();
    let http = reqwest::Client::new();
    let gemini = if ctx.offline {
        monitor.set(NodeStatus::Offline);
        NodeStatus::Offline
    } else {
        monitor.probe(&http, &ctx.config.gemini.base_url, PROBE_TIMEOUT).await
    };
    rows.push(StatusRow {
        component: "gemini",
        status: gemini.to_string(),
        detail: ctx.config.gemini.model.clone(),
    });

    let backend = match ctx.supabase() {
        Ok(client) => monitor.probe(&http, client.base_url(), PROBE_TIMEOUT).await.to_string(),
        Err(_) if ctx.offline => NodeStatus::Offline.to_string(),
        Err(_) => "missing".to_string(),
    };
    spinner.finish_clear();
    rows.push(StatusRow {
        component: "supabase",
        status: backend,
        detail: ctx.config.supabase.url.clone(),
    });

    rows.push(match ctx.session.current() {
        Some(session) => StatusRow {
            component: "session",
            status: "signed_in".into(),
            detail: session.user.email.unwrap_or(session.user.id),
        },
        None => StatusRow {
            component: "session",
            status: "signed_out".into(),
            detail: String::new(),
        },
    });

    rows.push(match secret_store::resolve_api_key(&ctx.config.gemini.api_key) {
        Some((_, source)) => StatusRow {
            component: "api key",
            status: source.to_string(),
            detail: "present".into(),
        },
        None => StatusRow {
            component: "api key",
            status: "missing".into(),
            detail: "run `gtrace key set`".into(),
        },
    });

    output(&rows, flags.format)
}
