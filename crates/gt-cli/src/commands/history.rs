use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use gt_app::AppError;
use gt_core::Subscription;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::HistoryArgs;
use crate::commands::trace;
use crate::context::{AppContext, Controller};
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    #[serde(rename = "#")]
    position: usize,
    query: &'a str,
    created_at: DateTime<Utc>,
}

/// Enter the history view and read it. The returned guard keeps the list
/// marked stale on every later sign-in or sign-out, for `sync_history`.
async fn open_history(controller: &mut Controller) -> anyhow::Result<Subscription> {
    let watch = controller.watch_session();
    controller.open_history().context("cannot open history")?;
    controller.sync_history().await;
    Ok(watch)
}

pub async fn handle(args: &HistoryArgs, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    if !ctx.session.is_signed_in() {
        bail!("history is per account; sign in with `gtrace auth login`");
    }
    if ctx.offline && !flags.quiet {
        eprintln!("offline: history is kept in memory for this run only");
    }

    let mut controller = ctx.controller()?;
    let _watch = open_history(&mut controller).await?;

    let Some(position) = args.rerun else {
        let rows = controller
            .history_entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| HistoryRow {
                position: index + 1,
                query: &entry.query,
                created_at: entry.created_at,
            })
            .collect::<Vec<_>>();
        return output(&rows, flags.format);
    };

    let index = position
        .checked_sub(1)
        .ok_or(AppError::NoSuchHistoryEntry(position))?;
    let query = controller
        .history_entries()
        .get(index)
        .map(|entry| entry.query.clone())
        .ok_or(AppError::NoSuchHistoryEntry(position))?;

    let spinner = Progress::spinner(&format!("Re-running {query}"));
    controller.rerun(index).await?;
    trace::settle(&controller, &spinner, &args.export, flags, ctx)
}
