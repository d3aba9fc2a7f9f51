use anyhow::bail;
use gt_app::ReportState;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{ExportFlags, TraceArgs};
use crate::commands::export::{announce, present, write_exports};
use crate::context::{AppContext, Controller};
use crate::progress::Progress;

pub async fn handle(args: &TraceArgs, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let mut controller = ctx.controller()?;
    run(&mut controller, &args.query, &args.export, flags, ctx).await
}

/// Submit `query` through `controller` and present the outcome.
pub async fn run(
    controller: &mut Controller,
    query: &str,
    export: &ExportFlags,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    let spinner = Progress::spinner(&format!("Tracing {}", query.trim()));
    if !controller.submit(query).await {
        spinner.finish_clear();
        bail!("nothing to trace: the query is empty");
    }
    settle(controller, &spinner, export, flags, ctx)
}

/// Present whatever state the last submission left the controller in.
pub fn settle(
    controller: &Controller,
    spinner: &Progress,
    export: &ExportFlags,
    flags: &GlobalFlags,
    ctx: &AppContext,
) -> anyhow::Result<()> {
    match controller.report_state() {
        ReportState::Data(report) => {
            spinner.finish_clear();
            let files = write_exports(report, export, &ctx.config.general)?;
            present(report, flags)?;
            announce(&files, flags);
            Ok(())
        }
        ReportState::Error(message) => {
            spinner.finish_err("trace failed");
            bail!("{message}")
        }
        ReportState::Idle | ReportState::Loading => {
            spinner.finish_clear();
            bail!("the trace did not complete")
        }
    }
}
