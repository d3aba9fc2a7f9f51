use std::path::{Path, PathBuf};

use anyhow::Context;
use gt_config::GeneralConfig;
use gt_core::OsintReport;
use gt_render::{DashboardOptions, GraphModel, PrintMeta, render_dashboard, render_dossier_html};
use serde::Serialize;

use crate::cli::root_commands::{ExportArgs, ExportFlags};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

#[derive(Debug, Serialize)]
pub struct ExportedFile {
    pub kind: &'static str,
    pub path: PathBuf,
    pub opened: bool,
}

/// Print `report`: the dashboard for table output, the JSON document otherwise.
pub fn present(report: &OsintReport, flags: &GlobalFlags) -> anyhow::Result<()> {
    if flags.format == OutputFormat::Table {
        let prefs = ui::prefs();
        let options = DashboardOptions {
            style: prefs.style(),
            width: prefs.term_width,
        };
        println!("{}", render_dashboard(report, &options));
        return Ok(());
    }
    output(report, flags.format)
}

/// Write whichever of JSON, dossier HTML, and graph SVG `export` asks for.
pub fn write_exports(
    report: &OsintReport,
    export: &ExportFlags,
    general: &GeneralConfig,
) -> anyhow::Result<Vec<ExportedFile>> {
    let open = export.open || general.open_exports;
    let mut written = Vec::new();

    if let Some(path) = &export.save {
        let json = serde_json::to_string_pretty(report)?;
        write_file(path, &json)?;
        written.push(ExportedFile {
            kind: "json",
            path: path.clone(),
            opened: false,
        });
    }
    if let Some(path) = &export.html {
        write_file(path, &render_dossier_html(report, &PrintMeta::now()))?;
        written.push(ExportedFile {
            kind: "html",
            path: path.clone(),
            opened: open && open_file(path),
        });
    }
    if let Some(path) = &export.svg {
        let graph = GraphModel::build(
            &report.target_name,
            &report.connections,
            general.graph_width,
            general.graph_height,
        );
        write_file(path, &graph.to_svg())?;
        written.push(ExportedFile {
            kind: "svg",
            path: path.clone(),
            opened: open && open_file(path),
        });
    }

    Ok(written)
}

/// Tell the user where files went, on stderr so stdout stays the report.
pub fn announce(files: &[ExportedFile], flags: &GlobalFlags) {
    if flags.quiet {
        return;
    }
    for file in files {
        eprintln!("wrote {} to {}", file.kind, file.path.display());
    }
}

/// Load a dossier saved with `--save`, validating it like a model reply.
pub fn read_report(path: &Path) -> anyhow::Result<OsintReport> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    gt_schema::decode_report(&raw).with_context(|| format!("{} is not a GhostTrace dossier", path.display()))
}

pub fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

pub fn open_file(path: &Path) -> bool {
    match open::that(path) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "could not open file");
            false
        }
    }
}

pub fn handle(args: &ExportArgs, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let report = read_report(&args.report)?;
    let export = ExportFlags {
        save: None,
        html: Some(args.out.clone()),
        svg: None,
        open: args.open,
    };
    let files = write_exports(&report, &export, &ctx.config.general)?;
    output(&files, flags.format)
}

#[cfg(test)]
mod tests {
    use gt_config::GeneralConfig;
    use gt_core::{Connection, EntityType, OsintReport};

    use super::{ExportFlags, read_report, write_exports};

    fn report() -> OsintReport {
        OsintReport {
            target_name: "Nestlé".into(),
            entity_type: EntityType::Company,
            summary: "Swiss food group <b>".into(),
            confidence_score: 82,
            key_stats: Vec::new(),
            timeline: Vec::new(),
            connections: vec![Connection {
                name: "L'Oréal".into(),
                role_or_relation: "Shareholding".into(),
                strength: 6,
            }],
            risk_factors: vec!["High water usage".into()],
            digital_footprint: Vec::new(),
            sources: vec!["https://www.nestle.com".into()],
        }
    }

    #[test]
    fn writes_requested_files_and_reads_json_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let export = ExportFlags {
            save: Some(dir.path().join("nestle.json")),
            html: Some(dir.path().join("out/nestle.html")),
            svg: Some(dir.path().join("nestle.svg")),
            open: false,
        };

        let files = write_exports(&report(), &export, &GeneralConfig::default()).expect("exports");
        let kinds: Vec<_> = files.iter().map(|f| f.kind).collect();
        assert_eq!(kinds, ["json", "html", "svg"]);
        assert!(files.iter().all(|f| !f.opened));

        let html = std::fs::read_to_string(dir.path().join("out/nestle.html")).expect("html");
        assert!(html.contains("&lt;b&gt;"));
        let svg = std::fs::read_to_string(dir.path().join("nestle.svg")).expect("svg");
        assert!(svg.starts_with("<svg"));

        let back = read_report(&dir.path().join("nestle.json")).expect("saved dossier reloads");
        assert_eq!(back, report());
    }

    #[test]
    fn nothing_requested_writes_nothing() {
        let export = ExportFlags {
            save: None,
            html: None,
            svg: None,
            open: false,
        };
        let files = write_exports(&report(), &export, &GeneralConfig::default()).expect("exports");
        assert!(files.is_empty());
    }

    #[test]
    fn non_dossier_json_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"hello":"world"}"#).expect("write");
        let error = read_report(&path).expect_err("must fail");
        assert!(format!("{error:#}").contains("not a GhostTrace dossier"));
    }
}
