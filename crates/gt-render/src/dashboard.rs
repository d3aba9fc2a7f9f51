//! Terminal report view.

use std::fmt::Write as _;

use gt_core::{EntityType, OsintReport, Trend};

use crate::risk::RiskLevel;
use crate::style::{Style, wrap};

/// Connections shown as network chips.
pub const MAX_NETWORK_NODES: usize = 12;
/// Sources linked in the header.
pub const MAX_HEADER_SOURCES: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct DashboardOptions {
    pub style: Style,
    /// Wrap width for prose; `None` uses 80 columns.
    pub width: Option<usize>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            style: Style::PLAIN,
            width: None,
        }
    }
}

/// `CONFIDENCE: {n}%`
#[must_use]
pub fn confidence_badge(score: u8) -> String {
    format!("CONFIDENCE: {score}%")
}

#[must_use]
pub const fn trend_glyph(trend: Option<Trend>) -> &'static str {
    match trend {
        Some(Trend::Up) => "▲",
        Some(Trend::Down) => "▼",
        Some(Trend::Neutral) => "─",
        None => " ",
    }
}

fn entity_badge(entity_type: EntityType) -> String {
    format!("[{}]", entity_type.as_str().to_uppercase())
}

fn section(out: &mut String, style: Style, title: &str) {
    let _ = writeln!(out, "\n{}", style.cyan(&style.bold(&title.to_uppercase())));
}

/// Render `report` for the terminal. Every list is shown in the order given.
#[must_use]
pub fn render_dashboard(report: &OsintReport, options: &DashboardOptions) -> String {
    let style = options.style;
    let width = options.width.unwrap_or(80);
    let mut out = String::new();

    // Header
    let _ = writeln!(
        out,
        "{}  {}",
        style.dim(&entity_badge(report.entity_type)),
        style.cyan(&confidence_badge(report.confidence_score))
    );
    let _ = writeln!(out, "{}", style.bold(&report.target_name));
    for source in report.sources.iter().take(MAX_HEADER_SOURCES) {
        let _ = writeln!(out, "  ↗ {}", style.dim(source));
    }

    section(&mut out, style, "Executive Summary");
    for line in wrap(&report.summary, width) {
        let _ = writeln!(out, "  {line}");
    }

    section(&mut out, style, "Key Identifiers");
    let label_width = report
        .key_stats
        .iter()
        .map(|s| s.label.chars().count())
        .max()
        .unwrap_or(0);
    for stat in &report.key_stats {
        let glyph = match stat.trend {
            Some(Trend::Up) => style.green(trend_glyph(stat.trend)),
            Some(Trend::Down) => style.red(trend_glyph(stat.trend)),
            _ => style.dim(trend_glyph(stat.trend)),
        };
        let pad = label_width.saturating_sub(stat.label.chars().count());
        let _ = writeln!(
            out,
            "  {}{}  {} {glyph}",
            style.dim(&stat.label),
            " ".repeat(pad),
            style.bold(&stat.value)
        );
    }

    section(&mut out, style, "Chronology");
    for item in &report.timeline {
        let _ = write!(out, "  {}  {}", style.bold(&item.date), item.event);
        if let Some(source) = &item.source {
            let _ = write!(out, " {}", style.dim(&format!("({source})")));
        }
        out.push('\n');
    }

    section(&mut out, style, "Entity Network");
    if report.connections.is_empty() {
        let _ = writeln!(out, "  {}", style.dim("(no connections)"));
    }
    for conn in &report.connections {
        let bar = "█".repeat(usize::from(conn.strength));
        let _ = writeln!(
            out,
            "  {} ── {} {} {}",
            report.target_name,
            style.bold(&conn.name),
            style.dim(&format!("{}/10", conn.strength)),
            style.green(&bar)
        );
    }

    section(&mut out, style, "Risk Assessment");
    for risk in &report.risk_factors {
        let level = RiskLevel::classify(risk);
        let _ = writeln!(out, "  {} {}", level.paint(style, "●"), level.paint(style, risk));
    }

    section(&mut out, style, "Network Nodes");
    let chips: Vec<String> = report
        .connections
        .iter()
        .take(MAX_NETWORK_NODES)
        .map(|c| format!("[{} {}]", c.name, style.dim(&format!("| {}", c.role_or_relation))))
        .collect();
    if !chips.is_empty() {
        let _ = writeln!(out, "  {}", chips.join(" "));
    }

    section(&mut out, style, "Digital Footprint");
    for fp in &report.digital_footprint {
        let _ = writeln!(out, "  │ {fp}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::strip_ansi;
    use gt_core::{Connection, KeyStat, TimelineEvent};

    fn report() -> OsintReport {
        OsintReport {
            target_name: "Nestlé".into(),
            entity_type: EntityType::Company,
            summary: "Swiss multinational food and drink processing conglomerate.".into(),
            confidence_score: 82,
            key_stats: vec![
                KeyStat {
                    label: "Revenue".into(),
                    value: "CHF 93B".into(),
                    trend: Some(Trend::Down),
                },
                KeyStat {
                    label: "HQ".into(),
                    value: "Vevey".into(),
                    trend: None,
                },
            ],
            timeline: vec![
                TimelineEvent {
                    date: "2020".into(),
                    event: "later".into(),
                    source: None,
                },
                TimelineEvent {
                    date: "1866".into(),
                    event: "earlier".into(),
                    source: Some("wiki".into()),
                },
            ],
            connections: (1..=14)
                .map(|i| Connection {
                    name: format!("Node{i:02}"),
                    role_or_relation: "Supplier".into(),
                    strength: 3,
                })
                .collect(),
            risk_factors: vec!["High: water rights".into()],
            digital_footprint: vec!["nestle.com".into()],
            sources: vec![
                "https://a.example".into(),
                "https://b.example".into(),
                "https://c.example".into(),
                "https://d.example".into(),
            ],
        }
    }

    #[test]
    fn header_shows_badges_and_three_sources() {
        let out = render_dashboard(&report(), &DashboardOptions::default());
        assert!(out.contains("[COMPANY]  CONFIDENCE: 82%"));
        assert!(out.contains("https://c.example"));
        assert!(!out.contains("https://d.example"));
    }

    #[test]
    fn timeline_keeps_given_order() {
        let out = render_dashboard(&report(), &DashboardOptions::default());
        let later = out.find("2020  later").unwrap();
        let earlier = out.find("1866  earlier (wiki)").unwrap();
        assert!(later < earlier);
    }

    #[test]
    fn trend_glyphs() {
        let out = render_dashboard(&report(), &DashboardOptions::default());
        assert!(out.contains("Revenue  CHF 93B ▼"));
        assert_eq!(trend_glyph(Some(Trend::Up)), "▲");
        assert_eq!(trend_glyph(Some(Trend::Neutral)), "─");
    }

    #[test]
    fn network_chips_are_capped() {
        let out = render_dashboard(&report(), &DashboardOptions::default());
        let chips = out.split("NETWORK NODES").nth(1).unwrap();
        assert!(chips.contains("[Node12 | Supplier]"));
        assert!(!chips.contains("Node13"));
        // The full network section still lists everything.
        assert!(out.contains("Nestlé ── Node14"));
    }

    #[test]
    fn colour_does_not_change_text() {
        let plain = render_dashboard(&report(), &DashboardOptions::default());
        let colored = render_dashboard(
            &report(),
            &DashboardOptions {
                style: Style::COLOR,
                width: None,
            },
        );
        assert_ne!(plain, colored);
        assert_eq!(strip_ansi(&colored), plain);
    }
}
