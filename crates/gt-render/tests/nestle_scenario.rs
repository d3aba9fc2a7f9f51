//! The Nestlé dossier rendered end to end.

use chrono::{TimeZone, Utc};
use gt_core::{ChatMessage, ChatRole, Connection, EntityType, OsintReport, TimelineEvent};
use gt_render::graph::CENTER_RADIUS;
use gt_render::{
    DashboardOptions, GraphModel, PrintMeta, render_dashboard, render_dossier_html,
    render_transcript_html,
};
use pretty_assertions::assert_eq;

fn nestle() -> OsintReport {
    OsintReport {
        target_name: "Nestlé".into(),
        entity_type: EntityType::Company,
        summary: "Swiss multinational food & drink conglomerate.".into(),
        confidence_score: 82,
        key_stats: vec![],
        timeline: vec![TimelineEvent {
            date: "1866".into(),
            event: "Founded in <Vevey>".into(),
            source: None,
        }],
        connections: vec![Connection {
            name: "Bayer".into(),
            role_or_relation: "Competitor".into(),
            strength: 4,
        }],
        risk_factors: vec!["High: water extraction controversies".into()],
        digital_footprint: vec!["nestle.com".into()],
        sources: vec!["https://www.nestle.com".into()],
    }
}

#[test]
fn graph_has_one_smaller_satellite() {
    let report = nestle();
    let model = GraphModel::build(&report.target_name, &report.connections, 800, 400);
    assert_eq!(model.satellites.len(), 1);
    assert_eq!(model.satellites[0].label, "Bayer");
    assert!((model.satellites[0].radius - 17.0).abs() < f64::EPSILON);
    assert!(model.satellites[0].radius < model.center.radius);
    assert!((model.center.radius - CENTER_RADIUS).abs() < f64::EPSILON);
    assert_eq!(model.edges.len(), 1);
    assert!((model.edges[0].width - 4.0).abs() < f64::EPSILON);
}

#[test]
fn dashboard_shows_confidence_badge() {
    let out = render_dashboard(&nestle(), &DashboardOptions::default());
    assert!(out.contains("CONFIDENCE: 82%"));
    assert!(out.contains("Nestlé ── Bayer 4/10"));
}

#[test]
fn dossier_has_numbered_sections_and_escapes_text() {
    let meta = PrintMeta {
        generated_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
        reference: "k3x9q2m1z".into(),
    };
    let html = render_dossier_html(&nestle(), &meta);

    let titles = [
        "01 // Executive Summary",
        "02 // Key Identifiers",
        "03 // Risk Assessment",
        "04 // Chronological Timeline",
        "05 // Network Connections",
        "06 // Digital Footprint",
        "07 // Sources",
    ];
    let positions: Vec<usize> = titles.iter().map(|t| html.find(t).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(html.contains("CONFIDENTIAL // INTELLIGENCE REPORT"));
    assert!(html.contains("TYPE: COMPANY"));
    assert!(html.contains("CONFIDENCE: 82%"));
    assert!(html.contains("DATE: 2025-03-01"));
    assert!(html.contains("REF: K3X9Q2M1Z"));
    assert!(html.contains("food &amp; drink"));
    assert!(html.contains("Founded in &lt;Vevey&gt;"));
    assert!(html.contains("<td>Bayer</td><td>Competitor</td><td>4/10</td>"));
    assert!(html.contains(r#"<a href="https://www.nestle.com">"#));
}

#[test]
fn dossier_is_deterministic_for_fixed_meta() {
    let meta = PrintMeta {
        generated_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
        reference: "ABC".into(),
    };
    assert_eq!(
        render_dossier_html(&nestle(), &meta),
        render_dossier_html(&nestle(), &meta)
    );
}

#[test]
fn transcript_labels_roles() {
    let messages = vec![
        ChatMessage::at(ChatRole::Model, "I've analyzed the data for Nestlé.", 0),
        ChatMessage::at(ChatRole::User, "Who is <Bayer>?", 61_000),
    ];
    let html = render_transcript_html("Nestlé", &messages, Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap());

    assert!(html.contains("<h1>Investigation Chat Log</h1>"));
    assert!(html.contains("Target: Nestlé | Generated: 2025-03-01 00:00:00 UTC"));
    let ai = html.find("GHOSTTRACE AI").unwrap();
    let analyst = html.find("ANALYST (USER)").unwrap();
    assert!(ai < analyst);
    assert!(html.contains("00:01:01"));
    assert!(html.contains("Who is &lt;Bayer&gt;?"));
}
