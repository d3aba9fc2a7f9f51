//! Standalone printable HTML documents.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use gt_core::{ChatMessage, ChatRole, OsintReport};

use crate::html::{escape_html, is_web_link};

const DOSSIER_STYLE: &str = "\
body { font-family: 'Courier New', Courier, monospace; color: #111; padding: 40px; max-width: 900px; margin: 0 auto; line-height: 1.5; background: white; }
.branding-header { display: flex; justify-content: space-between; align-items: flex-start; border-bottom: 3px solid #000; padding-bottom: 15px; margin-bottom: 30px; }
.logo { font-size: 24px; font-weight: 900; text-transform: uppercase; font-style: italic; letter-spacing: -1px; }
.logo span { color: #0066cc; }
.tagline { text-align: right; font-size: 9px; font-weight: bold; text-transform: uppercase; letter-spacing: 1px; color: #666; }
h1 { border-bottom: 1px solid #000; padding-bottom: 10px; margin-bottom: 5px; font-size: 28px; letter-spacing: -1px; }
.header-meta { margin-bottom: 40px; font-size: 13px; font-weight: bold; color: #444; display: flex; justify-content: space-between; border-bottom: 1px solid #ccc; padding-bottom: 10px; }
h2 { margin-top: 30px; font-size: 16px; text-transform: uppercase; border-bottom: 2px solid #000; padding-bottom: 5px; margin-bottom: 15px; letter-spacing: 1px; }
.section { margin-bottom: 25px; page-break-inside: avoid; }
.risk-item { color: #b91c1c; font-weight: 500; }
table { width: 100%; border-collapse: collapse; font-size: 13px; margin-top: 10px; }
th { text-align: left; border-bottom: 2px solid #000; padding: 8px 4px; text-transform: uppercase; font-size: 11px; }
td { text-align: left; padding: 8px 4px; border-bottom: 1px solid #ddd; vertical-align: top; }
ul { margin: 0; padding-left: 20px; }
li { margin-bottom: 5px; }
.footer { margin-top: 60px; padding-top: 20px; border-top: 1px solid #ccc; font-size: 10px; text-align: center; color: #666; text-transform: uppercase; }
@media print { body { padding: 0; } }
";

const TRANSCRIPT_STYLE: &str = "\
body { font-family: 'Courier New', Courier, monospace; padding: 40px; color: #111; max-width: 800px; margin: 0 auto; }
.header { border-bottom: 3px solid #000; padding-bottom: 20px; margin-bottom: 30px; }
h1 { font-size: 24px; margin: 0 0 5px 0; text-transform: uppercase; }
.meta { font-size: 12px; color: #666; }
.message { margin-bottom: 20px; padding-bottom: 20px; border-bottom: 1px dashed #ddd; }
.message:last-child { border-bottom: none; }
.role-header { display: flex; justify-content: space-between; margin-bottom: 5px; font-size: 11px; text-transform: uppercase; font-weight: bold; }
.role-user { color: #0000aa; }
.role-model { color: #aa0000; }
.time { font-weight: normal; color: #888; }
.content { white-space: pre-wrap; line-height: 1.5; font-size: 13px; }
.footer { margin-top: 50px; font-size: 10px; text-align: center; color: #999; border-top: 1px solid #eee; padding-top: 10px; }
";

/// Values the caller supplies so rendering stays deterministic.
#[derive(Debug, Clone)]
pub struct PrintMeta {
    pub generated_at: DateTime<Utc>,
    /// Short reference code printed in the header.
    pub reference: String,
}

impl PrintMeta {
    /// Metadata for a document printed now, with a fresh reference code.
    #[must_use]
    pub fn now() -> Self {
        Self {
            generated_at: Utc::now(),
            reference: new_reference(),
        }
    }
}

/// A random 9-character base-36 reference code.
#[must_use]
pub fn new_reference() -> String {
    let mut bytes = [0u8; 9];
    if getrandom::fill(&mut bytes).is_err() {
        // OS randomness unavailable: seed from the clock's nanoseconds.
        bytes = clock_bytes(Utc::now());
    }
    encode_reference(&bytes)
}

fn clock_bytes(now: DateTime<Utc>) -> [u8; 9] {
    let nanos = now.timestamp_nanos_opt().unwrap_or_default().to_le_bytes();
    let mut bytes = [0u8; 9];
    for (b, n) in bytes.iter_mut().zip(nanos.iter().cycle()) {
        *b = *n;
    }
    bytes
}

fn encode_reference(bytes: &[u8; 9]) -> String {
    const ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    bytes
        .iter()
        .map(|b| char::from(ALPHABET[usize::from(*b) % ALPHABET.len()]))
        .collect()
}

fn link(url: &str) -> String {
    let text = escape_html(url);
    if is_web_link(url) {
        format!(r#"<a href="{text}">{text}</a>"#)
    } else {
        text
    }
}

fn open_section(out: &mut String, number: u8, title: &str) {
    let _ = writeln!(out, "<div class=\"section\">\n<h2>{number:02} // {title}</h2>");
}

/// Printable dossier: branding header, meta block, seven numbered sections.
#[must_use]
pub fn render_dossier_html(report: &OsintReport, meta: &PrintMeta) -> String {
    let e = escape_html;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>OSINT Report - {}</title>\n<style>\n{DOSSIER_STYLE}</style>\n</head>\n<body>",
        e(&report.target_name)
    );
    out.push_str(
        "<div class=\"branding-header\">\n<div class=\"logo\">GHOST<span>TRACE</span></div>\n\
         <div class=\"tagline\">Verified Forensic Intelligence Dossier</div>\n</div>\n",
    );
    out.push_str("<h1>CONFIDENTIAL // INTELLIGENCE REPORT</h1>\n");
    let _ = writeln!(
        out,
        "<div class=\"header-meta\">\n<div>TARGET: {}<br/>TYPE: {}<br/>CONFIDENCE: {}%</div>\n\
         <div style=\"text-align: right;\">DATE: {}<br/>REF: {}</div>\n</div>",
        e(&report.target_name),
        report.entity_type.as_str().to_uppercase(),
        report.confidence_score,
        meta.generated_at.format("%Y-%m-%d"),
        e(&meta.reference.to_uppercase())
    );

    open_section(&mut out, 1, "Executive Summary");
    let _ = writeln!(out, "<p>{}</p>\n</div>", e(&report.summary));

    open_section(&mut out, 2, "Key Identifiers");
    out.push_str("<table>\n");
    for stat in &report.key_stats {
        let _ = writeln!(
            out,
            "<tr><td width=\"40%\"><strong>{}</strong></td><td>{}</td></tr>",
            e(&stat.label),
            e(&stat.value)
        );
    }
    out.push_str("</table>\n</div>\n");

    open_section(&mut out, 3, "Risk Assessment");
    out.push_str("<ul>\n");
    for risk in &report.risk_factors {
        let _ = writeln!(out, "<li class=\"risk-item\">{}</li>", e(risk));
    }
    out.push_str("</ul>\n</div>\n");

    open_section(&mut out, 4, "Chronological Timeline");
    out.push_str("<table>\n<tr><th width=\"15%\">Date</th><th>Event</th></tr>\n");
    for item in &report.timeline {
        let _ = writeln!(
            out,
            "<tr><td><strong>{}</strong></td><td>{}</td></tr>",
            e(&item.date),
            e(&item.event)
        );
    }
    out.push_str("</table>\n</div>\n");

    open_section(&mut out, 5, "Network Connections");
    out.push_str("<table>\n<thead><tr><th>Name</th><th>Relation</th><th>Strength</th></tr></thead>\n<tbody>\n");
    for conn in &report.connections {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}/10</td></tr>",
            e(&conn.name),
            e(&conn.role_or_relation),
            conn.strength
        );
    }
    out.push_str("</tbody>\n</table>\n</div>\n");

    open_section(&mut out, 6, "Digital Footprint");
    out.push_str("<ul>\n");
    for fp in &report.digital_footprint {
        let _ = writeln!(out, "<li>{}</li>", e(fp));
    }
    out.push_str("</ul>\n</div>\n");

    open_section(&mut out, 7, "Sources");
    out.push_str("<ul>\n");
    for source in &report.sources {
        let _ = writeln!(out, "<li>{}</li>", link(source));
    }
    out.push_str("</ul>\n</div>\n");

    let _ = writeln!(
        out,
        "<div class=\"footer\">Generated by GhostTrace OSINT Analyzer &bull; Internal Use Only &bull; {}</div>\n</body>\n</html>",
        meta.generated_at.to_rfc3339()
    );
    out
}

/// Role header used in the transcript.
#[must_use]
pub const fn transcript_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "ANALYST (USER)",
        ChatRole::Model => "GHOSTTRACE AI",
    }
}

fn clock(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

/// Printable chat transcript for a conversation about `target`.
#[must_use]
pub fn render_transcript_html(target: &str, messages: &[ChatMessage], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>Chat Transcript - {}</title>\n<style>\n{TRANSCRIPT_STYLE}</style>\n</head>\n<body>",
        escape_html(target)
    );
    let _ = writeln!(
        out,
        "<div class=\"header\">\n<h1>Investigation Chat Log</h1>\n<div class=\"meta\">Target: {} | Generated: {}</div>\n</div>",
        escape_html(target),
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    for msg in messages {
        let class = match msg.role {
            ChatRole::User => "role-user",
            ChatRole::Model => "role-model",
        };
        let _ = writeln!(
            out,
            "<div class=\"message\">\n<div class=\"role-header\"><span class=\"{class}\">{}</span><span class=\"time\">{}</span></div>\n<div class=\"content\">{}</div>\n</div>",
            transcript_role(msg.role),
            clock(msg.timestamp),
            escape_html(&msg.content)
        );
    }
    out.push_str("<div class=\"footer\">GhostTrace OSINT &bull; Confidential</div>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_nine_base36_chars() {
        let r = new_reference();
        assert_eq!(r.len(), 9);
        assert!(r.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn clock_fallback_still_yields_a_reference() {
        let now = DateTime::from_timestamp(1_767_225_600, 123_456_789).expect("valid timestamp");
        let bytes = clock_bytes(now);
        assert_eq!(bytes, clock_bytes(now));
        let r = encode_reference(&bytes);
        assert_eq!(r.len(), 9);
        assert!(r.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn encoding_wraps_bytes_into_the_alphabet() {
        assert_eq!(encode_reference(&[0, 9, 10, 35, 36, 71, 255, 1, 2]), "09AZ0Z312");
    }

    #[test]
    fn clock_formats_utc() {
        assert_eq!(clock(0), "00:00:00");
        assert_eq!(clock(3_723_000), "01:02:03");
    }

    #[test]
    fn non_web_sources_are_not_links() {
        assert_eq!(link("javascript:alert(1)"), "javascript:alert(1)");
        assert!(link("https://x.example").starts_with("<a href="));
    }
}
