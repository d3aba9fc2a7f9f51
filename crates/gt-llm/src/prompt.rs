//! Prompt templates for report generation and follow-up chat.

use std::fmt::Write as _;

use gt_core::OsintReport;

/// Field-by-field shape the model must return, with enumerations and ranges.
const REPORT_SHAPE: &str = r#"{
  "targetName": string,                       // canonical name of the entity
  "entityType": "Individual" | "Company" | "Unknown",
  "summary": string,                          // 3-5 sentence executive summary
  "confidenceScore": integer 0-100,           // overall confidence in the findings
  "keyStats": [ { "label": string, "value": string, "trend": "up" | "down" | "neutral" (optional) } ],
  "timeline": [ { "date": string, "event": string, "source": string (optional) } ],
  "connections": [ { "name": string, "roleOrRelation": string, "strength": integer 1-10 } ],
  "riskFactors": [ string ],
  "digitalFootprint": [ string ],             // websites, social handles, registrations
  "sources": [ string ]                       // URLs consulted
}"#;

/// Build the analyst prompt for `query`.
#[must_use]
pub fn report_prompt(query: &str) -> String {
    format!(
        "You are an expert Open Source Intelligence (OSINT) analyst.\n\
         Investigate the following target using real-time Google Search results: \"{query}\".\n\
         \n\
         Gather publicly available information about the target: identity, key figures, \
         notable events in chronological order, associated people and organizations, \
         reputational or legal risks, and online presence.\n\
         \n\
         Return ONLY a single JSON object, with no commentary before or after it, \
         matching exactly this structure:\n\
         {REPORT_SHAPE}\n\
         \n\
         Rules:\n\
         - entityType must be one of \"Individual\", \"Company\", or \"Unknown\".\n\
         - confidenceScore must be an integer between 0 and 100.\n\
         - every connection strength must be an integer between 1 and 10.\n\
         - list timeline events in chronological order.\n\
         - do not invent facts; use empty arrays where nothing was found.\n",
        query = query.trim()
    )
}

/// Render `report` as the compact context block given to the chat model.
#[must_use]
pub fn report_context(report: &OsintReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "TARGET: {} ({})", report.target_name, report.entity_type);
    let _ = writeln!(out, "SUMMARY: {}", report.summary);

    out.push_str("KEY STATS:\n");
    for stat in &report.key_stats {
        let _ = writeln!(out, "- {}: {}", stat.label, stat.value);
    }

    out.push_str("RISK FACTORS:\n");
    for risk in &report.risk_factors {
        let _ = writeln!(out, "- {risk}");
    }

    out.push_str("CONNECTIONS:\n");
    for conn in &report.connections {
        let _ = writeln!(
            out,
            "- {} ({}, strength {}/10)",
            conn.name, conn.role_or_relation, conn.strength
        );
    }
    out
}

/// System instruction for follow-up chat about `report`.
#[must_use]
pub fn chat_instruction(report: &OsintReport) -> String {
    format!(
        "You are GhostTrace, an intelligence assistant answering questions about a dossier.\n\
         Answer ONLY from the dossier below. If the dossier does not contain the answer, \
         say so plainly instead of guessing. Be concise.\n\
         \n\
         --- DOSSIER ---\n\
         {}--- END DOSSIER ---",
        report_context(report)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::{Connection, EntityType, KeyStat, Trend};

    fn report() -> OsintReport {
        OsintReport {
            target_name: "Nestlé".into(),
            entity_type: EntityType::Company,
            summary: "Swiss food and beverage conglomerate.".into(),
            confidence_score: 82,
            key_stats: vec![KeyStat {
                label: "Revenue".into(),
                value: "CHF 93bn".into(),
                trend: Some(Trend::Down),
            }],
            timeline: vec![],
            connections: vec![Connection {
                name: "Bayer".into(),
                role_or_relation: "Competitor".into(),
                strength: 4,
            }],
            risk_factors: vec!["Water extraction litigation".into()],
            digital_footprint: vec!["nestle.com".into()],
            sources: vec![],
        }
    }

    #[test]
    fn report_prompt_embeds_query_and_ranges() {
        let prompt = report_prompt("  Nestlé ");
        assert!(prompt.contains("\"Nestlé\""));
        assert!(prompt.contains("\"Individual\" | \"Company\" | \"Unknown\""));
        assert!(prompt.contains("integer 0-100"));
        assert!(prompt.contains("integer 1-10"));
        assert!(prompt.contains("Return ONLY a single JSON object"));
    }

    #[test]
    fn context_covers_summary_stats_risks_and_connections() {
        let ctx = report_context(&report());
        assert!(ctx.contains("SUMMARY: Swiss food and beverage conglomerate."));
        assert!(ctx.contains("- Revenue: CHF 93bn"));
        assert!(ctx.contains("- Water extraction litigation"));
        assert!(ctx.contains("- Bayer (Competitor, strength 4/10)"));
        assert!(!ctx.contains("nestle.com"));
    }

    #[test]
    fn chat_instruction_wraps_context() {
        let instr = chat_instruction(&report());
        assert!(instr.contains("Answer ONLY from the dossier"));
        assert!(instr.contains("TARGET: Nestlé (Company)"));
        assert!(instr.ends_with("--- END DOSSIER ---"));
    }
}
