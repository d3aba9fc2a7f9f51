use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{EntityType, Trend};

/// A synthesized intelligence report about a single entity.
///
/// Built once per successful generation and never mutated afterwards.
/// `confidence_score` is within `0..=100` and every connection strength is
/// within `1..=10`; the decode step rejects anything else.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OsintReport {
    pub target_name: String,
    pub entity_type: EntityType,
    pub summary: String,
    #[schemars(range(min = 0, max = 100))]
    pub confidence_score: u8,
    pub key_stats: Vec<KeyStat>,
    pub timeline: Vec<TimelineEvent>,
    pub connections: Vec<Connection>,
    pub risk_factors: Vec<String>,
    pub digital_footprint: Vec<String>,
    /// Source URLs. Grounding citations are merged in after decoding.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl OsintReport {
    /// Merge grounding citation URLs into `sources`.
    ///
    /// Order is preserved: existing sources first, then new URLs in the order
    /// given. Duplicates and blank entries are skipped.
    #[must_use]
    pub fn with_grounding_sources<I>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        for url in urls {
            let url = url.trim();
            if url.is_empty() || self.sources.iter().any(|s| s == url) {
                continue;
            }
            self.sources.push(url.to_string());
        }
        self
    }

    /// Strongest connection, ties resolved by first occurrence.
    #[must_use]
    pub fn strongest_connection(&self) -> Option<&Connection> {
        self.connections
            .iter()
            .reduce(|best, c| if c.strength > best.strength { c } else { best })
    }
}

/// A headline figure about the target (revenue, headcount, founded, ...).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct KeyStat {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/// A dated event. `date` is free text as reported by the model.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TimelineEvent {
    pub date: String,
    pub event: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A related person or organization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub name: String,
    pub role_or_relation: String,
    /// Relationship strength, `1..=10`.
    #[schemars(range(min = 1, max = 10))]
    pub strength: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn report() -> OsintReport {
        OsintReport {
            target_name: "Nestlé".into(),
            entity_type: EntityType::Company,
            summary: "Food and beverage conglomerate.".into(),
            confidence_score: 82,
            key_stats: vec![],
            timeline: vec![],
            connections: vec![
                Connection {
                    name: "Bayer".into(),
                    role_or_relation: "Competitor".into(),
                    strength: 4,
                },
                Connection {
                    name: "L'Oréal".into(),
                    role_or_relation: "Shareholding".into(),
                    strength: 7,
                },
                Connection {
                    name: "Danone".into(),
                    role_or_relation: "Competitor".into(),
                    strength: 7,
                },
            ],
            risk_factors: vec![],
            digital_footprint: vec![],
            sources: vec!["https://www.nestle.com".into()],
        }
    }

    #[test]
    fn grounding_sources_are_appended_without_duplicates() {
        let merged = report().with_grounding_sources(vec![
            "https://www.nestle.com".to_string(),
            "  ".to_string(),
            "https://en.wikipedia.org/wiki/Nestl%C3%A9".to_string(),
        ]);
        assert_eq!(
            merged.sources,
            vec![
                "https://www.nestle.com".to_string(),
                "https://en.wikipedia.org/wiki/Nestl%C3%A9".to_string(),
            ]
        );
    }

    #[test]
    fn strongest_connection_prefers_first_on_tie() {
        let r = report();
        assert_eq!(r.strongest_connection().map(|c| c.name.as_str()), Some("L'Oréal"));
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["targetName"], "Nestlé");
        assert_eq!(json["entityType"], "Company");
        assert_eq!(json["confidenceScore"], 82);
        assert_eq!(json["connections"][0]["roleOrRelation"], "Competitor");
        assert!(json.get("target_name").is_none());
    }

    #[test]
    fn missing_sources_default_to_empty() {
        let mut json = serde_json::to_value(report()).unwrap();
        json.as_object_mut().unwrap().remove("sources");
        let decoded: OsintReport = serde_json::from_value(json).unwrap();
        assert!(decoded.sources.is_empty());
    }

    #[test]
    fn absent_trend_is_not_serialized() {
        let stat = KeyStat {
            label: "Employees".into(),
            value: "270,000".into(),
            trend: None,
        };
        let json = serde_json::to_value(&stat).unwrap();
        assert!(json.get("trend").is_none());
    }
}
