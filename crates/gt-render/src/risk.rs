//! Risk factor severity.

use std::fmt;

use crate::style::Style;

/// Severity inferred from the wording of a risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// "critical" or "high" anywhere in the text is high, "medium" is medium,
    /// everything else is low. Case-insensitive.
    #[must_use]
    pub fn classify(factor: &str) -> Self {
        let lower = factor.to_lowercase();
        if lower.contains("critical") || lower.contains("high") {
            Self::High
        } else if lower.contains("medium") {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Paint `text` in this level's colour.
    #[must_use]
    pub fn paint(self, style: Style, text: &str) -> String {
        match self {
            Self::High => style.red(text),
            Self::Medium => style.paint("38;5;208", text),
            Self::Low => style.yellow(text),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("CRITICAL: active sanctions exposure", RiskLevel::High)]
    #[case("High reputational risk from boycotts", RiskLevel::High)]
    #[case("Medium: pending litigation", RiskLevel::Medium)]
    #[case("Supply chain opacity", RiskLevel::Low)]
    #[case("", RiskLevel::Low)]
    fn classifies_by_wording(#[case] factor: &str, #[case] expected: RiskLevel) {
        assert_eq!(RiskLevel::classify(factor), expected);
    }

    #[test]
    fn high_wins_over_medium() {
        assert_eq!(RiskLevel::classify("medium to high exposure"), RiskLevel::High);
    }
}
