//! Field manual.

use crate::style::Style;

struct Section {
    title: &'static str,
    body: &'static [&'static str],
}

const SECTIONS: &[Section] = &[
    Section {
        title: "System Overview",
        body: &[
            "GHOSTTRACE is an automated Open Source Intelligence (OSINT) aggregator powered by Gemini.",
            "It uses Google Search grounding to gather, analyze, and synthesize public data into",
            "structured intelligence reports.",
        ],
    },
    Section {
        title: "Configuration & Access",
        body: &[
            "1. API authorization: store a Google Gemini API key with `gtrace key set <KEY>`,",
            "   or set GHOSTTRACE_GEMINI__API_KEY.",
            "2. Key storage: the key stays on this machine (OS keychain, else ~/.ghosttrace/gemini_key)",
            "   and is only ever sent to Google's API endpoint.",
            "3. Model: defaults to gemini-2.5-flash; override with [gemini] model in config.toml.",
            "4. Accounts: `gtrace auth signup` needs the site registration password.",
        ],
    },
    Section {
        title: "Operation Protocol",
        body: &[
            "STEP 01 // TARGET      enter a person, company, or URL: `gtrace trace \"Acme Corp\"`.",
            "STEP 02 // EXECUTE     the model runs several grounded searches to build the profile.",
            "STEP 03 // ANALYZE     review the dossier, network, and timeline; export with --html.",
            "STEP 04 // INTERROGATE ask follow-up questions: `gtrace chat --report dossier.json`.",
        ],
    },
    Section {
        title: "Disclaimer",
        body: &[
            "For educational and authorized research purposes only. Findings are based on publicly",
            "available data and probabilistic AI reasoning. Verify critical information through",
            "primary sources.",
        ],
    },
];

/// Render the manual for the terminal.
#[must_use]
pub fn render_manual(style: Style) -> String {
    let mut out = style.cyan(&style.bold("FIELD MANUAL // PROTOCOLS"));
    out.push('\n');
    for section in SECTIONS {
        out.push('\n');
        out.push_str(&style.bold(&section.title.to_uppercase()));
        out.push('\n');
        for line in section.body {
            out.push_str("  ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_has_every_section() {
        let out = render_manual(Style::PLAIN);
        for title in ["SYSTEM OVERVIEW", "CONFIGURATION & ACCESS", "OPERATION PROTOCOL", "DISCLAIMER"] {
            assert!(out.contains(title), "missing {title}");
        }
    }
}
