//! General application configuration.

use serde::{Deserialize, Serialize};

fn default_suggestions() -> Vec<String> {
    ["Nestlé", "BP", "Shein", "Monsanto (Bayer)", "Amazon", "Meta"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_graph_width() -> u32 {
    800
}

const fn default_graph_height() -> u32 {
    400
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Quick-pick targets offered on the home view.
    #[serde(default = "default_suggestions")]
    pub suggestions: Vec<String>,

    /// Open exported documents in the system browser.
    #[serde(default)]
    pub open_exports: bool,

    /// Relationship graph canvas width.
    #[serde(default = "default_graph_width")]
    pub graph_width: u32,

    /// Relationship graph canvas height.
    #[serde(default = "default_graph_height")]
    pub graph_height: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            suggestions: default_suggestions(),
            open_exports: false,
            graph_width: default_graph_width(),
            graph_height: default_graph_height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(!config.open_exports);
        assert_eq!(config.suggestions[0], "Nestlé");
        assert_eq!(config.suggestions[3], "Monsanto (Bayer)");
        assert_eq!((config.graph_width, config.graph_height), (800, 400));
    }
}
