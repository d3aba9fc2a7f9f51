use gt_backend::secret_store::{self, GEMINI_KEY};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::KeyCommands;
use crate::context::AppContext;
use crate::output::output;
use crate::prompt;

#[derive(Debug, Serialize)]
struct KeyResponse {
    status: String,
    key: Option<String>,
    note: Option<String>,
}

/// `AIza…wXyZ`: enough to tell keys apart, never the whole secret.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

/// Handle `gtrace key <subcommand>`.
pub fn handle(action: &KeyCommands, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let response = match action {
        KeyCommands::Set { key } => {
            let key = prompt::value_or_prompt(key.as_deref(), "Gemini API key: ", "API key")?;
            GEMINI_KEY.store(&key)?;
            let source = GEMINI_KEY
                .load_with_source()
                .map_or_else(|| "missing".to_string(), |(_, source)| source.to_string());
            KeyResponse {
                status: source,
                key: Some(mask(&key)),
                note: Some("stored locally; only sent to the Gemini endpoint".into()),
            }
        }
        KeyCommands::Show => match secret_store::resolve_api_key(&ctx.config.gemini.api_key) {
            Some((key, source)) => KeyResponse {
                status: source.to_string(),
                key: Some(mask(&key)),
                note: None,
            },
            None => KeyResponse {
                status: "missing".into(),
                key: None,
                note: Some("run `gtrace key set`".into()),
            },
        },
        KeyCommands::Clear => {
            GEMINI_KEY.delete()?;
            let note = ctx
                .config
                .gemini
                .is_configured()
                .then(|| "a key is still configured via GHOSTTRACE_GEMINI__API_KEY or config".to_string());
            KeyResponse {
                status: "cleared".into(),
                key: None,
                note,
            }
        }
    };
    output(&response, flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::mask;

    #[test]
    fn mask_keeps_only_the_ends() {
        assert_eq!(mask("AIzaSyD-abcdefghijklmnop1234"), "AIza…1234");
        assert_eq!(mask("short"), "*****");
    }
}
