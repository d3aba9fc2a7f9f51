use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SuggestionsArgs;
use crate::commands::trace;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SuggestionRow<'a> {
    #[serde(rename = "#")]
    position: usize,
    target: &'a str,
}

pub async fn handle(args: &SuggestionsArgs, flags: &GlobalFlags, ctx: &AppContext) -> anyhow::Result<()> {
    let suggestions = &ctx.config.general.suggestions;

    if let Some(position) = args.run {
        let query = position
            .checked_sub(1)
            .and_then(|index| suggestions.get(index))
            .with_context(|| format!("no suggestion #{position} (there are {})", suggestions.len()))?;
        let mut controller = ctx.controller()?;
        return trace::run(&mut controller, query, &args.export, flags, ctx).await;
    }

    let rows = suggestions
        .iter()
        .enumerate()
        .map(|(index, target)| SuggestionRow {
            position: index + 1,
            target,
        })
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}
