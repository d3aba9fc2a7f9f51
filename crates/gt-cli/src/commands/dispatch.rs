use gt_config::GhostConfig;

use crate::cli::{Commands, GlobalFlags};
use crate::commands;
use crate::context::AppContext;

pub async fn dispatch(command: Commands, flags: &GlobalFlags, config: GhostConfig) -> anyhow::Result<()> {
    let ctx = AppContext::open(config, flags.offline).await?;

    match command {
        Commands::Trace(args) => commands::trace::handle(&args, flags, &ctx).await,
        Commands::Suggestions(args) => commands::suggestions::handle(&args, flags, &ctx).await,
        Commands::History(args) => commands::history::handle(&args, flags, &ctx).await,
        Commands::Chat(args) => commands::chat::handle(&args, flags, &ctx).await,
        Commands::Export(args) => commands::export::handle(&args, flags, &ctx),
        Commands::Auth { action } => commands::auth::handle(&action, flags, &ctx).await,
        Commands::Key { action } => commands::key::handle(&action, flags, &ctx),
        Commands::Status => commands::status::handle(flags, &ctx).await,
        Commands::Manual => commands::manual::handle(flags),
    }
}
