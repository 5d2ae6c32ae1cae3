mod list;
mod toggle;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SavedCommands;
use crate::context::AppContext;

/// Handle `motif saved <subcommand>`.
pub async fn handle(action: &SavedCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        SavedCommands::List(args) => list::handle(args, ctx, flags).await,
        SavedCommands::Add(args) => toggle::handle_add(args, ctx, flags).await,
        SavedCommands::Remove(args) => toggle::handle_remove(args, ctx, flags).await,
    }
}
