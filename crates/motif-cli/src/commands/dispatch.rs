use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Search(args) => commands::search::handle(&args, ctx, flags).await,
        Commands::Contexts => commands::contexts::handle(flags),
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Saved { action } => commands::saved::handle(&action, ctx, flags).await,
        Commands::Tag(args) => commands::tag::handle(&args, ctx, flags).await,
    }
}
