use crate::cli::GlobalFlags;
use crate::cli::root_commands::TagArgs;
use crate::commands::shared::session::require_hydrated_user;
use crate::context::AppContext;
use crate::output::output;

pub async fn handle(args: &TagArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let tag = args.tag.trim();
    if tag.is_empty() {
        anyhow::bail!("tag text is empty");
    }
    if args.movie_id <= 0 {
        anyhow::bail!("movie id must be positive, got {}", args.movie_id);
    }

    require_hydrated_user(ctx).await?;
    let record = ctx.session.submit_tag(args.movie_id, tag).await?;
    output(&record, flags.format)
}
