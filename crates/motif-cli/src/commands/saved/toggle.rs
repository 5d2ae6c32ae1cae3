use motif_core::entities::SavedItem;
use motif_core::enums::SavedList;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{SavedAddArgs, SavedRemoveArgs};
use crate::commands::shared::session::require_hydrated_user;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SavedToggleResponse {
    list: SavedList,
    id: i64,
    saved: bool,
    changed: bool,
    count: usize,
}

pub async fn handle_add(args: &SavedAddArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let list = SavedList::from(args.list);
    let item = SavedItem::new(
        args.id,
        args.title.clone(),
        args.year.clone().unwrap_or_default(),
        args.poster.clone().filter(|poster| !poster.trim().is_empty()),
    )?;
    toggle(ctx, flags, list, item, true).await
}

pub async fn handle_remove(
    args: &SavedRemoveArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let list = SavedList::from(args.list);
    // The session removes the stored record for this id, whatever its fields.
    let item = SavedItem::new(args.id, "", "", None)?;
    toggle(ctx, flags, list, item, false).await
}

async fn toggle(
    ctx: &AppContext,
    flags: &GlobalFlags,
    list: SavedList,
    item: SavedItem,
    adding: bool,
) -> anyhow::Result<()> {
    let before = require_hydrated_user(ctx).await?;
    let id = item.id;
    let was_saved = before.contains(list, id);

    ctx.session.toggle_saved_item(list, item, adding).await?;

    let state = ctx.session.snapshot();
    let saved = state.is_saved(list, id);
    output(
        &SavedToggleResponse {
            list,
            id,
            saved,
            changed: saved != was_saved,
            count: state.user.map_or(0, |user| user.collection(list).len()),
        },
        flags.format,
    )
}
