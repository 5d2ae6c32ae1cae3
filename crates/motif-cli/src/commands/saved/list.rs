use motif_core::entities::SessionUser;
use motif_core::enums::SavedList;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SavedListArgs;
use crate::commands::shared::session::require_hydrated_user;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct SavedRow {
    list: SavedList,
    id: i64,
    title: String,
    year: String,
    poster: Option<String>,
}

fn saved_rows(user: &SessionUser, only: Option<SavedList>) -> Vec<SavedRow> {
    SavedList::ALL
        .into_iter()
        .filter(|list| only.is_none_or(|only| only == *list))
        .flat_map(|list| {
            user.collection(list).iter().map(move |item| SavedRow {
                list,
                id: item.id,
                title: item.title.clone(),
                year: item.year.clone(),
                poster: item.poster.clone(),
            })
        })
        .collect()
}

pub async fn handle(args: &SavedListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let user = require_hydrated_user(ctx).await?;
    output(&saved_rows(&user, args.list.map(SavedList::from)), flags.format)
}

#[cfg(test)]
mod tests {
    use motif_core::entities::{SavedItem, SessionUser};
    use motif_core::enums::SavedList;
    use pretty_assertions::assert_eq;

    use super::saved_rows;

    fn user() -> SessionUser {
        let mut user = SessionUser::new("u1", "Ada", None, None);
        user.insert(SavedList::Hearts, SavedItem::new(9, "Heat", "1995", None).unwrap());
        user.insert(SavedList::Watchlist, SavedItem::new(27205, "Inception", "2010", None).unwrap());
        user.insert(SavedList::Hearts, SavedItem::new(603, "The Matrix", "1999", None).unwrap());
        user
    }

    #[test]
    fn lists_hearts_then_watchlist() {
        let rows = saved_rows(&user(), None);
        let ids: Vec<_> = rows.iter().map(|row| (row.list, row.id)).collect();
        assert_eq!(
            ids,
            vec![
                (SavedList::Hearts, 9),
                (SavedList::Hearts, 603),
                (SavedList::Watchlist, 27205),
            ]
        );
    }

    #[test]
    fn filters_to_one_list() {
        let rows = saved_rows(&user(), Some(SavedList::Watchlist));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Inception");
    }
}
