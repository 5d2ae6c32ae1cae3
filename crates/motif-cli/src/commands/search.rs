use anyhow::Context;
use motif_core::entities::{ContextFilters, DecoratedResult};
use motif_core::enums::ContextCategory;
use motif_search::SearchOutcome;
use motif_search::store::SEARCH_FAILED_TOAST;
use serde::Serialize;

use crate::cli::root_commands::SearchArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct SearchResponse<'a> {
    query: &'a str,
    filters: &'a ContextFilters,
    results: &'a [DecoratedResult],
}

/// One line per result for table output.
#[derive(Debug, Serialize)]
struct ResultRow {
    rank: usize,
    id: i64,
    title: String,
    year: String,
    score: String,
    runtime: String,
    director: String,
    unverified: bool,
}

fn result_rows(results: &[DecoratedResult]) -> Vec<ResultRow> {
    results
        .iter()
        .enumerate()
        .map(|(index, result)| ResultRow {
            rank: index + 1,
            id: result.id,
            title: result.title.clone(),
            year: result.year.clone(),
            score: format!("{:.2}", result.score),
            runtime: result.runtime.clone(),
            director: result.director.clone(),
            unverified: result.unverified,
        })
        .collect()
}

pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    for (category, value) in [
        (ContextCategory::Social, args.social.as_deref()),
        (ContextCategory::Mood, args.mood.as_deref()),
    ] {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            if !category.options().contains(&value) {
                tracing::debug!(%category, value, "using a custom context value");
            }
            ctx.search.toggle_context_filter(category, value);
        }
    }

    let query = args.query();
    match ctx
        .search
        .search(Some(query.as_str()))
        .await
        .context(SEARCH_FAILED_TOAST)?
    {
        SearchOutcome::Skipped => anyhow::bail!("search text is empty"),
        SearchOutcome::Superseded => anyhow::bail!("search was superseded"),
        SearchOutcome::Applied(count) => tracing::debug!(count, "search applied"),
    }

    let state = ctx.search.snapshot();

    if let Some(rank) = args.select {
        let result = usize::try_from(rank)
            .ok()
            .and_then(|rank| state.results.get(rank - 1))
            .cloned()
            .with_context(|| {
                format!("--select {rank} is out of range ({} results)", state.results.len())
            })?;
        ctx.search.select_result(result);
        let selected = ctx.search.snapshot().selected;
        return output(&selected, flags.format);
    }

    match flags.format {
        OutputFormat::Table => output(&result_rows(&state.results), flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(
            &SearchResponse {
                query: &state.query,
                filters: &state.filters,
                results: &state.results,
            },
            flags.format,
        ),
    }
}

#[cfg(test)]
mod tests {
    use motif_core::entities::RawSearchResult;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::result_rows;

    #[test]
    fn rows_are_ranked_from_one_with_rounded_scores() {
        let raw: Vec<RawSearchResult> = serde_json::from_value(json!([
            {"id": 9, "title": "Heat", "year": 1995, "score": 0.934},
            {"title": "Mystery"}
        ]))
        .unwrap();
        let results: Vec<_> = raw.iter().map(motif_core::decorate).collect();

        let rows = result_rows(&results);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].rank, rows[0].id, rows[0].title.as_str()), (1, 9, "Heat"));
        assert_eq!(rows[0].score, "0.93");
        assert_eq!(rows[1].rank, 2);
        assert!(rows[1].unverified);
    }
}
