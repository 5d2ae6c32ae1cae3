use motif_core::enums::ContextCategory;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct ContextRow {
    category: &'static str,
    options: &'static [&'static str],
}

fn rows() -> Vec<ContextRow> {
    ContextCategory::ALL
        .into_iter()
        .map(|category| ContextRow {
            category: category.as_str(),
            options: category.options(),
        })
        .collect()
}

pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&rows(), flags.format)
}
