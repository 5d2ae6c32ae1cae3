use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ContextCategory;

/// Active context-filter selections: at most one value per category.
///
/// Values are free-text hints appended to the query, not structured
/// parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContextFilters(BTreeMap<ContextCategory, String>);

impl ContextFilters {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active value for `category`, if any.
    #[must_use]
    pub fn get(&self, category: ContextCategory) -> Option<&str> {
        self.0.get(&category).map(String::as_str)
    }

    /// Toggle `value` in `category`.
    ///
    /// Selecting the active value clears it; any other value replaces the
    /// category's selection.
    pub fn toggle(&mut self, category: ContextCategory, value: &str) {
        if self.get(category) == Some(value) {
            self.0.remove(&category);
        } else {
            self.0.insert(category, value.to_string());
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Active values in category order (social, then mood).
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }

    /// Space-joined active values.
    #[must_use]
    pub fn hint_text(&self) -> String {
        self.values().collect::<Vec<_>>().join(" ")
    }
}
