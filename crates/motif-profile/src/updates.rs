//! Field-level update operations for profile documents.
//!
//! A document update is a list of [`FieldUpdate`]s applied atomically by the
//! store. Array operations compare elements by exact value, so callers pass
//! sanitized records (see [`crate::sanitize`]).

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldOp {
    /// Append each value not already present.
    ArrayUnion(Vec<Value>),
    /// Remove every element equal to one of the values.
    ArrayRemove(Vec<Value>),
    /// Add to a numeric field, treating a missing field as zero.
    Increment(i64),
    /// Overwrite the field.
    Set(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub field: String,
    pub op: FieldOp,
}

#[derive(Debug, Default)]
pub struct DocumentUpdateBuilder(Vec<FieldUpdate>);

impl DocumentUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn array_union(self, field: impl Into<String>, value: Value) -> Self {
        self.push(field, FieldOp::ArrayUnion(vec![value]))
    }

    #[must_use]
    pub fn array_remove(self, field: impl Into<String>, value: Value) -> Self {
        self.push(field, FieldOp::ArrayRemove(vec![value]))
    }

    #[must_use]
    pub fn increment(self, field: impl Into<String>, by: i64) -> Self {
        self.push(field, FieldOp::Increment(by))
    }

    #[must_use]
    pub fn set(self, field: impl Into<String>, value: Value) -> Self {
        self.push(field, FieldOp::Set(value))
    }

    fn push(mut self, field: impl Into<String>, op: FieldOp) -> Self {
        self.0.push(FieldUpdate {
            field: field.into(),
            op,
        });
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<FieldUpdate> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn builder_keeps_operation_order() {
        let updates = DocumentUpdateBuilder::new()
            .increment("tags_contributed_count", 1)
            .array_union("tags_history", json!({"tag": "cozy"}))
            .build();
        assert_eq!(
            updates,
            vec![
                FieldUpdate {
                    field: "tags_contributed_count".into(),
                    op: FieldOp::Increment(1)
                },
                FieldUpdate {
                    field: "tags_history".into(),
                    op: FieldOp::ArrayUnion(vec![json!({"tag": "cozy"})])
                },
            ]
        );
    }
}
