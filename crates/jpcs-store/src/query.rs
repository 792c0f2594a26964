//! # Query Semantics
//!
//! Linear-scan filtering and full-sort ordering shared by every backend.
//! Semantics follow the original storage shim exactly:
//!
//! - `==` / `!=` are value equality on the JSON representation. A missing
//!   field never satisfies `==` and always satisfies `!=`.
//! - `>` / `<` use native ordering per value type: numbers numerically,
//!   strings lexicographically (which covers ISO date-like strings).
//!   Mixed-type or missing operands are unordered and never match.
//! - Ordering is a stable full sort; unordered comparisons rank as equal,
//!   so ties keep original collection order.

use std::cmp::Ordering;

use serde_json::Value;

use crate::document::Document;

/// Filter operator for [`crate::DocumentStore::query_where`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Lt,
}

impl FilterOp {
    /// Parse the operator's wire spelling (`==`, `!=`, `>`, `<`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "==" => Some(FilterOp::Eq),
            "!=" => Some(FilterOp::Ne),
            ">" => Some(FilterOp::Gt),
            "<" => Some(FilterOp::Lt),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            FilterOp::Eq => "==",
            FilterOp::Ne => "!=",
            FilterOp::Gt => ">",
            FilterOp::Lt => "<",
        };
        write!(f, "{s}")
    }
}

/// Sort direction for [`crate::DocumentStore::query_order_limit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Compare two JSON values using native per-type ordering.
///
/// Returns `None` for mixed-type or non-comparable operands.
fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            x.as_f64().and_then(|x| y.as_f64().and_then(|y| x.partial_cmp(&y)))
        }
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}

/// Keep the documents whose `field` satisfies `op value`.
pub fn apply_filter(docs: Vec<Document>, field: &str, op: FilterOp, value: &Value) -> Vec<Document> {
    docs.into_iter()
        .filter(|doc| {
            let actual = doc.field(field);
            match op {
                FilterOp::Eq => actual == Some(value),
                FilterOp::Ne => actual != Some(value),
                FilterOp::Gt => actual
                    .and_then(|a| compare_values(a, value))
                    .is_some_and(|o| o == Ordering::Greater),
                FilterOp::Lt => actual
                    .and_then(|a| compare_values(a, value))
                    .is_some_and(|o| o == Ordering::Less),
            }
        })
        .collect()
}

/// Stable full sort by `field`, then optional truncation.
pub fn sort_and_limit(
    mut docs: Vec<Document>,
    field: &str,
    direction: SortDirection,
    limit: Option<usize>,
) -> Vec<Document> {
    docs.sort_by(|a, b| {
        let ord = match (a.field(field), b.field(field)) {
            (Some(x), Some(y)) => compare_values(x, y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        };
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
    if let Some(n) = limit {
        docs.truncate(n);
    }
    docs
}
