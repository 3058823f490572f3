use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Selector entry meaning "every character and account"
pub const ALL_SCOPE: &str = "All";
/// Text of the row shown when a query matches nothing
pub const NO_RESULTS_LABEL: &str = "No matching items found.";

/// Which holder a search is restricted to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scope {
    #[default]
    All,
    Holder(String),
}

impl Scope {
    /// Build a scope from a selector label, treating `All` as the universal entry
    pub fn from_label(label: &str) -> Self {
        if label == ALL_SCOPE { Self::All } else { Self::Holder(label.to_string()) }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_SCOPE,
            Self::Holder(label) => label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    Item,
    Holder,
    Location,
    NoResults,
}

/// One node of the search result tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRow {
    pub kind: RowKind,
    pub label: String,
    pub count: Option<u64>,
    pub children: Vec<ResultRow>,
}

impl ResultRow {
    pub fn new(kind: RowKind, label: impl Into<String>, count: u64) -> Self {
        Self { kind, label: label.into(), count: Some(count), children: Vec::new() }
    }

    pub fn no_results() -> Self {
        Self {
            kind: RowKind::NoResults,
            label: NO_RESULTS_LABEL.to_string(),
            count: None,
            children: Vec::new(),
        }
    }
}

/// A result row with its depth in the tree, for line-oriented output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow<'a> {
    pub depth: usize,
    pub kind: RowKind,
    pub label: &'a str,
    pub count: Option<u64>,
}

/// Output of a search: the result tree and every holder label seen in a match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    pub rows: Vec<ResultRow>,
    pub matched_labels: BTreeSet<String>,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when the query ran and matched nothing
    pub fn is_no_results(&self) -> bool {
        matches!(self.rows.as_slice(), [row] if row.kind == RowKind::NoResults)
    }

    /// Number of item rows (the sentinel row is not counted)
    pub fn item_count(&self) -> usize {
        self.rows.iter().filter(|r| r.kind != RowKind::NoResults).count()
    }

    /// Depth-first walk of the tree
    pub fn flatten(&self) -> Vec<FlatRow<'_>> {
        fn walk<'a>(rows: &'a [ResultRow], depth: usize, out: &mut Vec<FlatRow<'a>>) {
            for row in rows {
                out.push(FlatRow { depth, kind: row.kind, label: &row.label, count: row.count });
                walk(&row.children, depth + 1, out);
            }
        }

        let mut out = Vec::new();
        walk(&self.rows, 0, &mut out);
        out
    }
}
