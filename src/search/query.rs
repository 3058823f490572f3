use regex::{Regex, RegexBuilder};
use tracing::debug;

use crate::models::ItemEntry;

/// Upper bound on compiled pattern size, so a pathological query can't stall a keystroke
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Item names use either an apostrophe or a grave accent for the same glyph
const APOSTROPHE_CLASS: &str = "['`]";

/// A compiled search query
///
/// The query is treated as a case-insensitive regular expression against item
/// names. A query that isn't a valid pattern simply never matches a name; the
/// literal text is still matched against item IDs.
#[derive(Debug, Clone)]
pub struct ItemQuery {
    raw: String,
    pattern: Option<Regex>,
}

impl ItemQuery {
    pub fn new(raw: &str) -> Self {
        let rewritten = raw.replace('\'', APOSTROPHE_CLASS);
        let pattern = match RegexBuilder::new(&rewritten)
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
        {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                debug!(query = raw, error = %e, "Query is not a valid pattern, matching IDs only");
                None
            }
        };

        Self { raw: raw.to_string(), pattern }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Whether the query compiled as a pattern
    pub fn is_valid_pattern(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.pattern.as_ref().is_some_and(|pattern| pattern.is_match(name))
    }

    /// Literal substring test of the unmodified query against an item ID
    pub fn matches_id(&self, item_id: &str) -> bool {
        !self.raw.is_empty() && item_id.contains(&self.raw)
    }

    pub fn matches(&self, item: &ItemEntry) -> bool {
        self.matches_name(&item.name) || self.matches_id(&item.item_id)
    }
}
