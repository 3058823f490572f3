use std::collections::BTreeSet;

use super::query::ItemQuery;
use crate::models::{CharacterEntry, InventoryIndex, ItemEntry, ResultRow, RowKind, Scope, SearchResults};
use crate::utils::format_location;

/// Search the index for items whose name or ID matches `query`
///
/// An empty query yields an empty result. Otherwise the result is either one
/// row per matching item (in index order) or a single "no matching items" row.
///
/// With [`Scope::All`] each item row holds one row per holder, each of which
/// holds one row per location. With [`Scope::Holder`] only items that holder
/// has are listed, counted for that holder alone, with location rows directly
/// underneath.
///
/// `matched_labels` lists every holder of every matching item regardless of
/// scope, so a selector can show where else a match lives.
///
/// # Examples
///
/// ```
/// use eq_inventory_search::models::{InventoryIndex, ItemEntry, Scope};
/// use eq_inventory_search::search::search;
///
/// let mut cap = ItemEntry::new("1001", "Cloth Cap");
/// cap.add("Alice", "General1", 2);
/// let index = InventoryIndex { items: vec![cap] };
///
/// let results = search("cap", &index, &Scope::All, false);
/// assert_eq!(results.rows[0].label, "Cloth Cap");
/// assert_eq!(results.rows[0].count, Some(2));
/// assert!(results.matched_labels.contains("Alice"));
/// ```
pub fn search(query: &str, index: &InventoryIndex, scope: &Scope, show_item_ids: bool) -> SearchResults {
    if query.is_empty() {
        return SearchResults::default();
    }

    let query = ItemQuery::new(query);
    let mut rows = Vec::new();
    let mut matched_labels = BTreeSet::new();

    for item in index.iter().filter(|item| query.matches(item)) {
        matched_labels.extend(item.characters.iter().map(|c| c.label.clone()));

        let label = item_label(item, show_item_ids);
        match scope {
            Scope::All => {
                let mut row = ResultRow::new(RowKind::Item, label, item.total_count);
                row.children = item
                    .characters
                    .iter()
                    .map(|holder| {
                        let mut holder_row =
                            ResultRow::new(RowKind::Holder, holder.label.as_str(), holder.count);
                        holder_row.children = location_rows(holder);
                        holder_row
                    })
                    .collect();
                rows.push(row);
            }
            Scope::Holder(selected) => {
                if let Some(holder) = item.holder(selected)
                    && holder.count > 0
                {
                    let mut row = ResultRow::new(RowKind::Item, label, holder.count);
                    row.children = location_rows(holder);
                    rows.push(row);
                }
            }
        }
    }

    if rows.is_empty() {
        rows.push(ResultRow::no_results());
    }

    SearchResults { rows, matched_labels }
}

fn item_label(item: &ItemEntry, show_item_ids: bool) -> String {
    if show_item_ids {
        format!("{} ({})", item.name, item.item_id)
    } else {
        item.name.clone()
    }
}

fn location_rows(holder: &CharacterEntry) -> Vec<ResultRow> {
    holder
        .locations
        .iter()
        .map(|l| ResultRow::new(RowKind::Location, format_location(&l.location), l.count))
        .collect()
}
