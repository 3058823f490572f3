//! Data models for aggregated inventories.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`ItemRecord`] - A single parsed row of an inventory export
//! - [`InventoryIndex`] - Aggregated items keyed by item ID, in natural ID order
//! - [`ItemEntry`] / [`CharacterEntry`] / [`LocationCount`] - Per-item, per-holder
//!   and per-location quantities
//! - [`InventoryFile`] / [`SourceFile`] / [`LoadWarning`] - Files seen by a pass
//! - [`SearchResults`] / [`ResultRow`] / [`Scope`] - Search output tree

pub mod inventory;
pub mod results;
pub mod source;

pub use inventory::{
    COIN_ITEM_ID, COIN_ITEM_NAME, CharacterEntry, InventoryIndex, ItemEntry, ItemRecord,
    LocationCount,
};
pub use results::{
    ALL_SCOPE, FlatRow, NO_RESULTS_LABEL, ResultRow, RowKind, Scope, SearchResults,
};
pub use source::{INVENTORY_SUFFIX, InventoryFile, LoadWarning, SourceFile};
