//! EQ Inventory Search - Search items across every character's inventory export
//!
//! This library reads the tab-separated `<Character>-Inventory.txt` files the game client
//! writes and aggregates them into a single searchable index. It supports:
//!
//! - Parsing inventory exports, with coin rows converted to platinum
//! - Aggregating items per character and per location, with shared banks attributed to
//!   accounts and counted once
//! - Case-insensitive regex search over item names, with a literal item-ID fallback
//! - Detecting on-disk changes so long-running consumers can reload cheaply
//!
//! # Example
//!
//! ```no_run
//! use eq_inventory_search::{LoadOutcome, Scope, Settings, rebuild_index, search};
//! use std::path::PathBuf;
//!
//! let settings = Settings {
//!     search_directories: vec![PathBuf::from("/games/everquest")],
//!     ..Settings::default()
//! };
//! if let LoadOutcome::Loaded(inventory) = rebuild_index(&settings) {
//!     let results = search("bread", &inventory.index, &Scope::All, false);
//!     println!("{} matching items", results.item_count());
//! }
//! ```

pub mod cli;
pub mod config;
pub mod indexer;
pub mod logging;
pub mod models;
pub mod parsers;
pub mod search;
pub mod session;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use indexer::{LoadOutcome, LoadedInventory, NoInventory, needs_reload, rebuild_index};
pub use models::{InventoryIndex, Scope, SearchResults};
pub use parsers::parse_inventory;
pub use search::search;
pub use session::{InventorySession, PollOutcome};
pub use utils::format_location;
