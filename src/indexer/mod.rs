//! Aggregation of inventory exports into a searchable index
//!
//! # Error Handling Strategy
//!
//! Nothing in this module returns an error. Problems are reported as values:
//!
//! - **Directories**: Missing or unreadable directories become [`LoadWarning`]s during
//!   discovery and are otherwise treated as empty.
//! - **Files**: Unreadable files are skipped and reported as warnings; the rest of the
//!   pass continues.
//! - **No inventory**: [`LoadOutcome::NoInventory`] tells the caller there was nothing to
//!   load, and why.
//!
//! [`LoadWarning`]: crate::models::LoadWarning

pub mod builder;
pub mod discovery;
pub mod natural;
pub mod staleness;

pub use builder::{LoadOutcome, LoadedInventory, NoInventory, build_index_from_files, rebuild_index};
pub use discovery::{Discovery, discover_inventory_files};
pub use natural::natural_cmp;
pub use staleness::{ChangeDetector, POLL_INTERVAL, needs_reload};
