//! Parser for tab-delimited inventory exports
//!
//! # Error Handling Strategy
//!
//! Parsing is best-effort and never fails:
//!
//! - **Malformed rows**: Rows that don't match the five-field layout are treated as absent.
//!   The export header row is dropped the same way.
//!
//! - **Currency and empty slots**: [`normalize_record`] filters empty slots and turns coin
//!   rows into whole-platinum `Coins` records, returning `None` for anything it drops.
//!
//! File-level failures (unreadable files) belong to the indexer, which reads the text
//! before handing it to [`parse_inventory`].

pub mod inventory;

pub use inventory::{SHARED_BANK_MARKER, is_shared_bank, normalize_record, parse_inventory};
