//! Item search over an aggregated inventory
//!
//! Searching never fails: an invalid pattern only disables name matching, and a
//! query that matches nothing produces a single "no matching items" row.

pub mod engine;
pub mod query;

pub use engine::search;
pub use query::ItemQuery;
