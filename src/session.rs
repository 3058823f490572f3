//! Holder of the current inventory for long-running consumers
//!
//! An [`InventorySession`] ties the change detector to the aggregator. Each
//! completed pass replaces the current inventory with a fresh `Arc`, so a
//! consumer that cloned the previous one keeps a consistent snapshot while a
//! new pass runs.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use crate::config::Settings;
use crate::indexer::{ChangeDetector, LoadOutcome, LoadedInventory, NoInventory, build_index_from_files};
use crate::models::{Scope, SearchResults};
use crate::search::search;

/// What a call to [`InventorySession::poll`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Nothing changed on disk since the last pass
    Unchanged,
    /// A pass ran and the current inventory was replaced
    Reloaded,
    /// A pass ran and found nothing to load
    NoInventory(NoInventory),
}

#[derive(Debug, Default)]
pub struct InventorySession {
    settings: Settings,
    detector: ChangeDetector,
    current: Option<Arc<LoadedInventory>>,
    no_inventory: Option<NoInventory>,
}

impl InventorySession {
    pub fn new(settings: Settings) -> Self {
        Self { settings, ..Self::default() }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Swap in new settings and force the next poll to reload
    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.detector.invalidate();
    }

    /// Display-only setting, so no reload is needed
    pub fn set_show_item_ids(&mut self, show: bool) {
        self.settings.show_item_ids = show;
    }

    /// The most recent successful pass, if any
    pub fn current(&self) -> Option<Arc<LoadedInventory>> {
        self.current.clone()
    }

    /// Why the most recent pass found nothing, if it did
    pub fn no_inventory(&self) -> Option<NoInventory> {
        self.no_inventory
    }

    pub fn last_loaded(&self) -> Option<SystemTime> {
        self.detector.last_loaded()
    }

    /// Check for changes and run a pass if any are found
    pub fn poll(&mut self) -> PollOutcome {
        if !self.detector.check(&self.settings.search_directories) {
            return PollOutcome::Unchanged;
        }
        self.reload()
    }

    /// Run a pass regardless of on-disk state
    pub fn force_reload(&mut self) -> PollOutcome {
        self.detector.refresh(&self.settings.search_directories);
        self.reload()
    }

    fn reload(&mut self) -> PollOutcome {
        // Stamped before reading so that writes during the pass trigger another one
        self.detector.mark_loaded(SystemTime::now());

        let outcome = build_index_from_files(
            self.detector.known_files(),
            &self.settings,
            self.detector.warnings().to_vec(),
        );

        match outcome {
            LoadOutcome::Loaded(inventory) => {
                debug!(items = inventory.index.len(), "Swapping in new inventory");
                self.current = Some(Arc::new(inventory));
                self.no_inventory = None;
                PollOutcome::Reloaded
            }
            LoadOutcome::NoInventory { reason, .. } => {
                self.current = None;
                self.no_inventory = Some(reason);
                PollOutcome::NoInventory(reason)
            }
        }
    }

    /// Search the current inventory; empty when nothing is loaded
    pub fn search(&self, query: &str, scope: &Scope) -> SearchResults {
        match &self.current {
            Some(inventory) => {
                search(query, &inventory.index, scope, self.settings.show_item_ids)
            }
            None => SearchResults::default(),
        }
    }
}
