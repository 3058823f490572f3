//! Change detection for the known inventory file set
//!
//! Pure comparisons only: nothing here reads inventory contents. The caller polls
//! [`ChangeDetector::check`] on a fixed interval and runs an aggregation pass when
//! it reports `true`.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tracing::debug;

use super::discovery::discover_inventory_files;
use crate::models::{InventoryFile, LoadWarning};

/// How often interactive consumers should poll for changes
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Whether any known file changed since the last successful load
///
/// `last_loaded` of `None` means "never loaded" and always reports `true`.
/// Otherwise a file counts as changed when its modification time is strictly
/// newer. Files whose metadata can't be read are ignored here; a deleted file
/// shows up as a file-set change on the next [`ChangeDetector::refresh`].
pub fn needs_reload(files: &[InventoryFile], last_loaded: Option<SystemTime>) -> bool {
    let Some(last_loaded) = last_loaded else {
        return true;
    };

    files.iter().any(|file| match file.modified() {
        Ok(modified) => modified > last_loaded,
        Err(e) => {
            debug!(path = %file.path().display(), error = %e, "Skipping unreadable file metadata");
            false
        }
    })
}

/// Tracks the known file set and when it was last aggregated
#[derive(Debug, Clone, Default)]
pub struct ChangeDetector {
    known_files: Vec<InventoryFile>,
    last_loaded: Option<SystemTime>,
    warnings: Vec<LoadWarning>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn known_files(&self) -> &[InventoryFile] {
        &self.known_files
    }

    pub fn last_loaded(&self) -> Option<SystemTime> {
        self.last_loaded
    }

    /// Warnings from the most recent directory scan
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// Re-scan the directories and reset to "never loaded" if the file set changed
    ///
    /// Returns `true` when files were added or removed.
    pub fn refresh(&mut self, directories: &[PathBuf]) -> bool {
        let discovery = discover_inventory_files(directories);
        self.warnings = discovery.warnings;

        if discovery.files == self.known_files {
            return false;
        }

        debug!(
            before = self.known_files.len(),
            after = discovery.files.len(),
            "Inventory file set changed"
        );
        self.known_files = discovery.files;
        self.last_loaded = None;
        true
    }

    /// Refresh the file set, then report whether a reload is due
    pub fn check(&mut self, directories: &[PathBuf]) -> bool {
        self.refresh(directories);
        needs_reload(&self.known_files, self.last_loaded)
    }

    /// Record the start time of a successful aggregation pass
    pub fn mark_loaded(&mut self, at: SystemTime) {
        self.last_loaded = Some(at);
    }

    /// Force the next [`ChangeDetector::check`] to report a reload
    pub fn invalidate(&mut self) {
        self.last_loaded = None;
    }
}
