use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// File name suffix of every inventory export
pub const INVENTORY_SUFFIX: &str = "-Inventory.txt";

/// An inventory export found in one of the search directories
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InventoryFile {
    pub directory: PathBuf,
    pub filename: String,
}

impl InventoryFile {
    pub fn new(directory: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self { directory: directory.into(), filename: filename.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    /// Character name, i.e. the file name without the inventory suffix
    pub fn character_name(&self) -> &str {
        self.filename.strip_suffix(INVENTORY_SUFFIX).unwrap_or(&self.filename)
    }

    pub fn modified(&self) -> std::io::Result<SystemTime> {
        std::fs::metadata(self.path())?.modified()
    }
}

/// A file that contributed to a completed aggregation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub character: String,
    pub account: Option<String>,
    pub path: PathBuf,
    pub modified: DateTime<Utc>,
    pub records: usize,
}

/// A recoverable problem encountered during discovery or aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadWarning {
    pub path: PathBuf,
    pub message: String,
}

impl LoadWarning {
    pub fn new(path: &Path, message: impl Into<String>) -> Self {
        Self { path: path.to_path_buf(), message: message.into() }
    }
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}
