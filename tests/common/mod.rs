//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use eq_inventory_search::Settings;
use eq_inventory_search::config::AccountConfig;
use tempfile::TempDir;

pub const HEADER: &str = "Location\tName\tID\tCount\tSlots";

/// Builder for creating test inventory directories
pub struct InventoryDirBuilder {
    temp_dir: TempDir,
}

impl InventoryDirBuilder {
    /// Create a new builder with an empty directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add `<character>-Inventory.txt` with a header and the given rows
    pub fn with_inventory(self, character: &str, rows: &[RowBuilder]) -> Self {
        let body: String = rows.iter().map(|r| format!("{}\n", r.to_line())).collect();
        self.with_raw(character, &format!("{}\n{}", HEADER, body))
    }

    /// Add an inventory file with exactly `content`
    pub fn with_raw(self, character: &str, content: &str) -> Self {
        let path = self.file_path(character);
        fs::write(&path, content).expect("Failed to write inventory file");
        self
    }

    /// Set the modification time of a character's file to `secs_ago` seconds in the past
    pub fn aged(self, character: &str, secs_ago: u64) -> Self {
        set_age(&self.file_path(character), secs_ago);
        self
    }

    /// Add a file in the directory that is not an inventory export
    pub fn with_other_file(self, name: &str, content: &str) -> Self {
        fs::write(self.temp_dir.path().join(name), content).expect("Failed to write file");
        self
    }

    pub fn file_path(&self, character: &str) -> PathBuf {
        self.temp_dir.path().join(format!("{}-Inventory.txt", character))
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for InventoryDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for one tab-separated inventory row
pub struct RowBuilder {
    location: String,
    name: String,
    id: String,
    count: u64,
    slots: u64,
}

impl RowBuilder {
    pub fn new(location: &str, name: &str, id: &str, count: u64) -> Self {
        Self {
            location: location.to_string(),
            name: name.to_string(),
            id: id.to_string(),
            count,
            slots: 0,
        }
    }

    /// A coin row, `copper` being the raw count the client writes
    pub fn coins(location: &str, copper: u64) -> Self {
        Self::new(&format!("{}-Coin", location), "Currency", "0", copper)
    }

    pub fn slots(mut self, slots: u64) -> Self {
        self.slots = slots;
        self
    }

    pub fn to_line(&self) -> String {
        format!("{}\t{}\t{}\t{}\t{}", self.location, self.name, self.id, self.count, self.slots)
    }
}

pub fn set_age(path: &Path, secs_ago: u64) {
    let modified = SystemTime::now() - Duration::from_secs(secs_ago);
    File::options()
        .write(true)
        .open(path)
        .and_then(|file| file.set_modified(modified))
        .expect("Failed to set modification time");
}

pub fn settings_for(dirs: &[&Path]) -> Settings {
    Settings {
        search_directories: dirs.iter().map(|d| d.to_path_buf()).collect(),
        ..Settings::default()
    }
}

pub fn account(name: &str, characters: &[&str]) -> AccountConfig {
    AccountConfig {
        name: name.to_string(),
        characters: characters.iter().map(|c| c.to_string()).collect(),
    }
}

/// Two characters on one account plus an unaffiliated third
///
/// `Alice` is newer than `Bob`, so Alice's shared bank is the live one.
pub fn realistic_inventory_dir() -> TempDir {
    InventoryDirBuilder::new()
        .with_inventory(
            "Alice",
            &[
                RowBuilder::new("General1", "Cloth Cap", "1001", 1),
                RowBuilder::new("General2-Slot3", "Bread Cakes", "13078", 20),
                RowBuilder::new("Bank1", "Water Flask", "13006", 10),
                RowBuilder::new("SharedBank1", "Fine Steel Sword", "5019", 1),
                RowBuilder::coins("General", 12345),
            ],
        )
        .aged("Alice", 60)
        .with_inventory(
            "Bob",
            &[
                RowBuilder::new("General1", "Cloth Cap", "1001", 2),
                RowBuilder::new("SharedBank1", "Rusty Dagger", "7007", 1),
            ],
        )
        .aged("Bob", 3600)
        .with_inventory(
            "Zed",
            &[
                RowBuilder::new("Primary", "Bread Cakes", "13078", 5),
                RowBuilder::new("Bank2-Slot1", "Cloth Cap", "1001", 4),
            ],
        )
        .aged("Zed", 120)
        .build()
}

pub fn realistic_settings(dir: &Path) -> Settings {
    let mut settings = settings_for(&[dir]);
    settings.accounts = vec![account("Main", &["Alice", "Bob"])];
    settings
}
