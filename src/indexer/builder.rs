//! Aggregation pass over inventory exports.
//!
//! # Error Handling Strategy
//!
//! A pass follows a **graceful degradation** approach and never fails as a whole:
//!
//! - **File-level errors**: Files that can't be read (or whose modification time can't be
//!   queried) are skipped with a [`LoadWarning`] and a `tracing` warning. Records from every
//!   other file are kept intact.
//! - **Row-level errors**: Malformed rows are dropped by the parser and never reach this module.
//! - **Encoding**: File contents are decoded lossily, so stray non-UTF-8 bytes only affect the
//!   row they appear in.
//! - **No inventory**: Having no directories or no files is reported as
//!   [`LoadOutcome::NoInventory`], a normal outcome the caller decides how to present.
//!
//! # Shared banks
//!
//! Every character on an account sees the same shared bank, so its contents must be
//! counted once per account. Each account keeps a single live source: the most recently
//! modified file seen so far in the pass. A file older than the live source contributes
//! nothing to the shared bank. A file at least as new first retracts everything the
//! previous live source contributed, then becomes the live source itself.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::discovery::discover_inventory_files;
use super::natural::natural_cmp;
use crate::config::{AccountConfig, Settings, account_label};
use crate::models::{
    ALL_SCOPE, InventoryFile, InventoryIndex, ItemEntry, LoadWarning, SourceFile,
};
use crate::parsers::{is_shared_bank, normalize_record, parse_inventory};

/// Why a pass produced no inventory at all
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoInventory {
    /// No search directories are configured
    NoDirectories,
    /// Directories are configured but none contains an inventory file
    NoFiles,
}

impl NoInventory {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoDirectories => "No inventory directories are configured",
            Self::NoFiles => "No inventory files found in the configured directories",
        }
    }
}

impl fmt::Display for NoInventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a completed aggregation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedInventory {
    pub index: InventoryIndex,
    /// Selector entries: `All` first, then characters, then account labels
    pub characters: Vec<String>,
    pub sources: Vec<SourceFile>,
    pub warnings: Vec<LoadWarning>,
    pub loaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(LoadedInventory),
    NoInventory { reason: NoInventory, warnings: Vec<LoadWarning> },
}

/// Discover inventory files in the configured directories and aggregate them
///
/// This is a full rebuild: nothing from a previous pass is reused.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use eq_inventory_search::config::Settings;
/// use eq_inventory_search::indexer::{LoadOutcome, rebuild_index};
///
/// let settings = Settings {
///     search_directories: vec![PathBuf::from("/games/everquest")],
///     ..Settings::default()
/// };
/// match rebuild_index(&settings) {
///     LoadOutcome::Loaded(inventory) => println!("{} items", inventory.index.len()),
///     LoadOutcome::NoInventory { reason, .. } => eprintln!("{}", reason),
/// }
/// ```
pub fn rebuild_index(settings: &Settings) -> LoadOutcome {
    let discovery = discover_inventory_files(&settings.search_directories);
    build_index_from_files(&discovery.files, settings, discovery.warnings)
}

/// Aggregate an already discovered file set
///
/// `warnings` carries anything reported during discovery so that a single list
/// describes the whole pass. Files are processed in the order given.
pub fn build_index_from_files(
    files: &[InventoryFile],
    settings: &Settings,
    warnings: Vec<LoadWarning>,
) -> LoadOutcome {
    for warning in &warnings {
        warn!("{}", warning);
    }

    if files.is_empty() {
        let reason = if settings.search_directories.is_empty() {
            NoInventory::NoDirectories
        } else {
            NoInventory::NoFiles
        };
        debug!(%reason, "Nothing to aggregate");
        return LoadOutcome::NoInventory { reason, warnings };
    }

    let mut aggregator = Aggregator::new(settings, warnings);
    for file in files {
        aggregator.ingest(file);
    }
    LoadOutcome::Loaded(aggregator.finish())
}

/// One shared-bank row credited to an account, kept so it can be undone
#[derive(Debug)]
struct Contribution {
    item_id: String,
    location: String,
    count: u64,
}

/// The file currently supplying an account's shared bank
#[derive(Debug)]
struct SharedBankSource {
    character: String,
    modified: SystemTime,
    contributions: Vec<Contribution>,
}

struct Aggregator<'a> {
    settings: &'a Settings,
    items: HashMap<String, ItemEntry>,
    characters: Vec<String>,
    /// Keyed by account name, in the order accounts first became live
    shared_banks: Vec<(String, SharedBankSource)>,
    sources: Vec<SourceFile>,
    warnings: Vec<LoadWarning>,
}

impl<'a> Aggregator<'a> {
    fn new(settings: &'a Settings, warnings: Vec<LoadWarning>) -> Self {
        Self {
            settings,
            items: HashMap::new(),
            characters: Vec::new(),
            shared_banks: Vec::new(),
            sources: Vec::new(),
            warnings,
        }
    }

    fn skip_file(&mut self, file: &InventoryFile, message: String) {
        let warning = LoadWarning::new(&file.path(), message);
        warn!("Skipping inventory file: {}", warning);
        self.warnings.push(warning);
    }

    fn ingest(&mut self, file: &InventoryFile) {
        let character = file.character_name();
        if self.settings.is_ignored(character) {
            debug!(character, "Ignoring character");
            return;
        }

        let path = file.path();
        let modified = match file.modified() {
            Ok(modified) => modified,
            Err(e) => {
                self.skip_file(file, format!("Failed to read modification time: {}", e));
                return;
            }
        };
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.skip_file(file, format!("Failed to read file: {}", e));
                return;
            }
        };
        let text = String::from_utf8_lossy(&bytes);

        let settings = self.settings;
        let account = settings.account_for(character);
        let claims_shared_bank = match account {
            Some(account) => self.claim_shared_bank(account, character, modified),
            None => false,
        };

        if !self.characters.iter().any(|c| c == character) {
            self.characters.push(character.to_string());
        }

        let mut records = 0;
        for record in parse_inventory(&text).filter_map(normalize_record) {
            records += 1;

            let shared_account = account.filter(|_| is_shared_bank(&record.location));
            let holder = match shared_account {
                Some(_) if !claims_shared_bank => continue,
                Some(account) => account.label(),
                None => character.to_string(),
            };

            self.items
                .entry(record.item_id.clone())
                .or_insert_with(|| ItemEntry::new(&record.item_id, &record.name))
                .add(&holder, &record.location, record.count);

            if let Some(account) = shared_account
                && let Some(source) = self.live_source_mut(&account.name)
            {
                source.contributions.push(Contribution {
                    item_id: record.item_id,
                    location: record.location,
                    count: record.count,
                });
            }
        }

        debug!(
            character,
            account = account.map(|a| a.name.as_str()),
            records,
            shared_bank = claims_shared_bank,
            "Parsed inventory file"
        );

        self.sources.push(SourceFile {
            character: character.to_string(),
            account: account.map(|a| a.name.clone()),
            path,
            modified: DateTime::<Utc>::from(modified),
            records,
        });
    }

    fn live_source_mut(&mut self, account: &str) -> Option<&mut SharedBankSource> {
        self.shared_banks
            .iter_mut()
            .find(|(name, _)| name.as_str() == account)
            .map(|(_, source)| source)
    }

    /// Decide whether this file supplies the account's shared bank
    ///
    /// Returns `false` when a newer file already does. Otherwise the previous
    /// live source (if any) is retracted and this file takes its place.
    fn claim_shared_bank(
        &mut self,
        account: &AccountConfig,
        character: &str,
        modified: SystemTime,
    ) -> bool {
        let fresh = SharedBankSource {
            character: character.to_string(),
            modified,
            contributions: Vec::new(),
        };

        let Some(pos) = self.shared_banks.iter().position(|(name, _)| *name == account.name) else {
            self.shared_banks.push((account.name.clone(), fresh));
            return true;
        };

        if modified < self.shared_banks[pos].1.modified {
            debug!(
                character,
                account = account.name.as_str(),
                live = self.shared_banks[pos].1.character.as_str(),
                "Skipping shared bank from older file"
            );
            return false;
        }

        let previous = std::mem::replace(&mut self.shared_banks[pos].1, fresh);
        debug!(
            character,
            account = account.name.as_str(),
            replaced = previous.character.as_str(),
            retracted = previous.contributions.len(),
            "Newer file takes over shared bank"
        );
        self.retract(&account.label(), previous.contributions);
        true
    }

    fn retract(&mut self, holder: &str, contributions: Vec<Contribution>) {
        for contribution in contributions {
            let Some(item) = self.items.get_mut(&contribution.item_id) else {
                continue;
            };
            item.retract(holder, &contribution.location, contribution.count);
            if item.is_empty() {
                self.items.remove(&contribution.item_id);
            }
        }
    }

    fn finish(self) -> LoadedInventory {
        let mut items: Vec<ItemEntry> = self.items.into_values().collect();
        items.sort_by(|a, b| natural_cmp(&a.item_id, &b.item_id));

        let mut entries = self.characters;
        for (account, _) in &self.shared_banks {
            let label = account_label(account);
            if !entries.contains(&label) {
                entries.push(label);
            }
        }
        if self.settings.sort_characters {
            entries.sort();
        }

        let mut characters = Vec::with_capacity(entries.len() + 1);
        characters.push(ALL_SCOPE.to_string());
        characters.extend(entries);

        info!(
            items = items.len(),
            files = self.sources.len(),
            warnings = self.warnings.len(),
            "Aggregated inventory"
        );

        LoadedInventory {
            index: InventoryIndex { items },
            characters,
            sources: self.sources,
            warnings: self.warnings,
            loaded_at: Utc::now(),
        }
    }
}
