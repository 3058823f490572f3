//! Persisted user settings
//!
//! Stored as pretty-printed JSON and written atomically (temp file + rename) so a
//! crash mid-save never leaves a truncated settings file behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::utils::resolve_inventory_directory;

/// Suffix appended to an account name to form its holder label
pub const ACCOUNT_LABEL_SUFFIX: &str = " (Account)";

/// A named group of characters sharing one shared bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub name: String,
    #[serde(default)]
    pub characters: Vec<String>,
}

impl AccountConfig {
    /// Holder label used for shared-bank items, e.g. `Main (Account)`
    pub fn label(&self) -> String {
        account_label(&self.name)
    }
}

pub fn account_label(name: &str) -> String {
    format!("{}{}", name, ACCOUNT_LABEL_SUFFIX)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub search_directories: Vec<PathBuf>,
    /// Ordered so that "first declared account wins" is well defined
    pub accounts: Vec<AccountConfig>,
    pub ignored_characters: Vec<String>,
    pub sort_characters: bool,
    pub show_item_ids: bool,
}

impl Settings {
    /// Load settings from `path`
    ///
    /// A missing file yields the defaults. A file that exists but can't be read
    /// or parsed is an error, so a typo never silently discards configuration.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        if json.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))
    }

    /// Save settings to `path` atomically, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create settings directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        let mut temp = path.as_os_str().to_owned();
        temp.push(".tmp");
        let temp = PathBuf::from(temp);

        fs::write(&temp, json).context("Failed to write settings temp file")?;
        fs::rename(&temp, path).context("Failed to rename settings temp file")?;
        Ok(())
    }

    /// Add an inventory directory (or the directory of an inventory file)
    ///
    /// Returns the normalized directory, or `None` if it was already configured.
    pub fn add_directory(&mut self, path: &Path) -> Result<Option<PathBuf>> {
        let directory = resolve_inventory_directory(path)?;
        if self.search_directories.contains(&directory) {
            return Ok(None);
        }
        self.search_directories.push(directory.clone());
        Ok(Some(directory))
    }

    /// Remove a configured directory, matching either the stored or normalized form
    pub fn remove_directory(&mut self, path: &Path) -> bool {
        let normalized = path.canonicalize().ok();
        let before = self.search_directories.len();
        self.search_directories
            .retain(|dir| dir.as_path() != path && Some(dir) != normalized.as_ref());
        self.search_directories.len() != before
    }

    /// Account that owns `character`, the first declared one if several list it
    pub fn account_for(&self, character: &str) -> Option<&AccountConfig> {
        self.accounts.iter().find(|account| account.characters.iter().any(|c| c == character))
    }

    /// Put `character` on `account`, creating the account if needed
    ///
    /// The character is taken off every other account first so that it only ever
    /// belongs to one.
    pub fn assign_to_account(&mut self, account: &str, character: &str) -> Result<()> {
        if account.trim().is_empty() {
            bail!("Account name must not be empty");
        }
        if character.trim().is_empty() {
            bail!("Character name must not be empty");
        }

        for existing in &mut self.accounts {
            existing.characters.retain(|c| c != character);
        }

        match self.accounts.iter_mut().find(|a| a.name == account) {
            Some(existing) => existing.characters.push(character.to_string()),
            None => self.accounts.push(AccountConfig {
                name: account.to_string(),
                characters: vec![character.to_string()],
            }),
        }
        Ok(())
    }

    /// Take `character` off whichever account lists it
    pub fn remove_from_account(&mut self, character: &str) -> bool {
        let mut removed = false;
        for account in &mut self.accounts {
            let before = account.characters.len();
            account.characters.retain(|c| c != character);
            removed |= account.characters.len() != before;
        }
        removed
    }

    pub fn remove_account(&mut self, account: &str) -> bool {
        let before = self.accounts.len();
        self.accounts.retain(|a| a.name != account);
        self.accounts.len() != before
    }

    pub fn is_ignored(&self, character: &str) -> bool {
        self.ignored_characters.iter().any(|c| c == character)
    }

    /// Exclude a character from aggregation; returns false if already ignored
    pub fn ignore_character(&mut self, character: &str) -> bool {
        if self.is_ignored(character) {
            return false;
        }
        self.ignored_characters.push(character.to_string());
        true
    }

    pub fn unignore_character(&mut self, character: &str) -> bool {
        let before = self.ignored_characters.len();
        self.ignored_characters.retain(|c| c != character);
        self.ignored_characters.len() != before
    }
}
