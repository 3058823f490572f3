use std::collections::HashSet;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::models::{INVENTORY_SUFFIX, InventoryFile, LoadWarning};

/// Inventory files found in the search directories, plus anything that went wrong
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discovery {
    pub files: Vec<InventoryFile>,
    pub warnings: Vec<LoadWarning>,
}

/// Find every `<character>-Inventory.txt` directly inside the given directories
///
/// Directories are scanned in the order given, one level deep, with entries
/// sorted by file name so that repeated scans enumerate files identically. A
/// directory listed twice, under any spelling that resolves to the same place,
/// is only scanned once.
///
/// Missing or unreadable directories and entries are reported as warnings and
/// skipped; discovery itself never fails.
pub fn discover_inventory_files(directories: &[PathBuf]) -> Discovery {
    let mut discovery = Discovery::default();
    let mut seen = HashSet::new();

    for directory in directories {
        // Spellings like `eq/../eq` or a symlink still name one directory
        let key = directory.canonicalize().unwrap_or_else(|_| directory.clone());
        if !seen.insert(key) {
            continue;
        }

        if !directory.is_dir() {
            discovery.warnings.push(LoadWarning::new(directory, "Directory not found"));
            continue;
        }

        let walker = WalkDir::new(directory).min_depth(1).max_depth(1).sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(directory.as_path()).to_path_buf();
                    discovery
                        .warnings
                        .push(LoadWarning::new(&path, format!("Failed to read directory: {}", e)));
                    continue;
                }
            };

            // Follows symlinks to regular files
            if !entry.path().is_file() {
                continue;
            }

            let filename = entry.file_name().to_string_lossy();
            if filename.len() > INVENTORY_SUFFIX.len() && filename.ends_with(INVENTORY_SUFFIX) {
                discovery.files.push(InventoryFile::new(directory.clone(), filename.into_owned()));
            }
        }
    }

    discovery
}
