use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::models::INVENTORY_SUFFIX;

/// Resolve a user-supplied path to an inventory directory
///
/// Accepts either a directory or an inventory file inside it, in which case the
/// file's parent directory is used. The result is canonicalized so that the same
/// directory can't be configured twice under different spellings.
///
/// # Errors
///
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a file that isn't an inventory export
pub fn resolve_inventory_directory(path: &Path) -> Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if canonical.is_dir() {
        return Ok(canonical);
    }

    let is_inventory_file = canonical
        .file_name()
        .map(|name| name.to_string_lossy().ends_with(INVENTORY_SUFFIX))
        .unwrap_or(false);
    if !is_inventory_file {
        bail!(
            "Not a directory or an inventory file (*{}): {}",
            INVENTORY_SUFFIX,
            canonical.display()
        );
    }

    match canonical.parent() {
        Some(parent) => Ok(parent.to_path_buf()),
        None => bail!("Inventory file has no parent directory: {}", canonical.display()),
    }
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use eq_inventory_search::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/home/alice/EverQuest");
/// // Returns "~/EverQuest" when the home directory is /home/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, dirs::home_dir().as_deref())
}

/// Internal helper for path formatting with an explicit home directory (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return format!("~/{}", rest.to_string_lossy());
    }

    match path.to_string_lossy() {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}
