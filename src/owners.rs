//! Writes resolved owners to the local repository.
//!
//! Directories get an `OWNERS` file; documents get an `assignees` block
//! injected at the top of their front matter.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::{to_yaml, Assignees};

/// Name of the per-directory ownership file.
pub const OWNERS_FILE_NAME: &str = "OWNERS";

/// Front matter delimiter line.
pub const FRONT_MATTER_DELIMITER: &str = "---";

/// Serializes owners as `assignees: [...]`, sorted alphabetically.
pub fn to_assignees_yaml(owners: &[String]) -> Result<String> {
    to_yaml(&Assignees::new(owners)).context("Failed to serialize assignees")
}

/// Creates or truncates `<local_repo>/<dir>/OWNERS`.
pub fn write_owners_file(local_repo: &Path, dir: &str, owners: &[String]) -> Result<PathBuf> {
    let owners_path = local_repo.join(dir).join(OWNERS_FILE_NAME);
    let content = format!("{}\n", to_assignees_yaml(owners)?);

    fs::write(&owners_path, content)
        .with_context(|| format!("Failed to write {}", owners_path.display()))?;

    Ok(owners_path)
}

/// Injects an `assignees` block after the first front matter delimiter of
/// `<local_repo>/<document>`.
///
/// Returns `false` and leaves the file untouched when it has no delimiter.
pub fn inject_front_matter(local_repo: &Path, document: &str, owners: &[String]) -> Result<bool> {
    let document_path = local_repo.join(document);
    let content = fs::read_to_string(&document_path)
        .with_context(|| format!("Failed to read {}", document_path.display()))?;

    if !content.contains(FRONT_MATTER_DELIMITER) {
        return Ok(false);
    }

    let block = format!("{FRONT_MATTER_DELIMITER}\n{}", to_assignees_yaml(owners)?);
    let updated = content.replacen(FRONT_MATTER_DELIMITER, &block, 1);

    fs::write(&document_path, updated)
        .with_context(|| format!("Failed to write {}", document_path.display()))?;

    Ok(true)
}
