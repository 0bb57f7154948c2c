//! Static fallback owners keyed by path keyword.
//!
//! The table guarantees a minimum of ownership coverage for areas whose
//! commit history is thin or dominated by bulk changes. Keys are matched as
//! plain substrings of the repository path, so `ha` also matches `sharding`.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::{from_yaml, read_yaml_file};
use crate::error::OwnersError;

/// Table shipped with the binary.
pub const DEFAULT_FALLBACK_OWNERS_YAML: &str = include_str!("../templates/fallback-owners.yaml");

/// Keyword to owner logins mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FallbackOwnerTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl FallbackOwnerTable {
    /// Loads the embedded default table.
    pub fn load_default() -> Result<Self> {
        from_yaml(DEFAULT_FALLBACK_OWNERS_YAML)
            .map_err(|e| OwnersError::FallbackTable(format!("embedded table: {e:#}")).into())
    }

    /// Loads a table from a YAML file of `keyword: [login, ...]` pairs.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        read_yaml_file(path)
            .map_err(|e| OwnersError::FallbackTable(format!("{}: {e:#}", path.display())).into())
    }

    /// Builds a table from in-memory entries.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into_iter().map(Into::into).collect()))
                .collect(),
        }
    }

    /// Returns the owners of every keyword contained in `path`.
    ///
    /// Empty logins are skipped.
    pub fn owners_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(keyword, _)| path.contains(keyword.as_str()))
            .flat_map(|(_, owners)| owners.iter().map(String::as_str))
            .filter(|owner| !owner.is_empty())
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keywords.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
