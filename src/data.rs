//! Data processing and serialization.

use serde::{Deserialize, Serialize};

pub mod yaml;

pub use yaml::*;

/// Ownership metadata as written to `OWNERS` files and document front matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignees {
    /// Owner logins in alphabetical order.
    pub assignees: Vec<String>,
}

impl Assignees {
    /// Creates the metadata from owner logins, sorting them alphabetically.
    pub fn new(owners: &[String]) -> Self {
        let mut assignees = owners.to_vec();
        assignees.sort();
        Self { assignees }
    }
}
