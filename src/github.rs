//! Repository hosting API: directory listings and commit history.

pub mod client;

use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use client::GitHubClient;

/// Number of commits requested per history page.
pub const COMMITS_PER_PAGE: u32 = 200;

/// Kind of a directory entry as reported by the hosting API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Dir,
    /// Symlinks, submodules and anything else the walker ignores.
    #[serde(other)]
    Other,
}

/// A single entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// File name without its parent path.
    pub name: String,
    /// Path relative to the repository root.
    pub path: String,
    /// Entry kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// A commit touching a queried path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitRecord {
    /// Login of the commit author, when GitHub could map the author to an account.
    pub author: Option<String>,
    /// Full commit message.
    pub message: Option<String>,
}

impl CommitRecord {
    /// Creates a commit record with both author and message present.
    pub fn new(author: &str, message: &str) -> Self {
        Self {
            author: Some(author.to_string()),
            message: Some(message.to_string()),
        }
    }
}

/// One page of commit history.
#[derive(Debug, Clone, Default)]
pub struct CommitPage {
    /// Commits in the order returned by the API (newest first).
    pub commits: Vec<CommitRecord>,
    /// Page number to request next, `None` on the last page.
    pub next_page: Option<u32>,
}

/// Trait for repository hosting services.
pub trait RepositoryHost: Send + Sync {
    /// Lists the entries of a directory. An empty path lists the repository root.
    fn list_directory<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DirectoryEntry>>> + Send + 'a>>;

    /// Lists one page of commits touching `path`. Pages are numbered from 1.
    fn list_commits<'a>(
        &'a self,
        path: &'a str,
        page: u32,
    ) -> Pin<Box<dyn Future<Output = Result<CommitPage>> + Send + 'a>>;
}
