//! Crawl configuration, built once at startup and passed by reference.

pub mod fallback;

use std::path::PathBuf;

use anyhow::Result;

pub use fallback::FallbackOwnerTable;

use crate::error::OwnersError;
use crate::github::client::DEFAULT_API_URL;
use crate::ranking::RankingOptions;

/// Default maximum recursion depth of the tree walk.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Repository the crawl reads from.
#[derive(Debug, Clone)]
pub struct GitHubTarget {
    /// Static access token.
    pub token: String,
    /// Organization or user owning the repository.
    pub org: String,
    /// Repository name.
    pub repo: String,
    /// REST API base URL.
    pub api_url: String,
}

impl GitHubTarget {
    /// Creates a target against the public GitHub API.
    pub fn new(token: impl Into<String>, org: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            org: org.into(),
            repo: repo.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Immutable configuration of one crawl.
#[derive(Debug, Clone)]
pub struct Config {
    /// Remote repository.
    pub github: GitHubTarget,
    /// Crawl root relative to the repository root, empty for the root itself.
    pub top_dir: String,
    /// Local checkout mirroring the remote repository; output is written here.
    pub local_repo: PathBuf,
    /// Directories deeper than this are not visited.
    pub max_depth: usize,
    /// Ranking parameters.
    pub ranking: RankingOptions,
    /// Resolve and print owners without writing any file.
    pub dry_run: bool,
}

impl Config {
    /// Creates a configuration with default crawl and ranking settings.
    pub fn new(github: GitHubTarget, local_repo: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            github,
            top_dir: String::new(),
            local_repo: local_repo.into(),
            max_depth: DEFAULT_MAX_DEPTH,
            ranking: RankingOptions::with_default_fallback()?,
            dry_run: false,
        })
    }
}

/// Picks the first non-empty token, failing when none is available.
pub fn resolve_token(flag: Option<&str>, fallback: Option<String>) -> Result<String> {
    flag.map(str::to_string)
        .filter(|token| !token.trim().is_empty())
        .or_else(|| fallback.filter(|token| !token.trim().is_empty()))
        .ok_or_else(|| OwnersError::MissingToken.into())
}
