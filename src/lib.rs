//! # repo-owners
//!
//! Generates ownership metadata for a GitHub repository from its commit
//! history.
//!
//! The crawl walks the remote tree, ranks the top committers of every
//! directory and markdown document, tops the list up from a keyword-based
//! fallback table and writes the result into a local checkout:
//!
//! - `OWNERS` files (`assignees: [...]`) for directories;
//! - an `assignees` block in the front matter of documents.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repo_owners::config::{Config, GitHubTarget};
//! use repo_owners::github::GitHubClient;
//! use repo_owners::walker::TreeWalker;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::new(GitHubTarget::new("token", "kubernetes", "website"), "./website")?;
//! let client = GitHubClient::new(
//!     config.github.token.clone(),
//!     config.github.org.clone(),
//!     config.github.repo.clone(),
//!     config.github.api_url.clone(),
//! );
//! let summary = TreeWalker::new(&client, &config).run().await?;
//! println!("{summary}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod github;
pub mod owners;
pub mod ranking;
pub mod utils;
pub mod walker;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod test_utils;

pub use crate::cli::Cli;
pub use crate::error::OwnersError;

/// The current version of repo-owners.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
