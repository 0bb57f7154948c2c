//! CLI interface for repo-owners.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{resolve_token, Config, FallbackOwnerTable, GitHubTarget, DEFAULT_MAX_DEPTH};
use crate::github::client::DEFAULT_API_URL;
use crate::github::GitHubClient;
use crate::ranking::resolve::{DEFAULT_BLOCKED_AUTHOR, DEFAULT_LIMIT};
use crate::ranking::{CommitFilter, RankingOptions};
use crate::utils::github_token_fallback;
use crate::walker::TreeWalker;

/// repo-owners: generates OWNERS files from GitHub commit history.
#[derive(Parser, Debug)]
#[command(name = "repo-owners")]
#[command(
    about = "Generates OWNERS files and document assignees from GitHub commit history",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// GitHub access token. Falls back to GITHUB_TOKEN, GH_TOKEN and the settings file.
    #[arg(long)]
    pub github_token: Option<String>,

    /// Organization or user owning the repository.
    #[arg(long, default_value = "kubernetes")]
    pub github_org: String,

    /// Repository name.
    #[arg(long, default_value = "kubernetes")]
    pub github_repo: String,

    /// Directory to start crawling from, relative to the repository root.
    #[arg(long)]
    pub top_dir: Option<String>,

    /// Local checkout of the repository where OWNERS files are written.
    #[arg(long)]
    pub local_repo: Option<PathBuf>,

    /// Maximum directory depth to crawl.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: usize,

    /// Number of top-ranked committers kept per path.
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,

    /// Login never listed as an owner from commit history. Repeatable.
    #[arg(long = "blocked-author", default_value = DEFAULT_BLOCKED_AUTHOR)]
    pub blocked_authors: Vec<String>,

    /// YAML file of `keyword: [login, ...]` fallback owners replacing the built-in table.
    #[arg(long)]
    pub fallback_owners: Option<PathBuf>,

    /// Count doc regeneration and file move commits towards ownership.
    #[arg(long)]
    pub keep_maintenance_commits: bool,

    /// GitHub REST API base URL.
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Print the resolved owners without writing any file.
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Builds the crawl configuration, resolving the token and fallback table.
    pub fn into_config(self) -> Result<Config> {
        let token = resolve_token(self.github_token.as_deref(), github_token_fallback())?;

        let fallback = match &self.fallback_owners {
            Some(path) => FallbackOwnerTable::load_from_path(path)?,
            None => FallbackOwnerTable::load_default()?,
        };

        let filter = if self.keep_maintenance_commits {
            CommitFilter::without_maintenance_markers()
        } else {
            CommitFilter::default()
        };

        Ok(Config {
            github: GitHubTarget {
                token,
                org: self.github_org,
                repo: self.github_repo,
                api_url: self.api_url,
            },
            top_dir: self.top_dir.unwrap_or_default(),
            local_repo: self.local_repo.unwrap_or_default(),
            max_depth: self.depth,
            ranking: RankingOptions {
                limit: self.limit,
                blocked_authors: self.blocked_authors,
                filter,
                fallback,
            },
            dry_run: self.dry_run,
        })
    }

    /// Executes the crawl.
    pub async fn execute(self) -> Result<()> {
        let config = self.into_config()?;
        let client = GitHubClient::new(
            config.github.token.clone(),
            config.github.org.clone(),
            config.github.repo.clone(),
            config.github.api_url.clone(),
        );

        let summary = TreeWalker::new(&client, &config)
            .run()
            .await
            .with_context(|| {
                format!(
                    "Failed to crawl {}/{}",
                    config.github.org, config.github.repo
                )
            })?;

        println!("✅ Done: {summary}");
        Ok(())
    }
}
