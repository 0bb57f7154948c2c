//! Owner list resolution for a directory or document.

use std::collections::BTreeSet;

use anyhow::Result;
use tracing::debug;

use super::{aggregate, AuthorScores, CommitFilter};
use crate::config::FallbackOwnerTable;
use crate::github::RepositoryHost;

/// Default number of ranked authors kept per path.
pub const DEFAULT_LIMIT: usize = 3;

/// Login that is never listed as an owner by default.
pub const DEFAULT_BLOCKED_AUTHOR: &str = "johndmulhausen";

/// Base weight of commits to the path itself.
const PATH_WEIGHT: f64 = 1.0;
/// Base weight of commits to the `README.md` twin of an `index.md`.
const README_WEIGHT: f64 = 1.5;
/// Base weight of commits to the `<dir>.md` overview of a directory.
const OVERVIEW_WEIGHT: f64 = 2.0;

/// Parameters of the ranking heuristic.
#[derive(Debug, Clone)]
pub struct RankingOptions {
    /// Ranked positions kept before fallback owners are added.
    pub limit: usize,
    /// Logins never listed from commit history.
    pub blocked_authors: Vec<String>,
    /// Commit filter applied during aggregation.
    pub filter: CommitFilter,
    /// Keyword owners added regardless of history.
    pub fallback: FallbackOwnerTable,
}

impl RankingOptions {
    /// Default options with the embedded fallback table.
    pub fn with_default_fallback() -> Result<Self> {
        Ok(Self::with_fallback(FallbackOwnerTable::load_default()?))
    }

    /// Default options with the given fallback table.
    pub fn with_fallback(fallback: FallbackOwnerTable) -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            blocked_authors: vec![DEFAULT_BLOCKED_AUTHOR.to_string()],
            filter: CommitFilter::default(),
            fallback,
        }
    }

    fn is_blocked(&self, author: &str) -> bool {
        self.blocked_authors.iter().any(|blocked| blocked == author)
    }
}

/// Resolves the owners of `path`.
///
/// History of the path is merged with the history of its `README.md` twin
/// (when the path names an `index.md`) and, for directories, of the
/// `<dir>.md` overview document next to it.
pub async fn resolve(
    host: &dyn RepositoryHost,
    options: &RankingOptions,
    path: &str,
    is_leaf_document: bool,
) -> Result<Vec<String>> {
    let mut scores = aggregate(host, &options.filter, path, PATH_WEIGHT).await?;

    let readme_path = path.replacen("index.md", "README.md", 1);
    scores.merge(aggregate(host, &options.filter, &readme_path, README_WEIGHT).await?);

    if !is_leaf_document {
        let overview_path = format!("{path}.md");
        scores.merge(aggregate(host, &options.filter, &overview_path, OVERVIEW_WEIGHT).await?);
    }

    debug!(path, authors = scores.len(), "Aggregated commit history");

    Ok(select_owners(path, &scores, options))
}

/// Turns aggregated scores into the final owner list.
///
/// Only the first `limit` ranked positions are considered and blocked
/// authors in them are dropped without being replaced.
pub fn select_owners(path: &str, scores: &AuthorScores, options: &RankingOptions) -> Vec<String> {
    let top: Vec<String> = scores
        .ranked()
        .into_iter()
        .take(options.limit)
        .map(|(author, _)| author)
        .filter(|author| !options.is_blocked(author))
        .map(str::to_string)
        .collect();

    augment_with_fallback(path, top, &options.fallback)
}

/// Adds the fallback owners matching `path` and returns a sorted, unique list.
pub fn augment_with_fallback(
    path: &str,
    owners: Vec<String>,
    fallback: &FallbackOwnerTable,
) -> Vec<String> {
    let mut unique: BTreeSet<String> = owners.into_iter().collect();
    unique.extend(fallback.owners_for(path).map(str::to_string));
    unique.into_iter().collect()
}
