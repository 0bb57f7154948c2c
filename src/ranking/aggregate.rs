//! Commit history aggregation for a single path.

use anyhow::Result;
use tracing::{debug, trace};

use super::AuthorScores;
use crate::github::{CommitRecord, RepositoryHost};

/// Weight added after every counted commit.
pub const WEIGHT_INCREMENT: f64 = 0.001;

/// Messages of merge commits start with this marker.
pub const MERGE_COMMIT_PREFIX: &str = "Merge pull request";

/// Markers of bulk maintenance commits (doc regeneration, file moves).
pub const DEFAULT_MAINTENANCE_MARKERS: [&str; 2] = ["gendocs", "moving"];

/// Decides which commits count towards ownership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFilter {
    /// Commits whose message contains any of these substrings are skipped.
    pub maintenance_markers: Vec<String>,
}

impl Default for CommitFilter {
    fn default() -> Self {
        Self {
            maintenance_markers: DEFAULT_MAINTENANCE_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl CommitFilter {
    /// A filter that only drops merges and unattributed commits.
    pub fn without_maintenance_markers() -> Self {
        Self {
            maintenance_markers: Vec::new(),
        }
    }

    /// Returns the author login if the commit should be counted.
    pub fn counted_author<'c>(&self, commit: &'c CommitRecord) -> Option<&'c str> {
        let message = commit.message.as_deref()?;

        if message.starts_with(MERGE_COMMIT_PREFIX) {
            return None;
        }

        if self
            .maintenance_markers
            .iter()
            .any(|marker| message.contains(marker.as_str()))
        {
            return None;
        }

        commit.author.as_deref()
    }
}

/// Adds the counted commits of one page to `scores`.
///
/// `weight` is the weight of the next counted commit and grows by
/// [`WEIGHT_INCREMENT`] after each one, so it must be carried across pages.
pub fn score_commits(
    commits: &[CommitRecord],
    filter: &CommitFilter,
    weight: &mut f64,
    scores: &mut AuthorScores,
) {
    for commit in commits {
        match filter.counted_author(commit) {
            Some(author) => {
                scores.add(author, *weight);
                *weight += WEIGHT_INCREMENT;
            }
            None => trace!(?commit, "Skipping commit"),
        }
    }
}

/// Scores every author in the full commit history of `path`.
///
/// Pages are fetched until the host reports no further page. Commits seen
/// later (older ones, as history is newest first) weigh slightly more than
/// earlier ones.
pub async fn aggregate(
    host: &dyn RepositoryHost,
    filter: &CommitFilter,
    path: &str,
    base_weight: f64,
) -> Result<AuthorScores> {
    let mut scores = AuthorScores::new();
    let mut weight = base_weight;
    let mut page = 1;

    loop {
        let commit_page = host.list_commits(path, page).await?;
        debug!(
            path,
            page,
            commits = commit_page.commits.len(),
            "Aggregating commit page"
        );

        score_commits(&commit_page.commits, filter, &mut weight, &mut scores);

        match commit_page.next_page {
            Some(next) => page = next,
            None => break,
        }
    }

    Ok(scores)
}
