//! Contributor ranking from commit history.
//!
//! Scores are accumulated per author across the commit history of a path and
//! a few related paths, then turned into a short, alphabetically sorted
//! owner list.

pub mod aggregate;
pub mod resolve;

use std::cmp::Ordering;
use std::collections::BTreeMap;

pub use aggregate::{aggregate, CommitFilter, WEIGHT_INCREMENT};
pub use resolve::{augment_with_fallback, resolve, select_owners, RankingOptions};

/// Accumulated weight of one author.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AuthorScore {
    /// Sum of commit weights.
    pub score: f64,
    /// Secondary ranking key. Not populated from diff statistics, always zero.
    pub lines_changed: u64,
}

/// Per-author scores for one ranking query.
#[derive(Debug, Clone, Default)]
pub struct AuthorScores {
    scores: BTreeMap<String, AuthorScore>,
}

impl AuthorScores {
    /// Creates an empty score table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to the score of `author`.
    pub fn add(&mut self, author: &str, weight: f64) {
        self.scores.entry(author.to_string()).or_default().score += weight;
    }

    /// Returns the score entry for `author`.
    pub fn get(&self, author: &str) -> Option<&AuthorScore> {
        self.scores.get(author)
    }

    /// Returns the commit score for `author`, zero when unknown.
    pub fn score(&self, author: &str) -> f64 {
        self.get(author).map_or(0.0, |s| s.score)
    }

    /// Folds another table into this one by summing entries.
    pub fn merge(&mut self, other: AuthorScores) {
        for (author, entry) in other.scores {
            let mine = self.scores.entry(author).or_default();
            mine.score += entry.score;
            mine.lines_changed += entry.lines_changed;
        }
    }

    /// Number of distinct authors.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether no author has been scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Returns authors from highest to lowest score.
    ///
    /// Ties fall back to `lines_changed` and then to the login, so the order
    /// is stable between runs.
    pub fn ranked(&self) -> Vec<(&str, AuthorScore)> {
        let mut ranked: Vec<_> = self
            .scores
            .iter()
            .map(|(author, entry)| (author.as_str(), *entry))
            .collect();
        ranked.sort_by(|(a_name, a), (b_name, b)| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.lines_changed.cmp(&a.lines_changed))
                .then_with(|| a_name.cmp(b_name))
        });
        ranked
    }
}
