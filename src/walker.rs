//! Depth-limited walk over the remote repository tree.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::github::{EntryKind, RepositoryHost};
use crate::owners::{inject_front_matter, write_owners_file};
use crate::ranking::resolve;

/// Files whose name contains this marker are treated as documents.
///
/// This is a plain substring match, so `cmd.go` qualifies as well.
pub const DOCUMENT_MARKER: &str = "md";

/// Counters collected during a crawl.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSummary {
    /// Directories whose owners were resolved.
    pub directories: usize,
    /// Documents whose owners were resolved.
    pub documents: usize,
    /// `OWNERS` files written.
    pub owners_files_written: usize,
    /// Documents that received an `assignees` block.
    pub documents_annotated: usize,
    /// Paths that resolved to no owner at all.
    pub without_owners: usize,
    /// Local writes that failed.
    pub write_failures: usize,
}

impl fmt::Display for CrawlSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} directories, {} documents, {} OWNERS files written, {} documents annotated, \
             {} without owners, {} write failures",
            self.directories,
            self.documents,
            self.owners_files_written,
            self.documents_annotated,
            self.without_owners,
            self.write_failures
        )
    }
}

/// Walks the repository from the configured top directory.
pub struct TreeWalker<'a> {
    host: &'a dyn RepositoryHost,
    config: &'a Config,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker reading from `host`.
    pub fn new(host: &'a dyn RepositoryHost, config: &'a Config) -> Self {
        Self { host, config }
    }

    /// Runs the crawl. The first API error aborts it.
    pub async fn run(&self) -> Result<CrawlSummary> {
        let mut summary = CrawlSummary::default();
        self.walk(&self.config.top_dir, 0, &mut summary).await?;
        info!(%summary, "Crawl finished");
        Ok(summary)
    }

    fn walk<'b>(
        &'b self,
        path: &'b str,
        depth: usize,
        summary: &'b mut CrawlSummary,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + 'b>> {
        Box::pin(async move {
            if depth > self.config.max_depth {
                debug!(path, depth, "Depth limit reached");
                return Ok(());
            }

            let entries = self.host.list_directory(path).await?;
            self.process(path, false, summary).await?;

            for entry in &entries {
                match entry.kind {
                    EntryKind::Dir => self.walk(&entry.path, depth + 1, summary).await?,
                    EntryKind::File if entry.name.contains(DOCUMENT_MARKER) => {
                        self.process(&entry.path, true, summary).await?
                    }
                    _ => {}
                }
            }

            Ok(())
        })
    }

    /// Resolves owners of one path and writes them unless empty.
    async fn process(
        &self,
        path: &str,
        is_leaf_document: bool,
        summary: &mut CrawlSummary,
    ) -> Result<()> {
        let owners = resolve(self.host, &self.config.ranking, path, is_leaf_document).await?;

        if is_leaf_document {
            summary.documents += 1;
        } else {
            summary.directories += 1;
        }

        println!("path: {}, owners: [{}]", path, owners.join(", "));

        if owners.is_empty() {
            summary.without_owners += 1;
            return Ok(());
        }

        if self.config.dry_run {
            return Ok(());
        }

        let local_repo = &self.config.local_repo;
        if is_leaf_document {
            match inject_front_matter(local_repo, path, &owners) {
                Ok(true) => summary.documents_annotated += 1,
                Ok(false) => debug!(path, "Document has no front matter delimiter"),
                Err(e) => {
                    warn!(path, error = %format!("{e:#}"), "Failed to annotate document");
                    summary.write_failures += 1;
                }
            }
        } else {
            match write_owners_file(local_repo, path, &owners) {
                Ok(written) => {
                    debug!(path = %written.display(), "Wrote OWNERS file");
                    summary.owners_files_written += 1;
                }
                Err(e) => {
                    warn!(path, error = %format!("{e:#}"), "Failed to write OWNERS file");
                    summary.write_failures += 1;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::{FallbackOwnerTable, GitHubTarget};
    use crate::github::CommitRecord;
    use crate::ranking::RankingOptions;
    use crate::test_utils::{dir, file, ScriptedHost};
    use std::fs;
    use tempfile::TempDir;

    fn config(local_repo: &std::path::Path, fallback: FallbackOwnerTable) -> Config {
        Config {
            github: GitHubTarget::new("token", "kubernetes", "kubernetes"),
            top_dir: String::new(),
            local_repo: local_repo.to_path_buf(),
            max_depth: 10,
            ranking: RankingOptions::with_fallback(fallback),
            dry_run: false,
        }
    }

    #[tokio::test]
    async fn writes_owners_and_annotates_documents() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("docs")).unwrap();
        fs::write(
            temp_dir.path().join("docs/guide.md"),
            "---\ntitle: Guide\n---\n",
        )
        .unwrap();

        let host = ScriptedHost::new()
            .with_directory("", vec![dir("docs")])
            .with_directory("docs", vec![file("docs/guide.md"), file("docs/logo.png")])
            .with_commits("docs", vec![CommitRecord::new("alice", "add docs")])
            .with_commits("docs/guide.md", vec![CommitRecord::new("bob", "write guide")]);
        let config = config(temp_dir.path(), FallbackOwnerTable::default());

        let summary = TreeWalker::new(&host, &config).run().await.unwrap();

        assert_eq!(summary.directories, 2);
        assert_eq!(summary.documents, 1);
        assert_eq!(summary.owners_files_written, 1);
        assert_eq!(summary.documents_annotated, 1);
        assert_eq!(summary.without_owners, 1);
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("docs/OWNERS")).unwrap(),
            "assignees:\n- alice\n\n"
        );
        assert_eq!(
            fs::read_to_string(temp_dir.path().join("docs/guide.md")).unwrap(),
            "---\nassignees:\n- bob\n\ntitle: Guide\n---\n"
        );
        assert!(!temp_dir.path().join("OWNERS").exists());
    }

    #[tokio::test]
    async fn empty_history_without_keyword_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let host = ScriptedHost::new().with_directory("", vec![]);
        let table = FallbackOwnerTable::from_entries([("storage", vec!["saad-ali"])]);
        let config = config(temp_dir.path(), table);

        let summary = TreeWalker::new(&host, &config).run().await.unwrap();

        assert_eq!(summary.without_owners, 1);
        assert_eq!(summary.owners_files_written, 0);
        assert!(!temp_dir.path().join("OWNERS").exists());
    }

    #[tokio::test]
    async fn stops_below_max_depth() {
        let temp_dir = TempDir::new().unwrap();
        let host = ScriptedHost::new()
            .with_directory("", vec![dir("a")])
            .with_directory("a", vec![dir("a/b")])
            .with_directory("a/b", vec![dir("a/b/c")]);
        let mut config = config(temp_dir.path(), FallbackOwnerTable::default());
        config.max_depth = 1;

        TreeWalker::new(&host, &config).run().await.unwrap();

        assert_eq!(host.directory_requests(), vec!["", "a"]);
    }

    #[tokio::test]
    async fn visits_entries_depth_first_in_listing_order() {
        let temp_dir = TempDir::new().unwrap();
        let host = ScriptedHost::new()
            .with_directory("", vec![dir("a"), file("cmd.go"), file("main.go"), dir("b")])
            .with_directory("a", vec![dir("a/x")])
            .with_directory("a/x", vec![])
            .with_directory("b", vec![]);
        let config = config(temp_dir.path(), FallbackOwnerTable::default());

        let summary = TreeWalker::new(&host, &config).run().await.unwrap();

        assert_eq!(host.directory_requests(), vec!["", "a", "a/x", "b"]);
        // "cmd.go" contains "md" and is treated as a document
        assert_eq!(summary.documents, 1);
        assert!(host.commit_requests().iter().any(|(path, _)| path == "cmd.go"));
        assert!(!host.commit_requests().iter().any(|(path, _)| path == "main.go"));
        assert_eq!(summary.directories, 4);
    }

    #[tokio::test]
    async fn listing_failure_aborts_crawl() {
        let temp_dir = TempDir::new().unwrap();
        let host = ScriptedHost::new().with_directory("", vec![dir("missing")]);
        let config = config(temp_dir.path(), FallbackOwnerTable::default());

        let result = TreeWalker::new(&host, &config).run().await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn commit_failure_aborts_crawl() {
        let temp_dir = TempDir::new().unwrap();
        let host = ScriptedHost::new()
            .with_directory("", vec![])
            .with_failing_commits(".md");
        let config = config(temp_dir.path(), FallbackOwnerTable::default());

        assert!(TreeWalker::new(&host, &config).run().await.is_err());
    }

    #[tokio::test]
    async fn write_failures_do_not_abort_crawl() {
        let temp_dir = TempDir::new().unwrap();
        let host = ScriptedHost::new()
            .with_directory("", vec![dir("gone"), file("absent.md")])
            .with_directory("gone", vec![])
            .with_commits("gone", vec![CommitRecord::new("alice", "edit")])
            .with_commits("absent.md", vec![CommitRecord::new("bob", "edit")]);
        let config = config(temp_dir.path(), FallbackOwnerTable::default());

        let summary = TreeWalker::new(&host, &config).run().await.unwrap();

        assert_eq!(summary.write_failures, 2);
        assert_eq!(summary.owners_files_written, 0);
    }

    #[tokio::test]
    async fn dry_run_leaves_local_repo_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let host = ScriptedHost::new()
            .with_directory("", vec![])
            .with_commits("", vec![CommitRecord::new("alice", "init")]);
        let mut config = config(temp_dir.path(), FallbackOwnerTable::default());
        config.dry_run = true;

        let summary = TreeWalker::new(&host, &config).run().await.unwrap();

        assert_eq!(summary.directories, 1);
        assert_eq!(summary.owners_files_written, 0);
        assert!(!temp_dir.path().join("OWNERS").exists());
    }
}
