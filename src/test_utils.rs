//! Shared test utilities.

use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::github::{CommitPage, CommitRecord, DirectoryEntry, EntryKind, RepositoryHost};

/// In-memory repository host with scripted listings and commit pages.
///
/// Directories without a scripted listing fail, mirroring a 404 from the
/// contents API. Paths without scripted commits return a single empty page.
/// Every request is recorded so tests can assert on the crawl order.
#[derive(Default)]
pub(crate) struct ScriptedHost {
    directories: HashMap<String, Vec<DirectoryEntry>>,
    commits: HashMap<String, Vec<Vec<CommitRecord>>>,
    failing_commits: HashSet<String>,
    directory_requests: Arc<Mutex<Vec<String>>>,
    commit_requests: Arc<Mutex<Vec<(String, u32)>>>,
}

impl ScriptedHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_directory(mut self, path: &str, entries: Vec<DirectoryEntry>) -> Self {
        self.directories.insert(path.to_string(), entries);
        self
    }

    pub(crate) fn with_commits(self, path: &str, commits: Vec<CommitRecord>) -> Self {
        self.with_commit_pages(path, vec![commits])
    }

    pub(crate) fn with_commit_pages(mut self, path: &str, pages: Vec<Vec<CommitRecord>>) -> Self {
        self.commits.insert(path.to_string(), pages);
        self
    }

    pub(crate) fn with_failing_commits(mut self, path: &str) -> Self {
        self.failing_commits.insert(path.to_string());
        self
    }

    /// Directory paths listed so far, in request order.
    pub(crate) fn directory_requests(&self) -> Vec<String> {
        self.directory_requests.lock().unwrap().clone()
    }

    /// `(path, page)` commit requests made so far, in request order.
    pub(crate) fn commit_requests(&self) -> Vec<(String, u32)> {
        self.commit_requests.lock().unwrap().clone()
    }
}

impl RepositoryHost for ScriptedHost {
    fn list_directory<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DirectoryEntry>>> + Send + 'a>> {
        Box::pin(async move {
            self.directory_requests
                .lock()
                .unwrap()
                .push(path.to_string());
            self.directories
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no scripted listing for '{path}'"))
        })
    }

    fn list_commits<'a>(
        &'a self,
        path: &'a str,
        page: u32,
    ) -> Pin<Box<dyn Future<Output = Result<CommitPage>> + Send + 'a>> {
        Box::pin(async move {
            self.commit_requests
                .lock()
                .unwrap()
                .push((path.to_string(), page));

            if self.failing_commits.contains(path) {
                anyhow::bail!("scripted commit failure for '{path}'");
            }

            let Some(pages) = self.commits.get(path) else {
                return Ok(CommitPage::default());
            };
            let index = page.saturating_sub(1) as usize;
            Ok(CommitPage {
                commits: pages.get(index).cloned().unwrap_or_default(),
                next_page: (index + 1 < pages.len()).then_some(page + 1),
            })
        })
    }
}

/// Directory entry for `path`.
pub(crate) fn dir(path: &str) -> DirectoryEntry {
    entry(path, EntryKind::Dir)
}

/// File entry for `path`.
pub(crate) fn file(path: &str) -> DirectoryEntry {
    entry(path, EntryKind::File)
}

fn entry(path: &str, kind: EntryKind) -> DirectoryEntry {
    DirectoryEntry {
        name: path.rsplit('/').next().unwrap_or(path).to_string(),
        path: path.to_string(),
        kind,
    }
}
