//! GitHub REST API client.

use std::future::Future;
use std::pin::Pin;

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

use super::{CommitPage, CommitRecord, DirectoryEntry, RepositoryHost, COMMITS_PER_PAGE};
use crate::error::OwnersError;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Contents API response: an array for directories, an object for files.
#[derive(Deserialize)]
#[serde(untagged)]
enum ContentsResponse {
    Listing(Vec<DirectoryEntry>),
    #[allow(dead_code)]
    Single(serde_json::Map<String, serde_json::Value>),
}

/// Commit list item
#[derive(Deserialize)]
struct ApiCommit {
    #[serde(default)]
    commit: ApiCommitDetail,
    author: Option<ApiUser>,
}

/// Git-level commit data
#[derive(Deserialize, Default)]
struct ApiCommitDetail {
    message: Option<String>,
}

/// GitHub account linked to a commit
#[derive(Deserialize)]
struct ApiUser {
    login: Option<String>,
}

impl From<ApiCommit> for CommitRecord {
    fn from(api: ApiCommit) -> Self {
        Self {
            author: api.author.and_then(|user| user.login),
            message: api.commit.message,
        }
    }
}

/// Client for a single GitHub repository.
pub struct GitHubClient {
    /// HTTP client for API requests
    client: Client,
    /// Static access token
    token: String,
    /// Organization or user owning the repository
    org: String,
    /// Repository name
    repo: String,
    /// Base URL for the API (e.g., "https://api.github.com")
    base_url: String,
}

impl GitHubClient {
    /// Creates a client for `org/repo` against the given API base URL.
    pub fn new(token: String, org: String, repo: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            token,
            org,
            repo,
            base_url,
        }
    }

    /// Builds `{base}/repos/{org}/{repo}/{endpoint}/{path...}`.
    fn repo_url(&self, endpoint: &str, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid GitHub API URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("GitHub API URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(["repos", self.org.as_str(), self.repo.as_str(), endpoint])
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        Ok(url)
    }

    /// Sends an authenticated GET and fails on non-success statuses.
    async fn get(&self, url: Url) -> Result<Response> {
        debug!(url = %url, "Sending GitHub API request");

        let response = self
            .client
            .get(url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, concat!("repo-owners/", env!("CARGO_PKG_VERSION")))
            .send()
            .await
            .map_err(|e| OwnersError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OwnersError::ApiRequestFailed {
                status,
                url: url.to_string(),
                body,
            }
            .into());
        }

        Ok(response)
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| OwnersError::InvalidResponseFormat(e.to_string()).into())
    }

    async fn fetch_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>> {
        let url = self.repo_url("contents", path)?;
        let response = self.get(url).await?;

        match Self::parse_json::<ContentsResponse>(response).await? {
            ContentsResponse::Listing(entries) => {
                debug!(path, entries = entries.len(), "Listed directory");
                Ok(entries)
            }
            ContentsResponse::Single(_) => {
                trace!(path, "Contents request returned a single file");
                Ok(Vec::new())
            }
        }
    }

    async fn fetch_commits(&self, path: &str, page: u32) -> Result<CommitPage> {
        let mut url = self.repo_url("commits", "")?;
        {
            let mut query = url.query_pairs_mut();
            if !path.is_empty() {
                query.append_pair("path", path);
            }
            query
                .append_pair("per_page", &COMMITS_PER_PAGE.to_string())
                .append_pair("page", &page.to_string());
        }

        let response = self.get(url).await?;
        let next_page = next_page(response.headers());
        let commits: Vec<ApiCommit> = Self::parse_json(response).await?;

        debug!(
            commits = commits.len(),
            source = %format!("{}:{}:{}", self.org, self.repo, path),
            page,
            ?next_page,
            "Fetched commit page"
        );

        Ok(CommitPage {
            commits: commits.into_iter().map(CommitRecord::from).collect(),
            next_page,
        })
    }
}

impl RepositoryHost for GitHubClient {
    fn list_directory<'a>(
        &'a self,
        path: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<DirectoryEntry>>> + Send + 'a>> {
        Box::pin(async move {
            self.fetch_directory(path)
                .await
                .with_context(|| format!("Failed to list directory '{path}'"))
        })
    }

    fn list_commits<'a>(
        &'a self,
        path: &'a str,
        page: u32,
    ) -> Pin<Box<dyn Future<Output = Result<CommitPage>> + Send + 'a>> {
        Box::pin(async move {
            self.fetch_commits(path, page)
                .await
                .with_context(|| format!("Failed to list commits for '{path}' (page {page})"))
        })
    }
}

/// Extracts the `page` parameter of the `rel="next"` link, if any.
fn next_page(headers: &HeaderMap) -> Option<u32> {
    let link = headers.get(LINK)?.to_str().ok()?;
    parse_next_page(link)
}

/// Parses an RFC 8288 `Link` header value for the next page number.
pub(crate) fn parse_next_page(link: &str) -> Option<u32> {
    link.split(',').find_map(|part| {
        let mut pieces = part.split(';');
        let target = pieces.next()?.trim();
        let is_next = pieces.any(|param| param.trim() == r#"rel="next""#);
        if !is_next {
            return None;
        }

        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        let url = Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
    })
}
