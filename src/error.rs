//! Error kinds raised while crawling a repository.

use thiserror::Error;

/// Errors that abort an ownership crawl.
#[derive(Error, Debug)]
pub enum OwnersError {
    /// No GitHub token was supplied on the command line, environment or settings file.
    #[error("GitHub token isn't provided. Pass --github-token or set GITHUB_TOKEN")]
    MissingToken,

    /// The GitHub API answered with a non-success status.
    #[error("GitHub API request to {url} failed with HTTP {status}: {body}")]
    ApiRequestFailed {
        /// HTTP status code returned by the API.
        status: u16,
        /// Request URL.
        url: String,
        /// Response body, possibly empty.
        body: String,
    },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The response body did not have the expected shape.
    #[error("Invalid response format from GitHub API: {0}")]
    InvalidResponseFormat(String),

    /// A fallback owner table could not be loaded.
    #[error("Invalid fallback owner table: {0}")]
    FallbackTable(String),
}
