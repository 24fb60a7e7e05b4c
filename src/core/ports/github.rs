//! GitHub REST port
//!
//! Defines the calls the signature workflows make against GitHub.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::super::models::{GitHubUser, UserCommitSummary};

/// Errors returned by GitHub calls
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The request could not be sent or the response could not be read
    #[error("github transport error: {0}")]
    Transport(String),

    /// GitHub answered with a non-success status
    #[error("github returned {status} for {url}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Requested URL
        url: String,
        /// Response body or reason
        message: String,
    },

    /// The response body did not have the expected shape
    #[error("unexpected github response: {0}")]
    Decode(String),

    /// The call needs credentials that were not configured
    #[error("github credentials missing: {0}")]
    Unauthenticated(String),
}

/// A user's membership in an organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    /// `active` or `pending`
    pub state: String,
    /// `admin` or `member`
    pub role: String,
}

/// A repository as returned by the REST API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRepository {
    /// Numeric repository ID
    pub id: i64,
    /// Repository name
    pub name: String,
    /// Owner login
    pub owner: String,
}

/// Commit status states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitState {
    /// Every author is covered
    Success,
    /// At least one author is not covered
    Failure,
}

/// A commit status to publish on a pull request head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStatus {
    /// Status state
    pub state: CommitState,
    /// Short description shown next to the check
    pub description: String,
    /// Status context name
    pub context: String,
}

/// GitHub REST client
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// Organizations the owner of `access_token` belongs to (first 100)
    async fn user_organizations(&self, access_token: &str) -> Result<Vec<String>, GitHubError>;

    /// Membership of `username` in `org`; `None` when not a member
    async fn membership(&self, username: &str, org: &str)
    -> Result<Option<Membership>, GitHubError>;

    /// Public details of a user; `None` when the login does not exist
    async fn user_details(&self, username: &str) -> Result<Option<GitHubUser>, GitHubError>;

    /// Repository by numeric ID, through an app installation
    async fn repository(
        &self,
        installation_id: i64,
        repository_id: i64,
    ) -> Result<GitHubRepository, GitHubError>;

    /// Commit authors of a pull request
    async fn pull_request_commit_authors(
        &self,
        installation_id: i64,
        pull_request: i64,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<UserCommitSummary>, GitHubError>;

    /// Publish a commit status
    async fn create_commit_status(
        &self,
        installation_id: i64,
        owner: &str,
        repo: &str,
        sha: &str,
        status: &CommitStatus,
    ) -> Result<(), GitHubError>;
}
