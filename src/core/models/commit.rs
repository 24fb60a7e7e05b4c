//! Pull request commit authorship

use serde::{Deserialize, Serialize};

/// A GitHub account as returned by the REST API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubUser {
    /// Numeric account ID
    pub id: Option<i64>,
    /// Login
    pub login: Option<String>,
    /// Public email, when shared
    #[serde(default)]
    pub email: Option<String>,
}

/// One commit of a pull request and the account that authored it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCommitSummary {
    /// Commit SHA
    pub sha: String,
    /// Linked GitHub account, absent when the commit email is unknown to GitHub
    pub commit_author: Option<GitHubUser>,
    /// Git author name
    pub author_name: Option<String>,
    /// Git author email
    pub author_email: Option<String>,
}

impl UserCommitSummary {
    /// Whether the commit is linked to a GitHub account with an ID and login
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.commit_author
            .as_ref()
            .is_some_and(|a| a.id.is_some() && a.login.as_deref().is_some_and(|l| !l.is_empty()))
    }

    /// GitHub login of the author, when linked
    #[must_use]
    pub fn login(&self) -> Option<&str> {
        self.commit_author.as_ref().and_then(|a| a.login.as_deref())
    }
}

/// Commit authors of one pull request split by CLA coverage
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthorTriage {
    /// Authors covered by a signature
    pub signed: Vec<UserCommitSummary>,
    /// Authors without coverage, or that could not be resolved
    pub unsigned: Vec<UserCommitSummary>,
}

impl CommitAuthorTriage {
    /// Whether every triaged author is covered
    #[must_use]
    pub fn all_signed(&self) -> bool {
        self.unsigned.is_empty()
    }
}
