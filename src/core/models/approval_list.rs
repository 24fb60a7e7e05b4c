//! Approval lists and approval list deltas
//!
//! A corporate signature carries one approval list: the identities allowed
//! to contribute under the company's agreement. Managers change it by
//! submitting a delta of additions and removals per category.

use serde::{Deserialize, Serialize};

/// Allow-list of identities attached to a corporate signature
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalList {
    /// Exact email addresses
    #[serde(default)]
    pub email: Vec<String>,
    /// Email domain patterns (`example.com`, `*.example.com`, `.example.com`)
    #[serde(default)]
    pub domain: Vec<String>,
    /// GitHub usernames
    #[serde(default)]
    pub github_username: Vec<String>,
    /// GitHub organizations
    #[serde(default)]
    pub github_org: Vec<String>,
    /// GitLab usernames
    #[serde(default)]
    pub gitlab_username: Vec<String>,
    /// GitLab groups
    #[serde(default)]
    pub gitlab_org: Vec<String>,
}

impl ApprovalList {
    /// Apply a delta in place
    ///
    /// Additions are trimmed, empty entries skipped and duplicates ignored.
    /// Removals drop exact (trimmed) matches.
    pub fn apply(&mut self, delta: &ApprovalListDelta) {
        merge(&mut self.email, &delta.add_email, &delta.remove_email);
        merge(&mut self.domain, &delta.add_domain, &delta.remove_domain);
        merge(&mut self.github_username, &delta.add_github_username, &delta.remove_github_username);
        merge(&mut self.github_org, &delta.add_github_org, &delta.remove_github_org);
        merge(&mut self.gitlab_username, &delta.add_gitlab_username, &delta.remove_gitlab_username);
        merge(&mut self.gitlab_org, &delta.add_gitlab_org, &delta.remove_gitlab_org);
    }

    /// Whether every category is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.email.is_empty()
            && self.domain.is_empty()
            && self.github_username.is_empty()
            && self.github_org.is_empty()
            && self.gitlab_username.is_empty()
            && self.gitlab_org.is_empty()
    }
}

fn merge(list: &mut Vec<String>, add: &[String], remove: &[String]) {
    for value in add {
        let value = value.trim();
        if !value.is_empty() && !list.iter().any(|existing| existing == value) {
            list.push(value.to_string());
        }
    }
    list.retain(|existing| !remove.iter().any(|r| r.trim() == existing));
}

/// Requested additions and removals, one pair of lists per category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalListDelta {
    /// Emails to add
    pub add_email: Vec<String>,
    /// Emails to remove
    pub remove_email: Vec<String>,
    /// Domains to add
    pub add_domain: Vec<String>,
    /// Domains to remove
    pub remove_domain: Vec<String>,
    /// GitHub usernames to add
    pub add_github_username: Vec<String>,
    /// GitHub usernames to remove
    pub remove_github_username: Vec<String>,
    /// GitHub organizations to add
    pub add_github_org: Vec<String>,
    /// GitHub organizations to remove
    pub remove_github_org: Vec<String>,
    /// GitLab usernames to add
    pub add_gitlab_username: Vec<String>,
    /// GitLab usernames to remove
    pub remove_gitlab_username: Vec<String>,
    /// GitLab groups to add
    pub add_gitlab_org: Vec<String>,
    /// GitLab groups to remove
    pub remove_gitlab_org: Vec<String>,
}

impl ApprovalListDelta {
    /// Whether the delta requests no change at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes().all(|(_, values)| values.is_empty())
    }

    /// Whether anything is being removed
    #[must_use]
    pub fn has_removals(&self) -> bool {
        self.changes()
            .any(|(change, values)| !change.is_addition() && !values.is_empty())
    }

    /// Iterate over every category with its requested values, in display order
    pub fn changes(&self) -> impl Iterator<Item = (ApprovalChange, &[String])> {
        [
            (ApprovalChange::AddedEmail, self.add_email.as_slice()),
            (ApprovalChange::RemovedEmail, self.remove_email.as_slice()),
            (ApprovalChange::AddedDomain, self.add_domain.as_slice()),
            (ApprovalChange::RemovedDomain, self.remove_domain.as_slice()),
            (ApprovalChange::AddedGithubUsername, self.add_github_username.as_slice()),
            (ApprovalChange::RemovedGithubUsername, self.remove_github_username.as_slice()),
            (ApprovalChange::AddedGithubOrg, self.add_github_org.as_slice()),
            (ApprovalChange::RemovedGithubOrg, self.remove_github_org.as_slice()),
            (ApprovalChange::AddedGitlabUsername, self.add_gitlab_username.as_slice()),
            (ApprovalChange::RemovedGitlabUsername, self.remove_gitlab_username.as_slice()),
            (ApprovalChange::AddedGitlabOrg, self.add_gitlab_org.as_slice()),
            (ApprovalChange::RemovedGitlabOrg, self.remove_gitlab_org.as_slice()),
        ]
        .into_iter()
    }
}

/// One category of approval list change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApprovalChange {
    /// Email added
    AddedEmail,
    /// Email removed
    RemovedEmail,
    /// Domain added
    AddedDomain,
    /// Domain removed
    RemovedDomain,
    /// GitHub username added
    AddedGithubUsername,
    /// GitHub username removed
    RemovedGithubUsername,
    /// GitHub organization added
    AddedGithubOrg,
    /// GitHub organization removed
    RemovedGithubOrg,
    /// GitLab username added
    AddedGitlabUsername,
    /// GitLab username removed
    RemovedGitlabUsername,
    /// GitLab group added
    AddedGitlabOrg,
    /// GitLab group removed
    RemovedGitlabOrg,
}

impl ApprovalChange {
    /// Human label used in notification summaries
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AddedEmail => "Added Email:",
            Self::RemovedEmail => "Removed Email:",
            Self::AddedDomain => "Added Domain:",
            Self::RemovedDomain => "Removed Domain:",
            Self::AddedGithubUsername => "Added GitHub User:",
            Self::RemovedGithubUsername => "Removed GitHub User:",
            Self::AddedGithubOrg => "Added GitHub Organization:",
            Self::RemovedGithubOrg => "Removed GitHub Organization:",
            Self::AddedGitlabUsername => "Added Gitlab User:",
            Self::RemovedGitlabUsername => "Removed Gitlab User:",
            Self::AddedGitlabOrg => "Added Gitlab Organization:",
            Self::RemovedGitlabOrg => "Removed Gitlab Organization:",
        }
    }

    /// Whether this change adds an entry
    #[must_use]
    pub const fn is_addition(self) -> bool {
        matches!(
            self,
            Self::AddedEmail
                | Self::AddedDomain
                | Self::AddedGithubUsername
                | Self::AddedGithubOrg
                | Self::AddedGitlabUsername
                | Self::AddedGitlabOrg
        )
    }
}
