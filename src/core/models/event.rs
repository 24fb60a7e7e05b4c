//! Audit trail events

use serde::{Deserialize, Serialize};

use super::ApprovalChange;

/// Kind of audit event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Email added to an approval list
    ApprovalListEmailAdded,
    /// Email removed from an approval list
    ApprovalListEmailRemoved,
    /// Domain added to an approval list
    ApprovalListDomainAdded,
    /// Domain removed from an approval list
    ApprovalListDomainRemoved,
    /// GitHub username added to an approval list
    ApprovalListGithubUsernameAdded,
    /// GitHub username removed from an approval list
    ApprovalListGithubUsernameRemoved,
    /// GitHub organization added to an approval list
    ApprovalListGithubOrgAdded,
    /// GitHub organization removed from an approval list
    ApprovalListGithubOrgRemoved,
    /// GitLab username added to an approval list
    ApprovalListGitlabUsernameAdded,
    /// GitLab username removed from an approval list
    ApprovalListGitlabUsernameRemoved,
    /// GitLab group added to an approval list
    ApprovalListGitlabOrgAdded,
    /// GitLab group removed from an approval list
    ApprovalListGitlabOrgRemoved,
    /// A signature was invalidated
    InvalidatedSignature,
}

impl From<ApprovalChange> for EventType {
    fn from(change: ApprovalChange) -> Self {
        match change {
            ApprovalChange::AddedEmail => Self::ApprovalListEmailAdded,
            ApprovalChange::RemovedEmail => Self::ApprovalListEmailRemoved,
            ApprovalChange::AddedDomain => Self::ApprovalListDomainAdded,
            ApprovalChange::RemovedDomain => Self::ApprovalListDomainRemoved,
            ApprovalChange::AddedGithubUsername => Self::ApprovalListGithubUsernameAdded,
            ApprovalChange::RemovedGithubUsername => Self::ApprovalListGithubUsernameRemoved,
            ApprovalChange::AddedGithubOrg => Self::ApprovalListGithubOrgAdded,
            ApprovalChange::RemovedGithubOrg => Self::ApprovalListGithubOrgRemoved,
            ApprovalChange::AddedGitlabUsername => Self::ApprovalListGitlabUsernameAdded,
            ApprovalChange::RemovedGitlabUsername => Self::ApprovalListGitlabUsernameRemoved,
            ApprovalChange::AddedGitlabOrg => Self::ApprovalListGitlabOrgAdded,
            ApprovalChange::RemovedGitlabOrg => Self::ApprovalListGitlabOrgRemoved,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();
        write!(f, "{name}")
    }
}

/// Arguments for one audit event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEventArgs {
    /// Event kind
    pub event_type: EventType,
    /// CLA group ID
    pub cla_group_id: String,
    /// External project ID
    pub project_sfid: String,
    /// Company ID, when the event concerns a company
    pub company_id: Option<String>,
    /// Acting user ID
    pub user_id: String,
    /// Acting user LF username
    pub lf_username: String,
    /// Human-readable event detail
    pub event_data: String,
}

/// A recorded audit event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event ID
    pub event_id: String,
    /// When the event was recorded (RFC3339)
    pub event_time: String,
    /// Event details
    #[serde(flatten)]
    pub args: LogEventArgs,
}
