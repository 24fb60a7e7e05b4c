//! Companies, CLA groups and the source-control records tied to them

use serde::{Deserialize, Serialize};

/// A company that may sign a corporate agreement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    /// Company ID
    pub company_id: String,
    /// Company name
    pub company_name: String,
    /// External (organization service) ID
    pub company_external_id: String,
}

/// A CLA group: the project scope signatures are collected for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaGroup {
    /// CLA group ID
    pub project_id: String,
    /// CLA group name
    pub project_name: String,
    /// External (project service) ID
    pub project_external_id: String,
}

/// A source repository enrolled in a CLA group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaRepository {
    /// Numeric GitHub repository ID, as a string
    pub repository_id: String,
    /// Repository name (`owner/name`)
    pub repository_name: String,
    /// Repository web URL
    pub repository_url: String,
    /// Owning GitHub organization
    pub organization_name: String,
    /// CLA group the repository belongs to
    pub project_id: String,
    /// Whether CLA checks are enabled
    pub enabled: bool,
}

/// A GitHub organization with the CLA app installed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubOrganization {
    /// Organization login
    pub organization_name: String,
    /// GitHub app installation ID
    pub installation_id: i64,
    /// External project ID the organization is linked to
    pub project_sfid: String,
}

/// The pull request a user was signing from
///
/// Recorded when a contributor follows the CLA link out of a pull request,
/// so the pull request status can be refreshed once they are covered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveSignatureMetadata {
    /// User that is signing
    pub user_id: String,
    /// CLA group being signed
    pub project_id: String,
    /// Numeric GitHub repository ID, as a string
    pub repository_id: String,
    /// Pull request number, as a string
    pub pull_request_id: String,
}
