//! Query parameters for signature listings

use serde::{Deserialize, Serialize};

use super::{PageRequest, SignatureType};

/// Ordering by creation date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    #[default]
    Asc,
    /// Newest first
    Desc,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            _ => Err(format!("Invalid sort order: {s}. Use: asc, desc")),
        }
    }
}

/// Signatures of one CLA group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSignaturesQuery {
    /// CLA group ID
    pub project_id: String,
    /// Restrict to one signature type
    pub signature_type: Option<SignatureType>,
    /// Free-text filter on the signer
    pub search_term: Option<String>,
    /// Filter on the approved flag
    pub approved: Option<bool>,
    /// Filter on the signed flag
    pub signed: Option<bool>,
    /// Page to return
    pub page: PageRequest,
}

/// Signatures of one company, across CLA groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanySignaturesQuery {
    /// Company ID
    pub company_id: String,
    /// Restrict to signatures referencing this user
    pub user_id: Option<String>,
    /// Restrict to one signature type
    pub signature_type: Option<SignatureType>,
    /// Cursor of the previous page
    pub next_key: Option<String>,
    /// Requested page size; the service applies its default when absent
    pub page_size: Option<i64>,
}

/// Signatures of one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSignaturesQuery {
    /// User ID
    pub user_id: String,
    /// Free-text filter on the signer name
    pub user_name: Option<String>,
    /// Cursor of the previous page
    pub next_key: Option<String>,
    /// Requested page size; the service applies its default when absent
    pub page_size: Option<i64>,
}

/// Employee acknowledgements of one company under one CLA group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSignaturesQuery {
    /// Company ID
    pub company_id: String,
    /// CLA group ID
    pub project_id: String,
    /// Cursor of the previous page
    pub next_key: Option<String>,
    /// Requested page size; the service applies its default when absent
    pub page_size: Option<i64>,
}

/// Optional identity filters for employee acknowledgements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalCriteria {
    /// Signing user ID
    pub user_id: Option<String>,
    /// Signer email
    pub user_email: Option<String>,
    /// Signer GitHub login
    pub github_username: Option<String>,
    /// Signer GitLab login
    pub gitlab_username: Option<String>,
}

impl ApprovalCriteria {
    /// Criteria selecting one user's acknowledgement
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    /// Whether the given signature satisfies every set criterion
    #[must_use]
    pub fn matches(&self, signature: &super::Signature) -> bool {
        fn check(want: Option<&String>, have: Option<&str>) -> bool {
            want.is_none_or(|w| have == Some(w.as_str()))
        }

        check(self.user_id.as_ref(), Some(signature.reference_id.as_str()))
            && check(self.user_email.as_ref(), signature.user_email.as_deref())
            && check(self.github_username.as_ref(), signature.user_github_username.as_deref())
            && check(self.gitlab_username.as_ref(), signature.user_gitlab_username.as_deref())
    }
}
