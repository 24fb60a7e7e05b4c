//! Signature model
//!
//! A signature records the acceptance of a CLA: by an individual, by a
//! company, or by an employee acknowledging their company's agreement.

use serde::{Deserialize, Serialize};

use super::{ApprovalList, SignatureType, User};

/// A CLA acceptance record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    /// Unique signature ID
    pub signature_id: String,
    /// Individual, corporate or employee
    pub signature_type: SignatureType,
    /// CLA group (project) the signature belongs to
    pub project_id: String,
    /// Company for corporate and employee signatures
    pub company_id: Option<String>,
    /// Signer reference: user ID (ICLA/ECLA) or company ID (CCLA)
    pub reference_id: String,
    /// Signer display name
    pub reference_name: String,
    /// Signer email, if known
    pub user_email: Option<String>,
    /// Signer GitHub login, if known
    pub user_github_username: Option<String>,
    /// Signer GitLab login, if known
    pub user_gitlab_username: Option<String>,
    /// Signer LF username, if known
    pub user_name: Option<String>,
    /// Whether the signature is approved
    pub approved: bool,
    /// Whether the document was signed
    pub signed: bool,
    /// Provision employee acknowledgements for newly approved identities
    pub auto_create_ecla: bool,
    /// CLA managers allowed to edit this signature
    pub acl: Vec<User>,
    /// Identities allowed to contribute under this (corporate) signature
    pub approval_list: ApprovalList,
    /// Note recorded on invalidation
    pub note: Option<String>,
    /// Creation timestamp (RFC3339)
    pub created: String,
    /// Last modification timestamp (RFC3339)
    pub modified: String,
}

impl Signature {
    /// Whether the signature is both approved and signed
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.approved && self.signed
    }

    /// Whether the signature satisfies optional approved/signed filters
    #[must_use]
    pub fn matches_flags(&self, approved: Option<bool>, signed: Option<bool>) -> bool {
        approved.is_none_or(|a| a == self.approved) && signed.is_none_or(|s| s == self.signed)
    }

    /// Whether the signature references the given company
    #[must_use]
    pub fn is_for_company(&self, company_id: &str) -> bool {
        self.company_id.as_deref() == Some(company_id)
    }

    /// Whether a free-text search term matches the signer
    ///
    /// Compares case-insensitively against name, email and logins.
    #[must_use]
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        std::iter::once(self.reference_name.as_str())
            .chain(self.user_email.as_deref())
            .chain(self.user_github_username.as_deref())
            .chain(self.user_gitlab_username.as_deref())
            .chain(self.user_name.as_deref())
            .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Company ID paired with the corporate signature that covers it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureCompanyId {
    /// Signature ID
    pub signature_id: String,
    /// Company ID
    pub company_id: String,
}

/// GitHub organization entry on an approval list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubOrg {
    /// Organization login
    pub id: String,
}
