//! Summary views over signatures

use serde::{Deserialize, Serialize};

use super::{Signature, SignatureType};

/// Compact signature row used in reports
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSummary {
    /// Signature ID
    pub signature_id: String,
    /// Signature type
    pub signature_type: SignatureType,
    /// Signer reference
    pub reference_id: String,
    /// Signer name
    pub reference_name: String,
    /// Approved flag
    pub approved: bool,
    /// Signed flag
    pub signed: bool,
    /// Creation timestamp
    pub created: String,
}

impl From<&Signature> for SignatureSummary {
    fn from(sig: &Signature) -> Self {
        Self {
            signature_id: sig.signature_id.clone(),
            signature_type: sig.signature_type,
            reference_id: sig.reference_id.clone(),
            reference_name: sig.reference_name.clone(),
            approved: sig.approved,
            signed: sig.signed,
            created: sig.created.clone(),
        }
    }
}

/// Summary report for one CLA group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureReport {
    /// CLA group ID
    pub project_id: String,
    /// Matching signatures across all pages
    pub total_count: usize,
    /// Approved and signed individual signatures
    pub individual_count: usize,
    /// Approved and signed corporate signatures
    pub corporate_count: usize,
    /// Approved and signed employee acknowledgements
    pub employee_count: usize,
    /// Rows on this page
    pub signatures: Vec<SignatureSummary>,
    /// Cursor for the next page
    pub last_key: Option<String>,
}

/// Individual signature row for CLA group listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IclaSignatureSummary {
    /// Signature ID
    pub signature_id: String,
    /// Signing user
    pub user_id: String,
    /// Signer name
    pub user_name: String,
    /// Signer email
    pub user_email: Option<String>,
    /// Signer GitHub login
    pub github_username: Option<String>,
    /// Signer GitLab login
    pub gitlab_username: Option<String>,
    /// Signing timestamp
    pub signed_on: String,
}

impl From<&Signature> for IclaSignatureSummary {
    fn from(sig: &Signature) -> Self {
        Self {
            signature_id: sig.signature_id.clone(),
            user_id: sig.reference_id.clone(),
            user_name: sig.reference_name.clone(),
            user_email: sig.user_email.clone(),
            github_username: sig.user_github_username.clone(),
            gitlab_username: sig.user_gitlab_username.clone(),
            signed_on: sig.created.clone(),
        }
    }
}

/// An employee contributing under a corporate agreement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorporateContributor {
    /// Employee acknowledgement signature ID
    pub signature_id: String,
    /// Company ID
    pub company_id: String,
    /// Contributor name
    pub name: String,
    /// Contributor email
    pub email: Option<String>,
    /// Contributor GitHub login
    pub github_username: Option<String>,
    /// Contributor GitLab login
    pub gitlab_username: Option<String>,
    /// Acknowledgement timestamp
    pub timestamp: String,
}

impl From<&Signature> for CorporateContributor {
    fn from(sig: &Signature) -> Self {
        Self {
            signature_id: sig.signature_id.clone(),
            company_id: sig.company_id.clone().unwrap_or_default(),
            name: sig.reference_name.clone(),
            email: sig.user_email.clone(),
            github_username: sig.user_github_username.clone(),
            gitlab_username: sig.user_gitlab_username.clone(),
            timestamp: sig.created.clone(),
        }
    }
}
