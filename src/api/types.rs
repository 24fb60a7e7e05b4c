//! API request and response types
//!
//! All types are framework-agnostic and can be used by any client.

use serde::{Deserialize, Serialize};

use crate::core::models::{ApprovalListDelta, SortOrder};

use super::error::ApiErrorData;

// =============================================================================
// RESPONSE ENVELOPE
// =============================================================================

/// Standard API response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorData>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful response
    #[must_use]
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response
    #[must_use]
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiErrorData {
                code: code.to_string(),
                message: message.to_string(),
            }),
        }
    }
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// Request body for editing a corporate approval list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApprovalListRequest {
    /// CLA group of the corporate signature
    pub cla_group_id: String,
    /// Company owning the corporate signature
    pub company_id: String,
    /// Entries to add and remove
    #[serde(flatten)]
    pub delta: ApprovalListDelta,
}

/// Request for a coverage check
#[derive(Debug, Clone, Deserialize)]
pub struct HasSignedRequest {
    /// LF username of the contributor
    pub username: String,
    /// CLA group
    pub project_id: String,
}

/// Request naming a GitHub organization on a corporate signature
#[derive(Debug, Clone, Deserialize)]
pub struct GithubOrgRequest {
    /// Corporate signature
    pub signature_id: String,
    /// GitHub organization name
    pub organization_id: String,
}

/// Request naming a CLA manager on a signature
#[derive(Debug, Clone, Deserialize)]
pub struct ManagerRequest {
    /// Signature
    pub signature_id: String,
    /// LF username of the manager
    pub username: String,
}

/// Request for a company's corporate signatures on one CLA group
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectCompanyRequest {
    /// Company
    pub company_id: String,
    /// CLA group
    pub project_id: String,
    /// Creation date order
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Cursor from a previous page
    #[serde(default)]
    pub next_key: Option<String>,
    /// Page size
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Request for the individual signatures of a CLA group
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IclaListRequest {
    /// CLA group
    pub cla_group_id: String,
    /// Name, email or username filter
    #[serde(default)]
    pub search_term: Option<String>,
    /// Approved filter
    #[serde(default)]
    pub approved: Option<bool>,
    /// Signed filter
    #[serde(default)]
    pub signed: Option<bool>,
    /// Cursor from a previous page
    #[serde(default)]
    pub next_key: Option<String>,
    /// Page size
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Request to invalidate every signature of a CLA group
#[derive(Debug, Clone, Deserialize)]
pub struct InvalidateRequest {
    /// CLA group
    pub project_id: String,
    /// Note recorded on each signature
    pub note: String,
}
