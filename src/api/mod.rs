//! HTTP-agnostic API layer
//!
//! Typed request structures and handlers over [`SignatureService`] that can be
//! mounted by any HTTP server or called directly by the CLI.
//!
//! ## Design
//!
//! - **Handlers are thin**: validate input, call the service, return `Result<T, ApiError>`
//! - **Types are framework-agnostic**: No HTTP types leak into this module
//! - **Errors carry HTTP semantics**: `ApiError` knows its status code for translation
//!
//! [`SignatureService`]: crate::core::services::SignatureService

mod error;
mod handlers;
mod types;

pub use error::{ApiError, ApiErrorData, ErrorCode};
pub use handlers::{
    add_github_organization, add_manager, get_signature, has_signed, invalidate_project,
    list_ccla_signatures, list_company_signatures, list_corporate_contributors,
    list_employee_signatures, list_github_organizations, list_icla_signatures,
    list_project_company_signatures, list_project_signatures, list_signed_company_ids,
    list_user_signatures, project_report, remove_github_organization, remove_manager,
    update_approval_list,
};
pub use types::{
    ApiResponse, GithubOrgRequest, HasSignedRequest, IclaListRequest, InvalidateRequest,
    ManagerRequest, ProjectCompanyRequest, UpdateApprovalListRequest,
};
