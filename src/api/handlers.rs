//! Pure API handlers
//!
//! These handlers validate input, call the signature service and translate
//! its errors. They are HTTP-agnostic and return `Result<T, ApiError>`.

use log::info;

use crate::core::models::{
    ApprovalCriteria, AuthUser, CompanySignaturesQuery, CorporateContributor,
    EmployeeSignaturesQuery, GithubOrg, IclaSignatureSummary, Page, PageRequest,
    ProjectSignaturesQuery, Signature, SignatureCompanyId, SignatureReport, UserSignaturesQuery,
};
use crate::core::services::SignatureService;

use super::error::ApiError;
use super::types::{
    GithubOrgRequest, HasSignedRequest, IclaListRequest, InvalidateRequest, ManagerRequest,
    ProjectCompanyRequest, UpdateApprovalListRequest,
};

/// Page size for individual signature listings when none is given
const ICLA_PAGE_SIZE: i64 = 100;

fn require(value: &str, what: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{what} is required")));
    }
    Ok(())
}

fn org_names(orgs: Vec<GithubOrg>) -> Vec<String> {
    orgs.into_iter().map(|o| o.id).collect()
}

// =============================================================================
// SIGNATURES
// =============================================================================

/// Get a signature by ID
pub async fn get_signature(service: &SignatureService, signature_id: &str) -> Result<Signature, ApiError> {
    require(signature_id, "signature ID")?;
    service
        .get_signature(signature_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("signature {signature_id} not found")))
}

/// List signatures of a CLA group
pub async fn list_project_signatures(
    service: &SignatureService,
    query: &ProjectSignaturesQuery,
) -> Result<Page<Signature>, ApiError> {
    require(&query.project_id, "CLA group ID")?;
    Ok(service.get_project_signatures(query).await?)
}

/// Summary report for a CLA group
pub async fn project_report(
    service: &SignatureService,
    query: &ProjectSignaturesQuery,
) -> Result<SignatureReport, ApiError> {
    require(&query.project_id, "CLA group ID")?;
    Ok(service.create_project_summary_report(query).await?)
}

/// List a company's approved corporate signatures on a CLA group
pub async fn list_project_company_signatures(
    service: &SignatureService,
    request: ProjectCompanyRequest,
) -> Result<Page<Signature>, ApiError> {
    require(&request.company_id, "company ID")?;
    require(&request.project_id, "CLA group ID")?;
    Ok(service
        .get_project_company_signatures(
            &request.company_id,
            &request.project_id,
            request.sort_order,
            request.next_key,
            request.page_size,
        )
        .await?)
}

/// List employee acknowledgements of a company on a CLA group
pub async fn list_employee_signatures(
    service: &SignatureService,
    query: &EmployeeSignaturesQuery,
) -> Result<Page<Signature>, ApiError> {
    require(&query.company_id, "company ID")?;
    require(&query.project_id, "CLA group ID")?;
    Ok(service
        .get_project_company_employee_signatures(query, &ApprovalCriteria::default())
        .await?)
}

/// List signatures of a company
pub async fn list_company_signatures(
    service: &SignatureService,
    query: &CompanySignaturesQuery,
) -> Result<Page<Signature>, ApiError> {
    require(&query.company_id, "company ID")?;
    Ok(service.get_company_signatures(query).await?)
}

/// List signatures of a user
pub async fn list_user_signatures(
    service: &SignatureService,
    query: &UserSignaturesQuery,
) -> Result<Page<Signature>, ApiError> {
    require(&query.user_id, "user ID")?;
    Ok(service.get_user_signatures(query).await?)
}

/// List individual signatures of a CLA group
pub async fn list_icla_signatures(
    service: &SignatureService,
    request: IclaListRequest,
) -> Result<Page<IclaSignatureSummary>, ApiError> {
    require(&request.cla_group_id, "CLA group ID")?;
    let page = PageRequest::with_default(request.next_key, request.page_size, ICLA_PAGE_SIZE);
    Ok(service
        .get_cla_group_icla_signatures(
            &request.cla_group_id,
            request.search_term,
            request.approved,
            request.signed,
            &page,
        )
        .await?)
}

/// List corporate signatures of a CLA group
pub async fn list_ccla_signatures(
    service: &SignatureService,
    cla_group_id: &str,
    approved: Option<bool>,
    signed: Option<bool>,
) -> Result<Page<Signature>, ApiError> {
    require(cla_group_id, "CLA group ID")?;
    Ok(service
        .get_cla_group_ccla_signatures(cla_group_id, approved, signed)
        .await?)
}

/// List employees contributing under corporate agreements of a CLA group
pub async fn list_corporate_contributors(
    service: &SignatureService,
    cla_group_id: &str,
    company_id: Option<String>,
    search_term: Option<String>,
) -> Result<Vec<CorporateContributor>, ApiError> {
    require(cla_group_id, "CLA group ID")?;
    Ok(service
        .get_cla_group_corporate_contributors(cla_group_id, company_id, search_term)
        .await?)
}

/// Companies holding a signed corporate signature for a CLA group
pub async fn list_signed_company_ids(
    service: &SignatureService,
    cla_group_id: &str,
) -> Result<Vec<SignatureCompanyId>, ApiError> {
    require(cla_group_id, "CLA group ID")?;
    Ok(service
        .get_company_ids_with_signed_corporate_signatures(cla_group_id)
        .await?)
}

// =============================================================================
// COVERAGE
// =============================================================================

/// Whether a contributor is covered by a signature on a CLA group
pub async fn has_signed(service: &SignatureService, request: &HasSignedRequest) -> Result<bool, ApiError> {
    require(&request.project_id, "CLA group ID")?;
    let user = service.user(&request.username).await?;
    Ok(service.has_user_signed(&user, &request.project_id).await?)
}

// =============================================================================
// APPROVAL LISTS
// =============================================================================

/// Apply additions and removals to a corporate approval list
pub async fn update_approval_list(
    service: &SignatureService,
    auth_user: &AuthUser,
    request: &UpdateApprovalListRequest,
) -> Result<Signature, ApiError> {
    require(&auth_user.username, "caller username")?;
    let cla_group = service.cla_group(&request.cla_group_id).await?;
    let company = service.company(&request.company_id).await?;
    let signature = service
        .update_approval_list(auth_user, &cla_group, &company, &request.cla_group_id, &request.delta)
        .await?;
    info!(
        "{} updated approval list of signature {}",
        auth_user.username, signature.signature_id
    );
    Ok(signature)
}

/// GitHub organizations on a corporate approval list, plus the caller's own
/// organizations when a token is given
pub async fn list_github_organizations(
    service: &SignatureService,
    signature_id: &str,
    token: Option<&str>,
) -> Result<Vec<String>, ApiError> {
    let orgs = service
        .get_github_organizations_from_approval_list(signature_id, token)
        .await?;
    Ok(org_names(orgs))
}

/// Add a GitHub organization to a corporate approval list
pub async fn add_github_organization(
    service: &SignatureService,
    request: &GithubOrgRequest,
    token: Option<&str>,
) -> Result<Vec<String>, ApiError> {
    let orgs = service
        .add_github_organization_to_approval_list(&request.signature_id, &request.organization_id, token)
        .await?;
    Ok(org_names(orgs))
}

/// Remove a GitHub organization from a corporate approval list
pub async fn remove_github_organization(
    service: &SignatureService,
    request: &GithubOrgRequest,
    token: Option<&str>,
) -> Result<Vec<String>, ApiError> {
    let orgs = service
        .delete_github_organization_from_approval_list(&request.signature_id, &request.organization_id, token)
        .await?;
    Ok(org_names(orgs))
}

// =============================================================================
// MANAGERS
// =============================================================================

/// Add a CLA manager to a signature
pub async fn add_manager(service: &SignatureService, request: &ManagerRequest) -> Result<Signature, ApiError> {
    require(&request.signature_id, "signature ID")?;
    Ok(service.add_cla_manager(&request.signature_id, &request.username).await?)
}

/// Remove a CLA manager from a signature
pub async fn remove_manager(service: &SignatureService, request: &ManagerRequest) -> Result<Signature, ApiError> {
    require(&request.signature_id, "signature ID")?;
    require(&request.username, "username")?;
    Ok(service.remove_cla_manager(&request.signature_id, &request.username).await?)
}

// =============================================================================
// INVALIDATION
// =============================================================================

/// Invalidate every signature of a CLA group, returning how many were attempted
pub async fn invalidate_project(service: &SignatureService, request: &InvalidateRequest) -> Result<usize, ApiError> {
    require(&request.project_id, "CLA group ID")?;
    Ok(service
        .invalidate_project_records(&request.project_id, &request.note)
        .await?)
}
