//! Signature repository port
//!
//! Defines the interface to the persisted signature records.

use async_trait::async_trait;

use super::super::models::{
    ActiveSignatureMetadata, ApprovalCriteria, ApprovalListDelta, ClaGroup, Company,
    CompanySignaturesQuery, CorporateContributor, EmployeeSignaturesQuery, GithubOrg,
    IclaSignatureSummary, Page, PageRequest, ProjectSignaturesQuery, Signature,
    SignatureCompanyId, SignatureReport, SortOrder, User, UserSignaturesQuery,
};

/// Persistence for signature records
///
/// Implementations guarantee per-record atomic updates; nothing more.
/// Lookups return `Ok(None)` when the record does not exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignatureRepository: Send + Sync {
    /// Get a signature by ID
    async fn get_signature(&self, signature_id: &str) -> anyhow::Result<Option<Signature>>;

    /// Get the individual signature of a user for a CLA group
    async fn get_individual_signature(
        &self,
        cla_group_id: &str,
        user_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
    ) -> anyhow::Result<Option<Signature>>;

    /// Get the corporate signature of a company for a CLA group
    async fn get_corporate_signature(
        &self,
        cla_group_id: &str,
        company_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
    ) -> anyhow::Result<Option<Signature>>;

    /// List signatures of a CLA group
    async fn get_project_signatures(
        &self,
        query: &ProjectSignaturesQuery,
    ) -> anyhow::Result<Page<Signature>>;

    /// Build a summary report for a CLA group
    async fn create_project_summary_report(
        &self,
        query: &ProjectSignaturesQuery,
    ) -> anyhow::Result<SignatureReport>;

    /// Get the first corporate signature of a company for a CLA group
    async fn get_project_company_signature(
        &self,
        company_id: &str,
        project_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
        page: &PageRequest,
    ) -> anyhow::Result<Option<Signature>>;

    /// List corporate signatures of a company for a CLA group
    async fn get_project_company_signatures(
        &self,
        company_id: &str,
        project_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
        sort_order: SortOrder,
        page: &PageRequest,
    ) -> anyhow::Result<Page<Signature>>;

    /// List employee acknowledgements of a company for a CLA group
    async fn get_project_company_employee_signatures(
        &self,
        query: &EmployeeSignaturesQuery,
        criteria: &ApprovalCriteria,
    ) -> anyhow::Result<Page<Signature>>;

    /// List signatures of a company
    ///
    /// When `load_acl` is false the manager list is stripped from results.
    async fn get_company_signatures(
        &self,
        query: &CompanySignaturesQuery,
        page_size: i64,
        load_acl: bool,
    ) -> anyhow::Result<Page<Signature>>;

    /// Companies holding a signed corporate signature for a CLA group
    async fn get_company_ids_with_signed_corporate_signatures(
        &self,
        cla_group_id: &str,
    ) -> anyhow::Result<Vec<SignatureCompanyId>>;

    /// List signatures of a user
    async fn get_user_signatures(
        &self,
        query: &UserSignaturesQuery,
        page_size: i64,
    ) -> anyhow::Result<Page<Signature>>;

    /// Every signature of a CLA group, unpaged
    async fn project_signatures(&self, project_id: &str) -> anyhow::Result<Vec<Signature>>;

    /// Invalidate one signature, recording a note
    async fn invalidate_project_record(&self, signature_id: &str, note: &str)
    -> anyhow::Result<()>;

    /// GitHub organizations on a signature's approval list
    async fn get_github_organizations_from_approval_list(
        &self,
        signature_id: &str,
    ) -> anyhow::Result<Vec<GithubOrg>>;

    /// Add a GitHub organization to a signature's approval list
    async fn add_github_organization_to_approval_list(
        &self,
        signature_id: &str,
        organization_id: &str,
    ) -> anyhow::Result<Vec<GithubOrg>>;

    /// Remove a GitHub organization from a signature's approval list
    async fn delete_github_organization_from_approval_list(
        &self,
        signature_id: &str,
        organization_id: &str,
    ) -> anyhow::Result<Vec<GithubOrg>>;

    /// Apply an approval list delta to the active corporate signature
    ///
    /// Returns the updated signature.
    async fn update_approval_list(
        &self,
        cla_manager: &User,
        cla_group: &ClaGroup,
        company_id: &str,
        delta: &ApprovalListDelta,
    ) -> anyhow::Result<Signature>;

    /// Add a user to a signature's manager list
    async fn add_cla_manager(&self, signature_id: &str, user: &User) -> anyhow::Result<Signature>;

    /// Remove a user, by LF username, from a signature's manager list
    async fn remove_cla_manager(&self, signature_id: &str, username: &str)
    -> anyhow::Result<Signature>;

    /// List individual signatures of a CLA group
    async fn get_cla_group_icla_signatures(
        &self,
        cla_group_id: &str,
        search_term: Option<String>,
        approved: Option<bool>,
        signed: Option<bool>,
        page: &PageRequest,
    ) -> anyhow::Result<Page<IclaSignatureSummary>>;

    /// List employees contributing under corporate agreements of a CLA group
    async fn get_cla_group_corporate_contributors(
        &self,
        cla_group_id: &str,
        company_id: Option<String>,
        search_term: Option<String>,
    ) -> anyhow::Result<Vec<CorporateContributor>>;

    /// Create an approved, signed employee acknowledgement
    async fn create_project_company_employee_signature(
        &self,
        company: &Company,
        cla_group: &ClaGroup,
        employee: &User,
    ) -> anyhow::Result<Signature>;

    /// The pull request a user is currently signing from, if any
    async fn get_active_signature_metadata(
        &self,
        user_id: &str,
    ) -> anyhow::Result<Option<ActiveSignatureMetadata>>;
}
