//! Signature service - answers "is this contributor covered by an agreement?"
//! and runs the approval list workflows
//!
//! The service owns no state. Every record lives behind a port; the service
//! sequences calls to them, enforces authorization and decides which
//! failures abort an operation and which are only logged.
//!
//! - [`approval`] - approval list update and auto-acknowledgement workflow
//! - [`validation`] - signature coverage checks
//! - [`reconcile`] - pull request commit author triage
//! - [`invalidate`] - parallel invalidation of signatures
//! - [`github_orgs`] - GitHub organization approval list entries

mod approval;
mod github_orgs;
mod invalidate;
mod reconcile;
mod validation;

use std::sync::Arc;

use log::debug;

use super::error::{Result, SignatureError};
use crate::core::models::{
    ApprovalCriteria, ClaGroup, Company, CompanySignaturesQuery, CorporateContributor,
    EmployeeSignaturesQuery, IclaSignatureSummary, Page, PageRequest, ProjectSignaturesQuery,
    Signature, SignatureCompanyId, SignatureReport, SignatureType, SortOrder, User, UserSignaturesQuery,
};
use crate::core::ports::{
    ClaGroupService, CompanyService, EventsService, GitHubApi, GithubOrgService, Mailer,
    RepositoryService, SignatureRepository, UserService,
};

/// Default page size for a company's signatures on one CLA group
pub const PROJECT_COMPANY_PAGE_SIZE: i64 = 10;
/// Default page size for employee acknowledgements
pub const EMPLOYEE_PAGE_SIZE: i64 = 10;
/// Default page size for a user's signatures
pub const USER_PAGE_SIZE: i64 = 10;
/// Default page size for a company's signatures
pub const COMPANY_PAGE_SIZE: i64 = 50;
/// Page size for the corporate signatures of a CLA group
pub const CCLA_PAGE_SIZE: i64 = 1000;

/// Every collaborator the service talks to
#[derive(Clone)]
pub struct Collaborators {
    /// Signature persistence
    pub signatures: Arc<dyn SignatureRepository>,
    /// User directory
    pub users: Arc<dyn UserService>,
    /// Company directory
    pub companies: Arc<dyn CompanyService>,
    /// CLA group directory
    pub cla_groups: Arc<dyn ClaGroupService>,
    /// Audit trail
    pub events: Arc<dyn EventsService>,
    /// Enrolled repositories
    pub repositories: Arc<dyn RepositoryService>,
    /// GitHub organizations with the app installed
    pub github_orgs: Arc<dyn GithubOrgService>,
    /// GitHub REST client
    pub github: Arc<dyn GitHubApi>,
    /// Outgoing email
    pub mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}

/// Behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Require the caller to belong to a GitHub organization before it is
    /// added to or removed from an approval list
    pub github_org_validation: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            github_org_validation: true,
        }
    }
}

/// Signature service
#[derive(Clone, Debug)]
pub struct SignatureService {
    ports: Collaborators,
    settings: ServiceSettings,
}

impl SignatureService {
    /// Create a service over the given collaborators
    #[must_use]
    pub const fn new(ports: Collaborators, settings: ServiceSettings) -> Self {
        Self { ports, settings }
    }

    /// Active settings
    #[must_use]
    pub const fn settings(&self) -> ServiceSettings {
        self.settings
    }

    /// Look up a company, failing with `NotFound` when it does not exist
    pub async fn company(&self, company_id: &str) -> Result<Company> {
        if company_id.trim().is_empty() {
            return Err(SignatureError::BadRequest("company ID is empty".to_string()));
        }
        self.ports
            .companies
            .get_company(company_id)
            .await?
            .ok_or_else(|| SignatureError::NotFound(format!("company {company_id}")))
    }

    /// Look up a CLA group, failing with `NotFound` when it does not exist
    pub async fn cla_group(&self, cla_group_id: &str) -> Result<ClaGroup> {
        if cla_group_id.trim().is_empty() {
            return Err(SignatureError::BadRequest("CLA group ID is empty".to_string()));
        }
        self.ports
            .cla_groups
            .get_cla_group(cla_group_id)
            .await?
            .ok_or_else(|| SignatureError::NotFound(format!("CLA group {cla_group_id}")))
    }

    /// Get a signature by ID
    pub async fn get_signature(&self, signature_id: &str) -> Result<Option<Signature>> {
        Ok(self.ports.signatures.get_signature(signature_id).await?)
    }

    /// Get the individual signature of a user for a CLA group
    pub async fn get_individual_signature(
        &self,
        cla_group_id: &str,
        user_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
    ) -> Result<Option<Signature>> {
        Ok(self
            .ports
            .signatures
            .get_individual_signature(cla_group_id, user_id, approved, signed)
            .await?)
    }

    /// Get the corporate signature of a company for a CLA group
    pub async fn get_corporate_signature(
        &self,
        cla_group_id: &str,
        company_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
    ) -> Result<Option<Signature>> {
        Ok(self
            .ports
            .signatures
            .get_corporate_signature(cla_group_id, company_id, approved, signed)
            .await?)
    }

    /// List signatures of a CLA group
    pub async fn get_project_signatures(
        &self,
        query: &ProjectSignaturesQuery,
    ) -> Result<Page<Signature>> {
        Ok(self.ports.signatures.get_project_signatures(query).await?)
    }

    /// Build a summary report for a CLA group
    pub async fn create_project_summary_report(
        &self,
        query: &ProjectSignaturesQuery,
    ) -> Result<SignatureReport> {
        Ok(self.ports.signatures.create_project_summary_report(query).await?)
    }

    /// Get the first corporate signature of a company for a CLA group
    pub async fn get_project_company_signature(
        &self,
        company_id: &str,
        project_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
        page: &PageRequest,
    ) -> Result<Option<Signature>> {
        Ok(self
            .ports
            .signatures
            .get_project_company_signature(company_id, project_id, approved, signed, page)
            .await?)
    }

    /// List the approved, signed corporate signatures of a company for a CLA group
    pub async fn get_project_company_signatures(
        &self,
        company_id: &str,
        project_id: &str,
        sort_order: SortOrder,
        next_key: Option<String>,
        page_size: Option<i64>,
    ) -> Result<Page<Signature>> {
        let page = PageRequest::with_default(next_key, page_size, PROJECT_COMPANY_PAGE_SIZE);
        Ok(self
            .ports
            .signatures
            .get_project_company_signatures(company_id, project_id, Some(true), Some(true), sort_order, &page)
            .await?)
    }

    /// List employee acknowledgements of a company for a CLA group
    pub async fn get_project_company_employee_signatures(
        &self,
        query: &EmployeeSignaturesQuery,
        criteria: &ApprovalCriteria,
    ) -> Result<Page<Signature>> {
        let mut query = query.clone();
        if query.page_size.is_none() {
            query.page_size = Some(EMPLOYEE_PAGE_SIZE);
        }
        Ok(self
            .ports
            .signatures
            .get_project_company_employee_signatures(&query, criteria)
            .await?)
    }

    /// List signatures of a company, with manager details
    pub async fn get_company_signatures(
        &self,
        query: &CompanySignaturesQuery,
    ) -> Result<Page<Signature>> {
        let page_size = query.page_size.unwrap_or(COMPANY_PAGE_SIZE);
        Ok(self
            .ports
            .signatures
            .get_company_signatures(query, page_size, true)
            .await?)
    }

    /// Companies holding a signed corporate signature for a CLA group
    pub async fn get_company_ids_with_signed_corporate_signatures(
        &self,
        cla_group_id: &str,
    ) -> Result<Vec<SignatureCompanyId>> {
        Ok(self
            .ports
            .signatures
            .get_company_ids_with_signed_corporate_signatures(cla_group_id)
            .await?)
    }

    /// List signatures of a user
    pub async fn get_user_signatures(&self, query: &UserSignaturesQuery) -> Result<Page<Signature>> {
        let page_size = query.page_size.unwrap_or(USER_PAGE_SIZE);
        Ok(self.ports.signatures.get_user_signatures(query, page_size).await?)
    }

    /// Look up a user by LF username, failing with `NotFound` when unknown
    pub async fn user(&self, username: &str) -> Result<User> {
        if username.trim().is_empty() {
            return Err(SignatureError::BadRequest("username is empty".to_string()));
        }
        self.ports
            .users
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| SignatureError::NotFound(format!("user {username}")))
    }

    /// Add a user, by LF username, to a signature's manager list
    pub async fn add_cla_manager(&self, signature_id: &str, username: &str) -> Result<Signature> {
        let manager = self.user(username).await?;
        debug!("adding CLA manager {username} to signature {signature_id}");
        Ok(self.ports.signatures.add_cla_manager(signature_id, &manager).await?)
    }

    /// Remove a user, by LF username, from a signature's manager list
    pub async fn remove_cla_manager(&self, signature_id: &str, username: &str) -> Result<Signature> {
        debug!("removing CLA manager {username} from signature {signature_id}");
        Ok(self.ports.signatures.remove_cla_manager(signature_id, username).await?)
    }

    /// List individual signatures of a CLA group
    pub async fn get_cla_group_icla_signatures(
        &self,
        cla_group_id: &str,
        search_term: Option<String>,
        approved: Option<bool>,
        signed: Option<bool>,
        page: &PageRequest,
    ) -> Result<Page<IclaSignatureSummary>> {
        Ok(self
            .ports
            .signatures
            .get_cla_group_icla_signatures(cla_group_id, search_term, approved, signed, page)
            .await?)
    }

    /// List corporate signatures of a CLA group (single large page)
    pub async fn get_cla_group_ccla_signatures(
        &self,
        cla_group_id: &str,
        approved: Option<bool>,
        signed: Option<bool>,
    ) -> Result<Page<Signature>> {
        let query = ProjectSignaturesQuery {
            project_id: cla_group_id.to_string(),
            signature_type: Some(SignatureType::Corporate),
            approved,
            signed,
            page: PageRequest::first(CCLA_PAGE_SIZE),
            ..ProjectSignaturesQuery::default()
        };
        Ok(self.ports.signatures.get_project_signatures(&query).await?)
    }

    /// List employees contributing under corporate agreements of a CLA group
    pub async fn get_cla_group_corporate_contributors(
        &self,
        cla_group_id: &str,
        company_id: Option<String>,
        search_term: Option<String>,
    ) -> Result<Vec<CorporateContributor>> {
        Ok(self
            .ports
            .signatures
            .get_cla_group_corporate_contributors(cla_group_id, company_id, search_term)
            .await?)
    }
}
