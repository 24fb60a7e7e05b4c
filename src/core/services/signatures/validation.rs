//! Signature coverage checks
//!
//! A contributor is covered on a CLA group when they hold an approved,
//! signed ICLA, or when they acknowledged their company's CCLA and still
//! appear on that CCLA's approval list.

use log::debug;

use super::SignatureService;
use crate::core::models::{ApprovalCriteria, EmployeeSignaturesQuery, Signature, User};
use crate::core::services::error::Result;
use crate::core::services::matcher::{email_is_listed, matches_domain_patterns};

impl SignatureService {
    /// Whether the user is covered by an agreement on the CLA group
    ///
    /// # Errors
    ///
    /// Returns an error if a signature lookup fails or an approval list
    /// domain pattern is invalid. GitHub membership failures are not errors.
    pub async fn has_user_signed(&self, user: &User, project_id: &str) -> Result<bool> {
        let icla = self
            .ports
            .signatures
            .get_individual_signature(project_id, &user.user_id, Some(true), Some(true))
            .await?;
        if icla.is_some() {
            debug!("ICLA check passed for user {} on {project_id}", user.user_id);
            return Ok(true);
        }

        let Some(company_id) = user.company() else {
            debug!("user {} has no ICLA and no company on {project_id}", user.user_id);
            return Ok(false);
        };

        let query = EmployeeSignaturesQuery {
            company_id: company_id.to_string(),
            project_id: project_id.to_string(),
            next_key: None,
            page_size: Some(1),
        };
        let acknowledgements = self
            .ports
            .signatures
            .get_project_company_employee_signatures(&query, &ApprovalCriteria::for_user(&user.user_id))
            .await?;
        let Some(ecla) = acknowledgements.items.first() else {
            debug!("no employee acknowledgement for user {} with company {company_id}", user.user_id);
            return Ok(false);
        };
        debug!("located employee acknowledgement {}", ecla.signature_id);

        let ccla = self
            .ports
            .signatures
            .get_corporate_signature(project_id, company_id, Some(true), Some(true))
            .await?;
        match ccla {
            Some(ccla) => self.user_is_approved(user, &ccla).await,
            None => Ok(false),
        }
    }

    /// Whether the user appears on the approval list of a corporate signature
    ///
    /// Checks the email list, then the domain patterns, then GitHub
    /// organization membership.
    ///
    /// # Errors
    ///
    /// Returns an error if a domain pattern does not compile.
    pub async fn user_is_approved(&self, user: &User, ccla: &Signature) -> Result<bool> {
        let emails = user.all_emails();
        let list = &ccla.approval_list;

        if email_is_listed(&emails, &list.email) {
            return Ok(true);
        }
        if list.email.is_empty() {
            debug!("no email approval list on {}", ccla.signature_id);
        }

        if matches_domain_patterns(&emails, &list.domain)? {
            return Ok(true);
        }

        let Some(login) = user.github_login() else {
            return Ok(false);
        };
        for org in &list.github_org {
            match self.ports.github.membership(login, org).await {
                Ok(Some(_)) => {
                    debug!("{login} is a member of approved organization {org}");
                    return Ok(true);
                },
                Ok(None) => debug!("{login} is not in organization {org}"),
                Err(err) => {
                    debug!("membership lookup for {login} in {org} failed, skipping the rest: {err}");
                    break;
                },
            }
        }

        Ok(false)
    }
}
