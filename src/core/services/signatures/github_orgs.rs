//! GitHub organization entries on a corporate approval list

use log::{debug, warn};

use super::SignatureService;
use crate::core::models::GithubOrg;
use crate::core::services::error::{Result, SignatureError};

impl SignatureService {
    /// GitHub organizations on the approval list of a signature
    ///
    /// With an access token, the caller's own organizations that are not
    /// yet listed are appended so they can be offered for selection.
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for an empty signature ID, or the underlying
    /// error when the repository or GitHub call fails.
    pub async fn get_github_organizations_from_approval_list(
        &self,
        signature_id: &str,
        access_token: Option<&str>,
    ) -> Result<Vec<GithubOrg>> {
        if signature_id.trim().is_empty() {
            return Err(SignatureError::BadRequest("signature ID is empty".to_string()));
        }

        let mut orgs = self
            .ports
            .signatures
            .get_github_organizations_from_approval_list(signature_id)
            .await?;

        if let Some(token) = access_token.filter(|t| !t.is_empty()) {
            debug!("scanning the caller's GitHub organizations");
            for login in self.ports.github.user_organizations(token).await? {
                if !orgs.iter().any(|o| o.id == login) {
                    orgs.push(GithubOrg { id: login });
                }
            }
        }

        Ok(orgs)
    }

    /// Add a GitHub organization to the approval list of a signature
    ///
    /// # Errors
    ///
    /// Returns `BadRequest` for empty IDs and `Forbidden` when organization
    /// validation is on and the caller does not belong to the organization.
    pub async fn add_github_organization_to_approval_list(
        &self,
        signature_id: &str,
        organization_id: &str,
        access_token: Option<&str>,
    ) -> Result<Vec<GithubOrg>> {
        check_ids(signature_id, organization_id)?;
        self.verify_org_access(signature_id, organization_id, access_token).await?;

        Ok(self
            .ports
            .signatures
            .add_github_organization_to_approval_list(signature_id, organization_id)
            .await?)
    }

    /// Remove a GitHub organization from the approval list of a signature
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_github_organization_to_approval_list`].
    pub async fn delete_github_organization_from_approval_list(
        &self,
        signature_id: &str,
        organization_id: &str,
        access_token: Option<&str>,
    ) -> Result<Vec<GithubOrg>> {
        check_ids(signature_id, organization_id)?;
        self.verify_org_access(signature_id, organization_id, access_token).await?;

        Ok(self
            .ports
            .signatures
            .delete_github_organization_from_approval_list(signature_id, organization_id)
            .await?)
    }

    async fn verify_org_access(
        &self,
        signature_id: &str,
        organization_id: &str,
        access_token: Option<&str>,
    ) -> Result<()> {
        if !self.settings.github_org_validation {
            debug!("GitHub organization validation disabled");
            return Ok(());
        }

        let Some(token) = access_token.filter(|t| !t.is_empty()) else {
            warn!("no GitHub login for signature {signature_id}, organization {organization_id}");
            return Err(SignatureError::Forbidden(format!(
                "a GitHub login is required to change organization {organization_id}"
            )));
        };

        let orgs = self.ports.github.user_organizations(token).await?;
        if orgs.iter().any(|o| o == organization_id) {
            Ok(())
        } else {
            warn!("caller is not a member of GitHub organization {organization_id}");
            Err(SignatureError::Forbidden(format!(
                "user is not authorized for GitHub organization {organization_id}"
            )))
        }
    }
}

fn check_ids(signature_id: &str, organization_id: &str) -> Result<()> {
    if signature_id.trim().is_empty() {
        return Err(SignatureError::BadRequest("signature ID is empty".to_string()));
    }
    if organization_id.trim().is_empty() {
        return Err(SignatureError::BadRequest("organization ID is empty".to_string()));
    }
    Ok(())
}
