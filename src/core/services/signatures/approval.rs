//! Approval list update workflow
//!
//! A CLA manager edits the approval list of their company's corporate
//! signature. The update itself is authoritative; everything that follows
//! it (audit events, emails, invalidation of employees that lost coverage,
//! pull request reconciliation) is best effort and only logged on failure.
//! Auto-provisioning of employee acknowledgements is the exception: a user
//! that cannot be looked up or created aborts the operation.

use chrono::Utc;
use log::{debug, info, warn};
use uuid::Uuid;

use super::SignatureService;
use crate::core::models::{
    ActiveSignatureMetadata, ApprovalCriteria, ApprovalList, ApprovalListDelta, AuthUser, ClaGroup,
    Company, EmployeeSignaturesQuery, EventType, LogEventArgs, PageRequest, Signature, User,
};
use crate::core::ports::EmailMessage;
use crate::core::services::email::{
    contributor_added_email, contributor_removed_email, manager_update_email,
};
use crate::core::services::error::{Result, SignatureError};
use crate::core::services::matcher::{contains_exact, matches_domain_patterns};

/// Note recorded on users created while provisioning acknowledgements
pub const AUTO_CREATE_NOTE: &str = "auto-create ECLA user from CLA Manager approval list update";

/// Note recorded on acknowledgements invalidated by an approval list removal
pub const REMOVED_FROM_LIST_NOTE: &str = "removed from the corporate approval list";

const EMPLOYEE_SCAN_PAGE_SIZE: i64 = 100;

impl SignatureService {
    /// Apply approval list changes to a company's corporate signature
    ///
    /// Only a CLA manager of the signature may do this. Returns the updated
    /// corporate signature.
    ///
    /// # Errors
    ///
    /// - `BadRequest` if the corporate signature lookup fails
    /// - `NotFound` if there is no active corporate signature or no user
    ///   record for the caller
    /// - `Forbidden` if the caller is not a manager; nothing is changed
    /// - the underlying error if the update or employee provisioning fails
    pub async fn update_approval_list(
        &self,
        auth_user: &AuthUser,
        cla_group: &ClaGroup,
        company: &Company,
        cla_group_id: &str,
        delta: &ApprovalListDelta,
    ) -> Result<Signature> {
        debug!(
            "approval list update by {} for company {} on CLA group {cla_group_id}",
            auth_user.username, company.company_id
        );

        let corporate = self
            .ports
            .signatures
            .get_project_company_signature(
                &company.company_id,
                cla_group_id,
                Some(true),
                Some(true),
                &PageRequest::first(1),
            )
            .await
            .map_err(|err| {
                warn!("corporate signature lookup failed: {err:#}");
                SignatureError::BadRequest(format!(
                    "unable to locate corporate signature for company {} on CLA group {cla_group_id}: {err}",
                    company.company_id
                ))
            })?
            .ok_or_else(|| {
                SignatureError::NotFound(format!(
                    "no approved, signed corporate signature for company {} on CLA group {cla_group_id}",
                    company.company_id
                ))
            })?;

        if !auth_user.is_in_acl(&corporate.acl) {
            warn!(
                "{} / {} is not a CLA manager of {}",
                auth_user.username, auth_user.email, corporate.signature_id
            );
            return Err(SignatureError::Forbidden(format!(
                "CLA manager {} / {} is not authorized to approve requests for company {} ({}) on project {} ({})",
                auth_user.username,
                auth_user.email,
                company.company_name,
                company.company_id,
                cla_group.project_name,
                cla_group.project_id
            )));
        }

        let manager = self
            .ports
            .users
            .get_user_by_username(&auth_user.username)
            .await?
            .ok_or_else(|| SignatureError::NotFound(format!("user {}", auth_user.username)))?;

        let updated = self
            .ports
            .signatures
            .update_approval_list(&manager, cla_group, &company.company_id, delta)
            .await?;
        info!(
            "approval list of {} updated by {}",
            updated.signature_id, manager.username
        );

        let audit = LogEventArgs {
            event_type: EventType::InvalidatedSignature,
            cla_group_id: cla_group.project_id.clone(),
            project_sfid: cla_group.project_external_id.clone(),
            company_id: Some(company.company_id.clone()),
            user_id: manager.user_id.clone(),
            lf_username: manager.username.clone(),
            event_data: String::new(),
        };

        if delta.has_removals() {
            self.invalidate_removed_employees(&company.company_id, cla_group_id, &updated.approval_list, delta, &audit)
                .await;
        }

        self.spawn_audit_events(&audit, delta);

        for cla_manager in &corporate.acl {
            match cla_manager.best_email() {
                Some(email) => {
                    let message = manager_update_email(company, cla_group, &cla_manager.username, email, delta);
                    self.send_email(&message).await;
                },
                None => warn!("CLA manager {} has no email address", cla_manager.username),
            }
        }
        self.notify_contributors(company, cla_group, delta).await;

        if corporate.auto_create_ecla {
            debug!("auto-create ECLA enabled on {}", corporate.signature_id);
            let provisioned = self.provision_employees(company, cla_group, delta).await?;
            if provisioned.is_empty() {
                debug!("no acknowledgements created; nothing to reconcile");
            } else {
                self.reconcile_provisioned(&provisioned).await;
            }
        }

        Ok(updated)
    }

    /// Record one audit event per changed entry, off the request path
    fn spawn_audit_events(&self, template: &LogEventArgs, delta: &ApprovalListDelta) {
        let entries = delta
            .changes()
            .flat_map(|(change, values)| {
                values.iter().map(move |value| LogEventArgs {
                    event_type: EventType::from(change),
                    event_data: format!("{} {value}", change.label()),
                    ..template.clone()
                })
            })
            .collect::<Vec<_>>();
        if entries.is_empty() {
            return;
        }

        let events = self.ports.events.clone();
        tokio::spawn(async move {
            for args in entries {
                let event_type = args.event_type;
                if let Err(err) = events.log_event(args).await {
                    warn!("unable to record {event_type} event: {err:#}");
                }
            }
        });
    }

    async fn send_email(&self, message: &EmailMessage) {
        if let Err(err) = self.ports.mailer.send(message).await {
            warn!(
                "unable to send \"{}\" to {}: {err:#}",
                message.subject,
                message.recipients.join(", ")
            );
        }
    }

    async fn notify_contributors(&self, company: &Company, cla_group: &ClaGroup, delta: &ApprovalListDelta) {
        for (email, added) in delta
            .add_email
            .iter()
            .map(|e| (e, true))
            .chain(delta.remove_email.iter().map(|e| (e, false)))
        {
            let email = email.trim();
            if email.is_empty() {
                continue;
            }
            let message = if added {
                contributor_added_email(company, cla_group, email, email)
            } else {
                contributor_removed_email(company, cla_group, email, email)
            };
            self.send_email(&message).await;
        }

        let github = delta
            .add_github_username
            .iter()
            .map(|u| (u, true, Identity::GitHub))
            .chain(delta.remove_github_username.iter().map(|u| (u, false, Identity::GitHub)));
        let gitlab = delta
            .add_gitlab_username
            .iter()
            .map(|u| (u, true, Identity::GitLab))
            .chain(delta.remove_gitlab_username.iter().map(|u| (u, false, Identity::GitLab)));

        for (username, added, identity) in github.chain(gitlab) {
            let username = username.trim();
            if username.is_empty() {
                continue;
            }
            let lookup = match identity {
                Identity::GitHub => self.ports.users.get_user_by_github_username(username).await,
                Identity::GitLab => self.ports.users.get_user_by_gitlab_username(username).await,
            };
            let user = match lookup {
                Ok(Some(user)) => user,
                Ok(None) => {
                    debug!("no user record for {identity:?} login {username}; skipping email");
                    continue;
                },
                Err(err) => {
                    warn!("unable to look up {identity:?} login {username}: {err:#}");
                    continue;
                },
            };
            let Some(email) = user.best_email() else {
                debug!("user {} has no email; skipping", user.user_id);
                continue;
            };
            let name = if user.name.is_empty() { username } else { user.name.as_str() };
            let message = if added {
                contributor_added_email(company, cla_group, name, email)
            } else {
                contributor_removed_email(company, cla_group, name, email)
            };
            self.send_email(&message).await;
        }
    }

    /// Create an employee acknowledgement for every newly approved identity
    /// that does not already hold an active one
    ///
    /// Returns the users that are now acknowledged, including those that
    /// already were, so their pull requests get re-checked.
    async fn provision_employees(
        &self,
        company: &Company,
        cla_group: &ClaGroup,
        delta: &ApprovalListDelta,
    ) -> Result<Vec<User>> {
        let mut provisioned: Vec<User> = Vec::new();

        for email in delta.add_email.iter().map(|e| e.trim()).filter(|e| !e.is_empty()) {
            let user = match self.ports.users.get_user_by_email(email).await? {
                Some(user) => user,
                None => {
                    debug!("no user with email {email}; creating one");
                    let model = create_user_model(None, None, Some(email), &company.company_id);
                    self.ports.users.create_user(&model).await?
                },
            };
            self.acknowledge(company, cla_group, user, &mut provisioned).await?;
        }

        for login in delta
            .add_github_username
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
        {
            let user = match self.ports.users.get_user_by_github_username(login).await? {
                Some(user) => user,
                None => {
                    debug!("no user with GitHub login {login}; fetching GitHub details");
                    let details = self
                        .ports
                        .github
                        .user_details(login)
                        .await?
                        .filter(|d| d.id.is_some())
                        .ok_or_else(|| SignatureError::NotFound(format!("GitHub user {login}")))?;
                    let github_id = details.id.map(|id| id.to_string());
                    let model = create_user_model(
                        Some(login),
                        github_id.as_deref(),
                        details.email.as_deref(),
                        &company.company_id,
                    );
                    self.ports.users.create_user(&model).await?
                },
            };
            self.acknowledge(company, cla_group, user, &mut provisioned).await?;
        }

        Ok(provisioned)
    }

    async fn acknowledge(
        &self,
        company: &Company,
        cla_group: &ClaGroup,
        user: User,
        provisioned: &mut Vec<User>,
    ) -> Result<()> {
        if provisioned.iter().any(|u| u.user_id == user.user_id) {
            debug!("user {} already acknowledged in this update", user.user_id);
            return Ok(());
        }

        let query = EmployeeSignaturesQuery {
            company_id: company.company_id.clone(),
            project_id: cla_group.project_id.clone(),
            next_key: None,
            page_size: Some(EMPLOYEE_SCAN_PAGE_SIZE),
        };
        let existing = self
            .ports
            .signatures
            .get_project_company_employee_signatures(&query, &ApprovalCriteria::for_user(&user.user_id))
            .await?;
        if let Some(active) = existing.items.iter().find(|s| s.approved) {
            debug!(
                "user {} already holds employee acknowledgement {}",
                user.user_id, active.signature_id
            );
            provisioned.push(user);
            return Ok(());
        }

        let ecla = self
            .ports
            .signatures
            .create_project_company_employee_signature(company, cla_group, &user)
            .await?;
        info!("created employee acknowledgement {} for user {}", ecla.signature_id, user.user_id);
        provisioned.push(user);
        Ok(())
    }

    /// Re-check the pull requests provisioned users are signing from
    async fn reconcile_provisioned(&self, users: &[User]) {
        let mut seen: Vec<(String, String)> = Vec::new();

        for user in users {
            let metadata = match self.ports.signatures.get_active_signature_metadata(&user.user_id).await {
                Ok(Some(metadata)) => metadata,
                Ok(None) => {
                    debug!("no active signing session for user {}", user.user_id);
                    continue;
                },
                Err(err) => {
                    warn!("unable to load signing session of user {}: {err:#}", user.user_id);
                    continue;
                },
            };

            let key = (metadata.repository_id.clone(), metadata.pull_request_id.clone());
            if seen.contains(&key) {
                continue;
            }
            seen.push(key);

            if let Err(err) = self.reconcile_pull_request(&metadata).await {
                warn!(
                    "unable to update pull request {} of repository {}: {err}",
                    metadata.pull_request_id, metadata.repository_id
                );
            }
        }
    }

    async fn reconcile_pull_request(&self, metadata: &ActiveSignatureMetadata) -> Result<()> {
        let repository = self
            .ports
            .repositories
            .get_repository(&metadata.repository_id)
            .await?
            .ok_or_else(|| SignatureError::NotFound(format!("repository {}", metadata.repository_id)))?;
        if !repository.enabled {
            debug!(
                "repository {} of PR {} is not enabled",
                repository.repository_url, metadata.pull_request_id
            );
            return Err(SignatureError::RepositoryDisabled(repository.repository_url));
        }

        let github_org = self
            .ports
            .github_orgs
            .get_github_organization_by_name(&repository.organization_name)
            .await?
            .ok_or_else(|| {
                SignatureError::NotFound(format!("GitHub organization {}", repository.organization_name))
            })?;

        let repository_id = parse_id("repository ID", &metadata.repository_id)?;
        let pull_request_id = parse_id("pull request ID", &metadata.pull_request_id)?;

        self.update_change_request(&github_org, repository_id, pull_request_id, &metadata.project_id)
            .await?;
        Ok(())
    }

    /// Invalidate acknowledgements whose identity was removed and is no
    /// longer covered by the updated list
    async fn invalidate_removed_employees(
        &self,
        company_id: &str,
        cla_group_id: &str,
        list: &ApprovalList,
        delta: &ApprovalListDelta,
        audit: &LogEventArgs,
    ) {
        let acknowledgements = match self.employee_acknowledgements(company_id, cla_group_id).await {
            Ok(acknowledgements) => acknowledgements,
            Err(err) => {
                warn!("unable to list employee acknowledgements of {company_id}: {err}");
                return;
            },
        };

        let mut stale = Vec::new();
        for ecla in acknowledgements.iter().filter(|s| s.approved) {
            match lost_coverage(ecla, list, delta) {
                Ok(true) => stale.push(ecla.signature_id.clone()),
                Ok(false) => {},
                Err(err) => warn!("unable to evaluate acknowledgement {}: {err}", ecla.signature_id),
            }
        }

        if stale.is_empty() {
            return;
        }
        info!("invalidating {} employee acknowledgements of {company_id}", stale.len());
        self.invalidate_signatures(stale, REMOVED_FROM_LIST_NOTE, Some(audit.clone()))
            .await;
    }

    async fn employee_acknowledgements(&self, company_id: &str, cla_group_id: &str) -> Result<Vec<Signature>> {
        let mut all = Vec::new();
        let mut next_key = None;
        loop {
            let query = EmployeeSignaturesQuery {
                company_id: company_id.to_string(),
                project_id: cla_group_id.to_string(),
                next_key,
                page_size: Some(EMPLOYEE_SCAN_PAGE_SIZE),
            };
            let page = self
                .ports
                .signatures
                .get_project_company_employee_signatures(&query, &ApprovalCriteria::default())
                .await?;
            all.extend(page.items);
            match page.last_key {
                Some(key) => next_key = Some(key),
                None => break,
            }
        }
        Ok(all)
    }
}

#[derive(Debug, Clone, Copy)]
enum Identity {
    GitHub,
    GitLab,
}

/// Whether an acknowledgement matched a removed entry and no longer
/// matches anything on the updated list
fn lost_coverage(
    ecla: &Signature,
    list: &ApprovalList,
    delta: &ApprovalListDelta,
) -> std::result::Result<bool, regex::Error> {
    let email = ecla.user_email.as_deref().map(str::trim).filter(|e| !e.is_empty());
    let github = ecla.user_github_username.as_deref().filter(|u| !u.is_empty());
    let gitlab = ecla.user_gitlab_username.as_deref().filter(|u| !u.is_empty());
    let emails = email.into_iter().collect::<Vec<_>>();

    let removed = email.is_some_and(|e| contains_exact(&delta.remove_email, e))
        || matches_domain_patterns(&emails, &delta.remove_domain)?
        || github.is_some_and(|u| contains_exact(&delta.remove_github_username, u))
        || gitlab.is_some_and(|u| contains_exact(&delta.remove_gitlab_username, u));
    if !removed {
        return Ok(false);
    }

    let still_listed = email.is_some_and(|e| contains_exact(&list.email, e))
        || matches_domain_patterns(&emails, &list.domain)?
        || github.is_some_and(|u| contains_exact(&list.github_username, u))
        || gitlab.is_some_and(|u| contains_exact(&list.gitlab_username, u));
    Ok(!still_listed)
}

/// Build a new user record for auto-provisioning
#[must_use]
pub fn create_user_model(
    github_username: Option<&str>,
    github_id: Option<&str>,
    email: Option<&str>,
    company_id: &str,
) -> User {
    let now = Utc::now().to_rfc3339();
    let email = email.map(str::trim).filter(|e| !e.is_empty());
    User {
        user_id: Uuid::new_v4().to_string(),
        username: String::new(),
        name: github_username.unwrap_or_default().to_string(),
        emails: email.map(|e| vec![e.to_string()]).unwrap_or_default(),
        lf_email: None,
        github_id: github_id.map(str::to_string),
        github_username: github_username.map(str::to_string),
        gitlab_id: None,
        gitlab_username: None,
        company_id: Some(company_id.to_string()),
        note: Some(AUTO_CREATE_NOTE.to_string()),
        created: now.clone(),
        modified: now,
    }
}

fn parse_id(field: &'static str, value: &str) -> Result<i64> {
    value.trim().parse().map_err(|_| SignatureError::InvalidIdentifier {
        field,
        value: value.to_string(),
    })
}
