//! Pull request commit author triage

use log::{debug, warn};

use super::SignatureService;
use crate::core::models::{CommitAuthorTriage, GithubOrganization};
use crate::core::ports::{CommitState, CommitStatus};
use crate::core::services::error::Result;

/// Context name of the commit status we publish
pub const STATUS_CONTEXT: &str = "cla/signatures";

impl SignatureService {
    /// Split the commit authors of a pull request into covered and uncovered
    ///
    /// An author that cannot be resolved to a user, or whose coverage check
    /// fails, counts as unsigned and ends the triage early; authors after it
    /// are left out of both lists. A triage that stopped early is therefore
    /// never reported as a success. When the pull request has commits, a status reflecting the
    /// result is posted on the last one.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository or the commit authors cannot be
    /// fetched from GitHub.
    pub async fn update_change_request(
        &self,
        github_org: &GithubOrganization,
        repository_id: i64,
        pull_request_id: i64,
        project_id: &str,
    ) -> Result<CommitAuthorTriage> {
        let installation_id = github_org.installation_id;
        let repository = self.ports.github.repository(installation_id, repository_id).await?;

        debug!("fetching commit authors for PR {pull_request_id} on {}/{}", repository.owner, repository.name);
        let authors = self
            .ports
            .github
            .pull_request_commit_authors(installation_id, pull_request_id, &repository.owner, &repository.name)
            .await?;
        let last_sha = authors.last().map(|a| a.sha.clone());

        let mut triage = CommitAuthorTriage::default();
        for summary in authors {
            if !summary.is_valid() {
                triage.unsigned.push(summary);
                continue;
            }
            let login = summary.login().unwrap_or_default().to_string();

            let user = match self.ports.users.get_user_by_github_username(&login).await {
                Ok(Some(user)) => user,
                Ok(None) => {
                    debug!("no user record for commit author {login}");
                    triage.unsigned.push(summary);
                    break;
                },
                Err(err) => {
                    warn!("unable to look up commit author {login}: {err:#}");
                    triage.unsigned.push(summary);
                    break;
                },
            };

            match self.has_user_signed(&user, project_id).await {
                Ok(true) => triage.signed.push(summary),
                Ok(false) => triage.unsigned.push(summary),
                Err(err) => {
                    warn!("unable to check signature of {login}: {err}");
                    triage.unsigned.push(summary);
                    break;
                },
            }
        }

        debug!(
            "PR {pull_request_id}: {} signed, {} missing",
            triage.signed.len(),
            triage.unsigned.len()
        );

        if let Some(sha) = last_sha {
            let status = commit_status(&triage);
            if let Err(err) = self
                .ports
                .github
                .create_commit_status(installation_id, &repository.owner, &repository.name, &sha, &status)
                .await
            {
                warn!("unable to post commit status on {sha}: {err}");
            }
        }

        Ok(triage)
    }
}

/// Status describing a triage result
#[must_use]
pub fn commit_status(triage: &CommitAuthorTriage) -> CommitStatus {
    if triage.all_signed() {
        CommitStatus {
            state: CommitState::Success,
            description: "The committers are authorized under a signed CLA.".to_string(),
            context: STATUS_CONTEXT.to_string(),
        }
    } else {
        CommitStatus {
            state: CommitState::Failure,
            description: format!(
                "{} committer(s) are not covered by a signed CLA.",
                triage.unsigned.len()
            ),
            context: STATUS_CONTEXT.to_string(),
        }
    }
}
