//! GitHub organizations command - list, add, remove

use cla_signatures::api::{self, GithubOrgRequest};
use cla_signatures::output::OrganizationsResult;

use super::fail;
use crate::cli::app::GithubOrgsAction;
use crate::cli::context::Context;

/// Handle GitHub organization subcommands
pub async fn github_orgs(ctx: &Context, action: GithubOrgsAction) -> anyhow::Result<()> {
    let (signature_id, organizations) = match action {
        GithubOrgsAction::List { signature_id } => {
            let orgs = api::list_github_organizations(&ctx.service, &signature_id, ctx.token())
                .await
                .map_err(fail)?;
            (signature_id, orgs)
        },
        GithubOrgsAction::Add { signature_id, org } => {
            let request = GithubOrgRequest {
                signature_id,
                organization_id: org,
            };
            let orgs = api::add_github_organization(&ctx.service, &request, ctx.token())
                .await
                .map_err(fail)?;
            (request.signature_id, orgs)
        },
        GithubOrgsAction::Remove { signature_id, org } => {
            let request = GithubOrgRequest {
                signature_id,
                organization_id: org,
            };
            let orgs = api::remove_github_organization(&ctx.service, &request, ctx.token())
                .await
                .map_err(fail)?;
            (request.signature_id, orgs)
        },
    };

    OrganizationsResult {
        signature_id,
        organizations,
    }
    .render(ctx.mode);
    Ok(())
}
