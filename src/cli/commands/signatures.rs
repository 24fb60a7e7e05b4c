//! Signature queries - show, list and coverage checks

use cla_signatures::api::{self, HasSignedRequest, IclaListRequest, ProjectCompanyRequest};
use cla_signatures::core::models::{
    CompanySignaturesQuery, EmployeeSignaturesQuery, PageRequest, ProjectSignaturesQuery,
    SortOrder, UserSignaturesQuery,
};
use cla_signatures::output::{CoverageResult, ListResult, ReportResult, SignatureResult};

use super::fail;
use crate::cli::app::{PageArgs, SignaturesAction};
use crate::cli::context::Context;

/// Page size for CLA group listings when none is given
const PROJECT_PAGE_SIZE: i64 = 100;

fn page_request(page: PageArgs) -> PageRequest {
    PageRequest::with_default(page.next_key, page.page_size, PROJECT_PAGE_SIZE)
}

/// Show one signature
pub async fn signature(ctx: &Context, id: &str) -> anyhow::Result<()> {
    let signature = api::get_signature(&ctx.service, id).await.map_err(fail)?;
    SignatureResult { signature }.render(ctx.mode);
    Ok(())
}

/// Check whether a contributor is covered on a CLA group
pub async fn has_signed(ctx: &Context, username: String, project_id: String) -> anyhow::Result<()> {
    let request = HasSignedRequest { username, project_id };
    let signed = api::has_signed(&ctx.service, &request).await.map_err(fail)?;
    CoverageResult {
        user_id: request.username,
        project_id: request.project_id,
        signed,
    }
    .render(ctx.mode);
    Ok(())
}

/// Handle signature listing subcommands
pub async fn signatures(ctx: &Context, action: SignaturesAction) -> anyhow::Result<()> {
    let service = &ctx.service;
    match action {
        SignaturesAction::Project {
            project_id,
            signature_type,
            search,
            approved,
            signed,
            page,
        } => {
            let query = ProjectSignaturesQuery {
                project_id,
                signature_type,
                search_term: search,
                approved,
                signed,
                page: page_request(page),
            };
            let page = api::list_project_signatures(service, &query).await.map_err(fail)?;
            ListResult::from(page).render(ctx.mode);
        },
        SignaturesAction::Company {
            company_id,
            project: Some(project_id),
            desc,
            page,
            ..
        } => {
            let request = ProjectCompanyRequest {
                company_id,
                project_id,
                sort_order: if desc { SortOrder::Desc } else { SortOrder::Asc },
                next_key: page.next_key,
                page_size: page.page_size,
            };
            let page = api::list_project_company_signatures(service, request)
                .await
                .map_err(fail)?;
            ListResult::from(page).render(ctx.mode);
        },
        SignaturesAction::Company {
            company_id,
            project: None,
            user_id,
            signature_type,
            page,
            ..
        } => {
            let query = CompanySignaturesQuery {
                company_id,
                user_id,
                signature_type,
                next_key: page.next_key,
                page_size: page.page_size,
            };
            let page = api::list_company_signatures(service, &query).await.map_err(fail)?;
            ListResult::from(page).render(ctx.mode);
        },
        SignaturesAction::User { user_id, name, page } => {
            let query = UserSignaturesQuery {
                user_id,
                user_name: name,
                next_key: page.next_key,
                page_size: page.page_size,
            };
            let page = api::list_user_signatures(service, &query).await.map_err(fail)?;
            ListResult::from(page).render(ctx.mode);
        },
        SignaturesAction::Employees {
            company_id,
            project_id,
            page,
        } => {
            let query = EmployeeSignaturesQuery {
                company_id,
                project_id,
                next_key: page.next_key,
                page_size: page.page_size,
            };
            let page = api::list_employee_signatures(service, &query).await.map_err(fail)?;
            ListResult::from(page).render(ctx.mode);
        },
        SignaturesAction::Icla {
            cla_group_id,
            search,
            approved,
            signed,
            page,
        } => {
            let request = IclaListRequest {
                cla_group_id,
                search_term: search,
                approved,
                signed,
                next_key: page.next_key,
                page_size: page.page_size,
            };
            let page = api::list_icla_signatures(service, request).await.map_err(fail)?;
            ListResult::from(page).render(ctx.mode);
        },
        SignaturesAction::Ccla {
            cla_group_id,
            approved,
            signed,
        } => {
            let page = api::list_ccla_signatures(service, &cla_group_id, approved, signed)
                .await
                .map_err(fail)?;
            ListResult::from(page).render(ctx.mode);
        },
        SignaturesAction::Contributors {
            cla_group_id,
            company,
            search,
        } => {
            let contributors = api::list_corporate_contributors(service, &cla_group_id, company, search)
                .await
                .map_err(fail)?;
            ListResult::from(contributors).render(ctx.mode);
        },
        SignaturesAction::CompanyIds { cla_group_id } => {
            let ids = api::list_signed_company_ids(service, &cla_group_id).await.map_err(fail)?;
            ListResult::from(ids).render(ctx.mode);
        },
        SignaturesAction::Report {
            project_id,
            signature_type,
            page,
        } => {
            let query = ProjectSignaturesQuery {
                project_id,
                signature_type,
                page: page_request(page),
                ..ProjectSignaturesQuery::default()
            };
            let report = api::project_report(service, &query).await.map_err(fail)?;
            ReportResult { report }.render(ctx.mode);
        },
    }
    Ok(())
}
