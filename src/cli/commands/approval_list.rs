//! Approval list command - edit corporate approval lists

use cla_signatures::api::{self, UpdateApprovalListRequest};
use cla_signatures::core::models::AuthUser;
use cla_signatures::output::SignatureResult;

use super::fail;
use crate::cli::app::ApprovalListAction;
use crate::cli::context::Context;

/// Handle approval list subcommands
pub async fn approval_list(ctx: &Context, action: ApprovalListAction) -> anyhow::Result<()> {
    match action {
        ApprovalListAction::Update {
            cla_group,
            company,
            as_user,
            as_email,
            delta,
        } => {
            let caller = AuthUser::new(as_user, as_email);
            let request = UpdateApprovalListRequest {
                cla_group_id: cla_group,
                company_id: company,
                delta: delta.into(),
            };
            let signature = api::update_approval_list(&ctx.service, &caller, &request)
                .await
                .map_err(fail)?;
            SignatureResult { signature }.render(ctx.mode);
        },
    }
    Ok(())
}
