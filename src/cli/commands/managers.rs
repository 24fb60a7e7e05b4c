//! Managers command - add or remove CLA managers

use cla_signatures::api::{self, ManagerRequest};
use cla_signatures::output::OperationResult;

use super::fail;
use crate::cli::app::ManagersAction;
use crate::cli::context::Context;

/// Handle CLA manager subcommands
pub async fn managers(ctx: &Context, action: ManagersAction) -> anyhow::Result<()> {
    let message = match action {
        ManagersAction::Add {
            signature_id,
            username,
        } => {
            let request = ManagerRequest { signature_id, username };
            let signature = api::add_manager(&ctx.service, &request).await.map_err(fail)?;
            format!(
                "Added {} as CLA manager of {} ({} manager(s))",
                request.username,
                signature.signature_id,
                signature.acl.len()
            )
        },
        ManagersAction::Remove {
            signature_id,
            username,
        } => {
            let request = ManagerRequest { signature_id, username };
            let signature = api::remove_manager(&ctx.service, &request).await.map_err(fail)?;
            format!(
                "Removed {} from CLA managers of {} ({} manager(s))",
                request.username,
                signature.signature_id,
                signature.acl.len()
            )
        },
    };

    OperationResult {
        success: true,
        message,
    }
    .render(ctx.mode);
    Ok(())
}
