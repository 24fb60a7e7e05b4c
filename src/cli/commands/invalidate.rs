//! Invalidate command - invalidate every signature of a CLA group

use cla_signatures::api::{self, InvalidateRequest};
use cla_signatures::output::InvalidateResult;

use super::fail;
use crate::cli::context::Context;

/// Invalidate a CLA group's signatures
pub async fn invalidate(ctx: &Context, project_id: String, note: String) -> anyhow::Result<()> {
    let request = InvalidateRequest { project_id, note };
    let attempted = api::invalidate_project(&ctx.service, &request).await.map_err(fail)?;
    InvalidateResult {
        project_id: request.project_id,
        attempted,
    }
    .render(ctx.mode);
    Ok(())
}
