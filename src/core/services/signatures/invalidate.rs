//! Parallel invalidation of signatures
//!
//! Every signature gets its own task; the caller waits for all of them.
//! Tasks are detached, so dropping the caller's future does not stop
//! invalidations already in flight.

use futures::future::join_all;
use log::{debug, info, warn};

use super::SignatureService;
use crate::core::models::{EventType, LogEventArgs};
use crate::core::services::error::Result;

impl SignatureService {
    /// Invalidate every signature of a CLA group
    ///
    /// Returns the number of signatures invalidation was attempted on.
    /// Individual failures are logged and do not stop the others.
    ///
    /// # Errors
    ///
    /// Returns an error only if the signatures cannot be listed.
    pub async fn invalidate_project_records(&self, project_id: &str, note: &str) -> Result<usize> {
        let signatures = self.ports.signatures.project_signatures(project_id).await?;
        if signatures.is_empty() {
            debug!("no signatures to invalidate for CLA group {project_id}");
            return Ok(0);
        }

        let ids = signatures.into_iter().map(|s| s.signature_id).collect::<Vec<_>>();
        info!("invalidating {} signatures for CLA group {project_id}", ids.len());
        Ok(self.invalidate_signatures(ids, note, None).await)
    }

    /// Invalidate the given signatures concurrently
    ///
    /// When `audit` is set, each successful invalidation records an
    /// `InvalidatedSignature` event built from it.
    pub(super) async fn invalidate_signatures(
        &self,
        signature_ids: Vec<String>,
        note: &str,
        audit: Option<LogEventArgs>,
    ) -> usize {
        let attempted = signature_ids.len();

        let handles = signature_ids.into_iter().map(|signature_id| {
            let signatures = self.ports.signatures.clone();
            let events = self.ports.events.clone();
            let note = note.to_string();
            let audit = audit.clone();
            tokio::spawn(async move {
                if let Err(err) = signatures.invalidate_project_record(&signature_id, &note).await {
                    warn!("unable to invalidate signature {signature_id}: {err:#}");
                    return;
                }
                debug!("invalidated signature {signature_id}");

                if let Some(args) = audit {
                    let args = LogEventArgs {
                        event_type: EventType::InvalidatedSignature,
                        event_data: format!("signature {signature_id} invalidated: {note}"),
                        ..args
                    };
                    if let Err(err) = events.log_event(args).await {
                        warn!("unable to record invalidation of {signature_id}: {err:#}");
                    }
                }
            })
        });

        for joined in join_all(handles).await {
            if let Err(err) = joined {
                warn!("invalidation task failed: {err}");
            }
        }

        attempted
    }
}
