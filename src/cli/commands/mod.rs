//! Command implementations

mod approval_list;
mod github_orgs;
mod invalidate;
mod managers;
mod signatures;

pub use approval_list::approval_list;
pub use github_orgs::github_orgs;
pub use invalidate::invalidate;
pub use managers::managers;
pub use signatures::{has_signed, signature, signatures};

use cla_signatures::api::ApiError;

/// Turn an API error into a CLI error
fn fail(err: ApiError) -> anyhow::Error {
    anyhow::anyhow!("{err}")
}
