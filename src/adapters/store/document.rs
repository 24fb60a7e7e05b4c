//! On-disk document layout

use serde::{Deserialize, Serialize};

use crate::core::models::{
    ActiveSignatureMetadata, ClaGroup, ClaRepository, Company, Event, GithubOrganization, Signature,
    User,
};

/// Every record kept by the JSON store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreData {
    /// Signatures of every type
    pub signatures: Vec<Signature>,
    /// Users
    pub users: Vec<User>,
    /// Companies
    pub companies: Vec<Company>,
    /// CLA groups
    pub cla_groups: Vec<ClaGroup>,
    /// Repositories enrolled for CLA checks
    pub repositories: Vec<ClaRepository>,
    /// GitHub organizations with the app installed
    pub github_organizations: Vec<GithubOrganization>,
    /// Pull requests users are currently signing from
    pub signature_metadata: Vec<ActiveSignatureMetadata>,
    /// Audit trail
    pub events: Vec<Event>,
}

impl StoreData {
    pub(super) fn signature_mut(&mut self, signature_id: &str) -> anyhow::Result<&mut Signature> {
        self.signatures
            .iter_mut()
            .find(|s| s.signature_id == signature_id)
            .ok_or_else(|| anyhow::anyhow!("signature not found: {signature_id}"))
    }
}
