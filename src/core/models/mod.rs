//! Domain models for CLA signatures
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Signature`] - An individual, corporate or employee agreement record
//! - [`ApprovalList`] / [`ApprovalListDelta`] - Corporate allow-lists and edits to them
//! - [`User`] / [`AuthUser`] - Contributor identities and the authenticated caller
//! - [`Page`] - Cursor-based pagination shared by every listing

mod approval_list;
mod commit;
mod event;
mod organization;
mod page;
mod query;
mod report;
mod signature;
mod signature_type;
mod user;

pub use approval_list::{ApprovalChange, ApprovalList, ApprovalListDelta};
pub use commit::{CommitAuthorTriage, GitHubUser, UserCommitSummary};
pub use event::{Event, EventType, LogEventArgs};
pub use organization::{ActiveSignatureMetadata, ClaGroup, ClaRepository, Company, GithubOrganization};
pub use page::{FALLBACK_PAGE_SIZE, Page, PageRequest};
pub use query::{
    ApprovalCriteria, CompanySignaturesQuery, EmployeeSignaturesQuery, ProjectSignaturesQuery,
    SortOrder, UserSignaturesQuery,
};
pub use report::{CorporateContributor, IclaSignatureSummary, SignatureReport, SignatureSummary};
pub use signature::{GithubOrg, Signature, SignatureCompanyId};
pub use signature_type::SignatureType;
pub use user::{AuthUser, User};
