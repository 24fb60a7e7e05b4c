//! Port traits (interfaces) for external collaborators
//!
//! These traits define the boundaries between the signature workflows
//! and the systems they depend on (persistence, identity, GitHub, email).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core depends only on these traits, never on concrete
//! implementations. Each trait is a narrow capability: the handful of
//! calls the workflows actually make.

mod directory;
mod github;
mod notify;
mod signature_repo;

pub use directory::{ClaGroupService, CompanyService, GithubOrgService, RepositoryService, UserService};
pub use github::{CommitState, CommitStatus, GitHubApi, GitHubError, GitHubRepository, Membership};
pub use notify::{EmailMessage, EventsService, Mailer};
pub use signature_repo::SignatureRepository;

#[cfg(test)]
pub use directory::{
    MockClaGroupService, MockCompanyService, MockGithubOrgService, MockRepositoryService,
    MockUserService,
};
#[cfg(test)]
pub use github::MockGitHubApi;
#[cfg(test)]
pub use notify::{MockEventsService, MockMailer};
#[cfg(test)]
pub use signature_repo::MockSignatureRepository;
