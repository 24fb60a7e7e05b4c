//! Identity and organization lookup ports
//!
//! Users, companies, CLA groups, enrolled repositories and GitHub
//! organizations are owned by other services; these traits are the
//! narrow slices of them the signature workflows need.

use async_trait::async_trait;

use super::super::models::{ClaGroup, ClaRepository, Company, GithubOrganization, User};

/// User directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Find a user by LF username
    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;

    /// Find a user by any of their emails
    async fn get_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    /// Find a user by GitHub login
    async fn get_user_by_github_username(&self, username: &str) -> anyhow::Result<Option<User>>;

    /// Find a user by GitLab login
    async fn get_user_by_gitlab_username(&self, username: &str) -> anyhow::Result<Option<User>>;

    /// Persist a new user, returning the stored record
    async fn create_user(&self, user: &User) -> anyhow::Result<User>;
}

/// Company directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompanyService: Send + Sync {
    /// Find a company by ID
    async fn get_company(&self, company_id: &str) -> anyhow::Result<Option<Company>>;
}

/// CLA group directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClaGroupService: Send + Sync {
    /// Find a CLA group by ID
    async fn get_cla_group(&self, cla_group_id: &str) -> anyhow::Result<Option<ClaGroup>>;
}

/// Repositories enrolled for CLA checks
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// Find an enrolled repository by its GitHub repository ID
    async fn get_repository(&self, repository_id: &str) -> anyhow::Result<Option<ClaRepository>>;
}

/// GitHub organizations with the CLA app installed
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GithubOrgService: Send + Sync {
    /// Find an organization by login
    async fn get_github_organization_by_name(
        &self,
        name: &str,
    ) -> anyhow::Result<Option<GithubOrganization>>;
}
