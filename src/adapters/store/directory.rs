//! Directory and audit ports over the JSON document

use async_trait::async_trait;
use uuid::Uuid;

use super::{JsonStore, now};
use crate::core::models::{
    ClaGroup, ClaRepository, Company, Event, GithubOrganization, LogEventArgs, User,
};
use crate::core::ports::{
    ClaGroupService, CompanyService, EventsService, GithubOrgService, RepositoryService,
    UserService,
};

#[async_trait]
impl UserService for JsonStore {
    async fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        self.read(|data| data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let email = email.trim();
        self.read(|data| {
            data.users
                .iter()
                .find(|u| u.all_emails().iter().any(|e| e.trim() == email))
                .cloned()
        })
    }

    async fn get_user_by_github_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        self.read(|data| {
            data.users
                .iter()
                .find(|u| u.github_login().is_some_and(|l| l.eq_ignore_ascii_case(username)))
                .cloned()
        })
    }

    async fn get_user_by_gitlab_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        self.read(|data| {
            data.users
                .iter()
                .find(|u| u.gitlab_username.as_deref() == Some(username))
                .cloned()
        })
    }

    async fn create_user(&self, user: &User) -> anyhow::Result<User> {
        let mut user = user.clone();
        if user.user_id.is_empty() {
            user.user_id = Uuid::new_v4().to_string();
        }
        if user.created.is_empty() {
            user.created = now();
            user.modified.clone_from(&user.created);
        }

        self.write(|data| {
            if data.users.iter().any(|u| u.user_id == user.user_id) {
                anyhow::bail!("user {} already exists", user.user_id);
            }
            data.users.push(user.clone());
            Ok(())
        })?;
        Ok(user)
    }
}

#[async_trait]
impl CompanyService for JsonStore {
    async fn get_company(&self, company_id: &str) -> anyhow::Result<Option<Company>> {
        self.read(|data| data.companies.iter().find(|c| c.company_id == company_id).cloned())
    }
}

#[async_trait]
impl ClaGroupService for JsonStore {
    async fn get_cla_group(&self, cla_group_id: &str) -> anyhow::Result<Option<ClaGroup>> {
        self.read(|data| data.cla_groups.iter().find(|g| g.project_id == cla_group_id).cloned())
    }
}

#[async_trait]
impl RepositoryService for JsonStore {
    async fn get_repository(&self, repository_id: &str) -> anyhow::Result<Option<ClaRepository>> {
        self.read(|data| {
            data.repositories
                .iter()
                .find(|r| r.repository_id == repository_id)
                .cloned()
        })
    }
}

#[async_trait]
impl GithubOrgService for JsonStore {
    async fn get_github_organization_by_name(
        &self,
        name: &str,
    ) -> anyhow::Result<Option<GithubOrganization>> {
        self.read(|data| {
            data.github_organizations
                .iter()
                .find(|o| o.organization_name.eq_ignore_ascii_case(name))
                .cloned()
        })
    }
}

#[async_trait]
impl EventsService for JsonStore {
    async fn log_event(&self, args: LogEventArgs) -> anyhow::Result<()> {
        let event = Event {
            event_id: Uuid::new_v4().to_string(),
            event_time: now(),
            args,
        };
        self.write(|data| {
            data.events.push(event);
            Ok(())
        })
    }
}
