//! Test fixtures and builders
//!
//! Provides builders for signatures and directory records, a scripted
//! `GitHubApi` fake, and a service wired over an in-memory `JsonStore`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cla_signatures::adapters::{JsonStore, MemoryOutbox, StoreData};
use cla_signatures::core::models::{
    ApprovalList, ClaGroup, Company, GitHubUser, Signature, SignatureType, User, UserCommitSummary,
};
use cla_signatures::core::ports::{CommitStatus, GitHubApi, GitHubError, GitHubRepository, Membership};
use cla_signatures::core::services::{Collaborators, ServiceSettings, SignatureService};

pub const CLA_GROUP: &str = "g1";
pub const COMPANY: &str = "c1";

pub fn cla_group() -> ClaGroup {
    ClaGroup {
        project_id: CLA_GROUP.to_string(),
        project_name: "Widgets".to_string(),
        project_external_id: "sf-g1".to_string(),
    }
}

pub fn company() -> Company {
    Company {
        company_id: COMPANY.to_string(),
        company_name: "Acme".to_string(),
        company_external_id: "sf-c1".to_string(),
    }
}

pub fn manager() -> User {
    UserBuilder::new("m1").username("manager").email("manager@acme.com").build()
}

/// Builder for directory users
pub struct UserBuilder {
    user: User,
}

impl UserBuilder {
    pub fn new(user_id: &str) -> Self {
        Self {
            user: User {
                user_id: user_id.to_string(),
                ..User::default()
            },
        }
    }

    pub fn username(mut self, username: &str) -> Self {
        self.user.username = username.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.user.emails.push(email.to_string());
        self
    }

    pub fn github(mut self, login: &str) -> Self {
        self.user.github_username = Some(login.to_string());
        self
    }

    pub fn company(mut self, company_id: &str) -> Self {
        self.user.company_id = Some(company_id.to_string());
        self
    }

    pub fn build(self) -> User {
        self.user
    }
}

/// Builder for signatures; approved and signed unless told otherwise
pub struct SignatureBuilder {
    signature: Signature,
}

impl SignatureBuilder {
    fn new(id: &str, signature_type: SignatureType, reference_id: &str) -> Self {
        Self {
            signature: Signature {
                signature_id: id.to_string(),
                signature_type,
                project_id: CLA_GROUP.to_string(),
                reference_id: reference_id.to_string(),
                approved: true,
                signed: true,
                created: "2024-01-01T00:00:00+00:00".to_string(),
                modified: "2024-01-01T00:00:00+00:00".to_string(),
                ..Signature::default()
            },
        }
    }

    pub fn icla(id: &str, user: &User) -> Self {
        let mut builder = Self::new(id, SignatureType::Individual, &user.user_id);
        builder.signature.reference_name = user.username.clone();
        builder.signature.user_email = user.best_email().map(str::to_string);
        builder
    }

    pub fn ccla(id: &str, company: &Company) -> Self {
        let mut builder = Self::new(id, SignatureType::Corporate, &company.company_id);
        builder.signature.company_id = Some(company.company_id.clone());
        builder.signature.reference_name = company.company_name.clone();
        builder
    }

    pub fn ecla(id: &str, user: &User, company_id: &str) -> Self {
        let mut builder = Self::new(id, SignatureType::Employee, &user.user_id);
        builder.signature.company_id = Some(company_id.to_string());
        builder.signature.user_email = user.best_email().map(str::to_string);
        builder.signature.user_github_username = user.github_username.clone();
        builder
    }

    pub fn project(mut self, project_id: &str) -> Self {
        self.signature.project_id = project_id.to_string();
        self
    }

    pub fn manager(mut self, user: User) -> Self {
        self.signature.acl.push(user);
        self
    }

    pub fn approval_list(mut self, list: ApprovalList) -> Self {
        self.signature.approval_list = list;
        self
    }

    pub fn auto_create_ecla(mut self) -> Self {
        self.signature.auto_create_ecla = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.signature.approved = false;
        self
    }

    pub fn build(self) -> Signature {
        self.signature
    }
}

/// Store data with the standard CLA group, company and manager
pub fn base_data() -> StoreData {
    StoreData {
        cla_groups: vec![cla_group()],
        companies: vec![company()],
        users: vec![manager()],
        ..StoreData::default()
    }
}

/// Scripted GitHub: known users and memberships, records posted statuses
#[derive(Debug, Default)]
pub struct FakeGitHub {
    pub users: HashMap<String, GitHubUser>,
    pub members: Vec<(String, String)>,
    pub commits: Vec<UserCommitSummary>,
    pub statuses: Mutex<Vec<CommitStatus>>,
}

impl FakeGitHub {
    pub fn with_user(mut self, login: &str, id: i64, email: Option<&str>) -> Self {
        self.users.insert(
            login.to_string(),
            GitHubUser {
                id: Some(id),
                login: Some(login.to_string()),
                email: email.map(str::to_string),
            },
        );
        self
    }

    pub fn with_member(mut self, login: &str, org: &str) -> Self {
        self.members.push((login.to_string(), org.to_string()));
        self
    }

    pub fn with_commit(mut self, sha: &str, login: &str, id: i64) -> Self {
        self.commits.push(UserCommitSummary {
            sha: sha.to_string(),
            commit_author: Some(GitHubUser {
                id: Some(id),
                login: Some(login.to_string()),
                email: None,
            }),
            ..UserCommitSummary::default()
        });
        self
    }

    pub fn statuses(&self) -> Vec<CommitStatus> {
        self.statuses.lock().unwrap().clone()
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn user_organizations(&self, _access_token: &str) -> Result<Vec<String>, GitHubError> {
        Ok(Vec::new())
    }

    async fn membership(&self, username: &str, org: &str) -> Result<Option<Membership>, GitHubError> {
        let member = self.members.iter().any(|(u, o)| u == username && o == org);
        Ok(member.then(|| Membership {
            state: "active".to_string(),
            role: "member".to_string(),
        }))
    }

    async fn user_details(&self, username: &str) -> Result<Option<GitHubUser>, GitHubError> {
        Ok(self.users.get(username).cloned())
    }

    async fn repository(&self, _installation_id: i64, repository_id: i64) -> Result<GitHubRepository, GitHubError> {
        Ok(GitHubRepository {
            id: repository_id,
            name: "widgets".to_string(),
            owner: "acme".to_string(),
        })
    }

    async fn pull_request_commit_authors(
        &self,
        _installation_id: i64,
        _pull_request: i64,
        _owner: &str,
        _repo: &str,
    ) -> Result<Vec<UserCommitSummary>, GitHubError> {
        Ok(self.commits.clone())
    }

    async fn create_commit_status(
        &self,
        _installation_id: i64,
        _owner: &str,
        _repo: &str,
        _sha: &str,
        status: &CommitStatus,
    ) -> Result<(), GitHubError> {
        self.statuses.lock().unwrap().push(status.clone());
        Ok(())
    }
}

/// A service over an in-memory store, plus handles to inspect afterwards
pub struct Harness {
    pub service: SignatureService,
    pub store: Arc<JsonStore>,
    pub outbox: Arc<MemoryOutbox>,
    pub github: Arc<FakeGitHub>,
}

impl Harness {
    pub fn new(data: StoreData) -> Self {
        Self::with_github(data, FakeGitHub::default())
    }

    pub fn with_github(data: StoreData, github: FakeGitHub) -> Self {
        let store = Arc::new(JsonStore::with_data(data));
        let outbox = Arc::new(MemoryOutbox::new());
        let github = Arc::new(github);
        let ports = Collaborators {
            signatures: store.clone(),
            users: store.clone(),
            companies: store.clone(),
            cla_groups: store.clone(),
            events: store.clone(),
            repositories: store.clone(),
            github_orgs: store.clone(),
            github: github.clone(),
            mailer: outbox.clone(),
        };
        Self {
            service: SignatureService::new(ports, ServiceSettings::default()),
            store,
            outbox,
            github,
        }
    }

    pub fn data(&self) -> StoreData {
        self.store.snapshot().unwrap()
    }
}
