//! Service wiring for CLI commands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use cla_signatures::adapters::{GitHubClient, JsonStore, LogMailer, SpoolMailer};
use cla_signatures::config::ServiceConfig;
use cla_signatures::core::ports::Mailer;
use cla_signatures::core::services::{Collaborators, SignatureService};
use cla_signatures::output::OutputMode;

/// Everything a command needs
#[derive(Debug)]
pub struct Context {
    pub service: SignatureService,
    pub config: ServiceConfig,
    pub mode: OutputMode,
}

impl Context {
    /// Load config, open the store and build the service
    pub fn load(config_path: Option<&Path>, store: Option<PathBuf>, mode: OutputMode) -> anyhow::Result<Self> {
        let mut config = ServiceConfig::load(config_path)?;
        if let Some(store) = store {
            config.store.path = Some(store);
        }
        let service = build_service(&config)?;
        Ok(Self { service, config, mode })
    }

    /// GitHub token of the caller, if configured
    pub fn token(&self) -> Option<&str> {
        self.config.github.token.as_deref()
    }
}

fn build_service(config: &ServiceConfig) -> anyhow::Result<SignatureService> {
    let store_path = config.store_path();
    debug!("opening store {}", store_path.display());
    let store = Arc::new(JsonStore::open(store_path)?);

    let github = GitHubClient::new(config.github.api_url.clone(), config.github.token.clone())?;
    let mailer: Arc<dyn Mailer> = match &config.email.spool {
        Some(path) => Arc::new(SpoolMailer::new(config.email.sender.clone(), path.clone())),
        None => Arc::new(LogMailer::new(config.email.sender.clone())),
    };

    let ports = Collaborators {
        signatures: store.clone(),
        users: store.clone(),
        companies: store.clone(),
        cla_groups: store.clone(),
        events: store.clone(),
        repositories: store.clone(),
        github_orgs: store,
        github: Arc::new(github),
        mailer,
    };
    Ok(SignatureService::new(ports, config.settings()))
}
