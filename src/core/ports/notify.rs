//! Audit event and email ports

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::super::models::LogEventArgs;

/// Audit trail sink
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventsService: Send + Sync {
    /// Record one audit event
    async fn log_event(&self, args: LogEventArgs) -> anyhow::Result<()>;
}

/// An outgoing HTML email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Recipient addresses
    pub recipients: Vec<String>,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub body: String,
}

/// Outgoing email transport
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()>;
}
