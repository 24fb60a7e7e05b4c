//! Mailer implementations
//!
//! - [`LogMailer`] - writes each message to the log
//! - [`SpoolMailer`] - appends messages to a JSON-lines spool file
//! - [`MemoryOutbox`] - keeps messages in memory for inspection

use std::fs::{self, OpenOptions};
use std::io::Write as _;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use log::info;

use crate::core::ports::{EmailMessage, Mailer};

/// Mailer that logs messages instead of delivering them
#[derive(Debug, Clone)]
pub struct LogMailer {
    sender: String,
}

impl LogMailer {
    /// Create a mailer sending as `sender`
    #[must_use]
    pub fn new(sender: impl Into<String>) -> Self {
        Self { sender: sender.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        if message.recipients.is_empty() {
            anyhow::bail!("email \"{}\" has no recipients", message.subject);
        }
        info!(
            "email from {} to {}: {}",
            self.sender,
            message.recipients.join(", "),
            message.subject
        );
        Ok(())
    }
}

/// Mailer that appends each message as one JSON line to a spool file
///
/// A relay picks messages up from the spool and delivers them.
#[derive(Debug)]
pub struct SpoolMailer {
    sender: String,
    path: PathBuf,
    lock: Mutex<()>,
}

impl SpoolMailer {
    /// Create a mailer spooling to `path`
    #[must_use]
    pub fn new(sender: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            sender: sender.into(),
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl Mailer for SpoolMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let line = serde_json::to_string(&serde_json::json!({
            "from": self.sender,
            "to": message.recipients,
            "subject": message.subject,
            "body": message.body,
        }))?;

        let _guard = self.lock.lock().map_err(|_| anyhow::anyhow!("spool lock poisoned"))?;
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        info!("spooled email to {}: {}", message.recipients.join(", "), message.subject);
        Ok(())
    }
}

/// Mailer that records every message
#[derive(Debug, Default)]
pub struct MemoryOutbox {
    sent: Mutex<Vec<EmailMessage>>,
}

impl MemoryOutbox {
    /// Empty outbox
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far
    #[must_use]
    pub fn messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Mailer for MemoryOutbox {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        self.sent
            .lock()
            .map_err(|_| anyhow::anyhow!("outbox lock poisoned"))?
            .push(message.clone());
        Ok(())
    }
}
