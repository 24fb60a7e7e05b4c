//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `store/` - JSON document persistence for signatures and directories
//! - `github/` - GitHub REST client
//! - `mail/` - Outgoing email

pub mod github;
pub mod mail;
pub mod store;

pub use github::GitHubClient;
pub use mail::{LogMailer, MemoryOutbox, SpoolMailer};
pub use store::{JsonStore, StoreData};
