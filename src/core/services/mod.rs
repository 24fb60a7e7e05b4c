//! Business logic services
//!
//! - [`matcher`] - Approval list identity matching (pure)
//! - [`email`] - Notification templates (pure)
//! - [`signatures`] - The signature service and its workflows
//! - [`error`] - Service error type

pub mod email;
pub mod error;
pub mod matcher;
pub mod signatures;

pub use error::{Result, SignatureError};
pub use matcher::{contains_exact, domain_pattern_regex, matches_domain_patterns};
pub use signatures::{Collaborators, ServiceSettings, SignatureService};
