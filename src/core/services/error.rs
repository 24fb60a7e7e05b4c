//! Errors returned by the signature service

use thiserror::Error;

use crate::core::ports::GitHubError;

/// Signature service error
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Missing or invalid input, or a lookup that could not be performed
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The caller is not allowed to perform the operation
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A required record does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// The repository linked to a pull request has CLA checks disabled
    #[error("repository {0} is not enabled")]
    RepositoryDisabled(String),

    /// A stored identifier could not be parsed
    #[error("invalid {field}: {value}")]
    InvalidIdentifier {
        /// Name of the identifier
        field: &'static str,
        /// Offending value
        value: String,
    },

    /// An approval list domain pattern could not be compiled
    #[error("invalid domain pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A GitHub call failed
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    /// A collaborator (repository, directory, mailer) failed
    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

/// Result alias for service operations
pub type Result<T> = std::result::Result<T, SignatureError>;
