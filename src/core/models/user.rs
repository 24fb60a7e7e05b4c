//! Contributor and manager identities

use serde::{Deserialize, Serialize};

/// A contributor or CLA manager known to the platform
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Unique user ID
    pub user_id: String,
    /// Linux Foundation username (login for managers)
    pub username: String,
    /// Display name
    pub name: String,
    /// All known emails
    pub emails: Vec<String>,
    /// Primary LF account email
    pub lf_email: Option<String>,
    /// Numeric GitHub account ID
    pub github_id: Option<String>,
    /// GitHub login
    pub github_username: Option<String>,
    /// Numeric GitLab account ID
    pub gitlab_id: Option<String>,
    /// GitLab login
    pub gitlab_username: Option<String>,
    /// Company the user is affiliated with
    pub company_id: Option<String>,
    /// Free-form note (e.g. why the record was created)
    pub note: Option<String>,
    /// Creation timestamp (RFC3339)
    pub created: String,
    /// Last modification timestamp (RFC3339)
    pub modified: String,
}

impl User {
    /// Preferred contact email: the LF email, else the first known email
    #[must_use]
    pub fn best_email(&self) -> Option<&str> {
        self.lf_email
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .or_else(|| self.emails.iter().map(String::as_str).find(|e| !e.trim().is_empty()))
    }

    /// Every email of the user, LF email last, blanks removed
    #[must_use]
    pub fn all_emails(&self) -> Vec<&str> {
        self.emails
            .iter()
            .map(String::as_str)
            .chain(self.lf_email.as_deref())
            .filter(|e| !e.trim().is_empty())
            .collect()
    }

    /// GitHub login if set and non-empty
    #[must_use]
    pub fn github_login(&self) -> Option<&str> {
        self.github_username.as_deref().filter(|u| !u.trim().is_empty())
    }

    /// Company affiliation if set and non-empty
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.company_id.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// The authenticated caller of an operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Login username
    pub username: String,
    /// Login email
    pub email: String,
}

impl AuthUser {
    /// Create an authenticated user
    #[must_use]
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
        }
    }

    /// Whether this caller appears in the given manager list
    ///
    /// Matches on username, or on email against any of the manager's emails.
    #[must_use]
    pub fn is_in_acl(&self, acl: &[User]) -> bool {
        acl.iter().any(|manager| {
            (!self.username.is_empty() && manager.username == self.username)
                || (!self.email.is_empty() && manager.all_emails().contains(&self.email.as_str()))
        })
    }
}
