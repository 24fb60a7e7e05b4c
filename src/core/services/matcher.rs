//! Approval list matching - pure identity checks against allow-lists
//!
//! This module contains the string matching used to decide whether a
//! contributor's identity appears on a corporate approval list. No I/O.

use regex::Regex;

/// Translate an approval list domain pattern into an anchored email regex
///
/// Supported pattern forms:
/// - `example.com` - exactly that domain
/// - `*.example.com` - any domain ending in `example.com`
/// - `*example.com` - any domain ending in `example.com`
/// - `.example.com` - any domain ending in `example.com`
///
/// The resulting expression has the form `^.*@<pattern>$`.
///
/// # Errors
///
/// Returns an error if the translated expression does not compile.
pub fn domain_pattern_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let pattern = pattern.trim();
    let body = if let Some(rest) = pattern.strip_prefix("*.") {
        format!(".*{}", regex::escape(rest))
    } else if let Some(rest) = pattern.strip_prefix('*') {
        format!(".*{}", regex::escape(rest))
    } else if let Some(rest) = pattern.strip_prefix('.') {
        format!(".*{}", regex::escape(rest))
    } else {
        regex::escape(pattern)
    };

    Regex::new(&format!("^.*@{body}$"))
}

/// Check whether any email matches any domain pattern
///
/// Patterns are tried in order and the first match wins. Emails are
/// whitespace-trimmed; no case folding is applied.
///
/// # Errors
///
/// Returns an error if a pattern does not translate into a valid regex.
pub fn matches_domain_patterns(emails: &[&str], patterns: &[String]) -> Result<bool, regex::Error> {
    for pattern in patterns {
        if pattern.trim().is_empty() {
            continue;
        }
        let compiled = domain_pattern_regex(pattern)?;
        if emails.iter().any(|email| compiled.is_match(email.trim())) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Check whether a list contains a value exactly, after trimming the value
#[must_use]
pub fn contains_exact(list: &[String], value: &str) -> bool {
    let value = value.trim();
    list.iter().any(|item| item == value)
}

/// Check whether any of the emails is on the email approval list
#[must_use]
pub fn email_is_listed(emails: &[&str], list: &[String]) -> bool {
    emails.iter().any(|email| contains_exact(list, email))
}
