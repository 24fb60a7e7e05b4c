//! Notification templates for approval list changes
//!
//! Builds the HTML emails sent to CLA managers and contributors. Pure
//! string assembly; sending is done by the `Mailer` port.

use std::fmt::Write as _;

use crate::core::models::{ApprovalListDelta, ClaGroup, Company};
use crate::core::ports::EmailMessage;

/// Render the approval list changes as an HTML list
///
/// One `<li>` per changed entry, categories in a fixed order.
#[must_use]
pub fn build_approval_list_summary(delta: &ApprovalListDelta) -> String {
    let mut summary = String::from("<ul>");
    for (change, values) in delta.changes() {
        for value in values {
            let _ = write!(summary, "<li>{} {}</li>", change.label(), escape_html(value));
        }
    }
    summary.push_str("</ul>");
    summary
}

/// Escape text placed inside an HTML body
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Email telling a CLA manager the approval list was changed
#[must_use]
pub fn manager_update_email(
    company: &Company,
    cla_group: &ClaGroup,
    manager_name: &str,
    manager_email: &str,
    delta: &ApprovalListDelta,
) -> EmailMessage {
    let subject = format!(
        "CLA: Approval List Update for {} on {}",
        company.company_name, cla_group.project_name
    );
    let body = format!(
        "<p>Hello {manager_name},</p>\
         <p>This is a notification email from the CLA service regarding the project {project}.</p>\
         <p>The CLA approval list for {company} was modified as follows:</p>\
         {summary}\
         <p>The contributors that were added are now able to contribute under the corporate agreement.</p>",
        manager_name = escape_html(manager_name),
        project = escape_html(&cla_group.project_name),
        company = escape_html(&company.company_name),
        summary = build_approval_list_summary(delta),
    );

    EmailMessage {
        recipients: vec![manager_email.to_string()],
        subject,
        body,
    }
}

/// Email telling a contributor they were added to an approval list
#[must_use]
pub fn contributor_added_email(
    company: &Company,
    cla_group: &ClaGroup,
    contributor_name: &str,
    contributor_email: &str,
) -> EmailMessage {
    let subject = format!(
        "CLA: Approval List Update for {} on {}",
        company.company_name, cla_group.project_name
    );
    let body = format!(
        "<p>Hello {contributor_name},</p>\
         <p>You have been added to the CLA approval list of {company} for the project {project}.</p>\
         <p>You may need to re-run the CLA check on your open pull requests; \
         if the company enabled automatic acknowledgements, no further action is needed.</p>",
        contributor_name = escape_html(contributor_name),
        company = escape_html(&company.company_name),
        project = escape_html(&cla_group.project_name),
    );

    EmailMessage {
        recipients: vec![contributor_email.to_string()],
        subject,
        body,
    }
}

/// Email telling a contributor they were removed from an approval list
#[must_use]
pub fn contributor_removed_email(
    company: &Company,
    cla_group: &ClaGroup,
    contributor_name: &str,
    contributor_email: &str,
) -> EmailMessage {
    let subject = format!(
        "CLA: Approval List Update for {} on {}",
        company.company_name, cla_group.project_name
    );
    let body = format!(
        "<p>Hello {contributor_name},</p>\
         <p>You have been removed from the CLA approval list of {company} for the project {project}.</p>\
         <p>Contributions made under the corporate agreement of {company} are no longer covered. \
         Contact your CLA manager if you believe this is a mistake.</p>",
        contributor_name = escape_html(contributor_name),
        company = escape_html(&company.company_name),
        project = escape_html(&cla_group.project_name),
    );

    EmailMessage {
        recipients: vec![contributor_email.to_string()],
        subject,
        body,
    }
}
