//! Output formatting for human and JSON modes
//!
//! Every command result can be rendered either as human-readable text or
//! as pretty-printed JSON. Status words are colored in human mode.

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{
    ApprovalList, CorporateContributor, IclaSignatureSummary, Page, Signature, SignatureCompanyId,
    SignatureReport,
};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn status_word(approved: bool, signed: bool) -> String {
    match (approved, signed) {
        (true, true) => "active".green().to_string(),
        (false, _) => "invalidated".red().to_string(),
        (true, false) => "unsigned".yellow().to_string(),
    }
}

/// One line of a human-readable listing
pub trait HumanRow {
    /// Format the item as a single line
    fn human_row(&self) -> String;
}

impl HumanRow for Signature {
    fn human_row(&self) -> String {
        format!(
            "{:<38} {:<5} {:<12} {}",
            self.signature_id,
            self.signature_type,
            status_word(self.approved, self.signed),
            self.reference_name
        )
    }
}

impl HumanRow for IclaSignatureSummary {
    fn human_row(&self) -> String {
        format!(
            "{:<38} {} <{}> signed {}",
            self.signature_id,
            self.user_name,
            self.user_email.as_deref().unwrap_or("-"),
            self.signed_on
        )
    }
}

impl HumanRow for CorporateContributor {
    fn human_row(&self) -> String {
        format!(
            "{:<38} {} <{}> github:{} since {}",
            self.signature_id,
            self.name,
            self.email.as_deref().unwrap_or("-"),
            self.github_username.as_deref().unwrap_or("-"),
            self.timestamp
        )
    }
}

impl HumanRow for SignatureCompanyId {
    fn human_row(&self) -> String {
        format!("{:<38} {}", self.company_id, self.signature_id)
    }
}

/// A listing, optionally paginated
#[derive(Debug, Serialize)]
pub struct ListResult<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Cursor for the next page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_key: Option<String>,
    /// Number of matching records
    pub total_count: usize,
}

impl<T> From<Page<T>> for ListResult<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            items: page.items,
            last_key: page.last_key,
            total_count: page.total_count,
        }
    }
}

impl<T> From<Vec<T>> for ListResult<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            total_count: items.len(),
            items,
            last_key: None,
        }
    }
}

impl<T: Serialize + HumanRow> ListResult<T> {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.items.is_empty() {
            println!("{}", "No results".dimmed());
            return;
        }
        for item in &self.items {
            println!("  {}", item.human_row());
        }
        println!("\n{} of {} shown", self.items.len(), self.total_count);
        if let Some(key) = &self.last_key {
            println!("Next page: --next-key {key}");
        }
    }
}

/// A single signature
#[derive(Debug, Serialize)]
pub struct SignatureResult {
    /// The signature
    #[serde(flatten)]
    pub signature: Signature,
}

impl SignatureResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let s = &self.signature;
        println!("Signature {} ({})", s.signature_id, s.signature_type);
        println!("  Status:     {}", status_word(s.approved, s.signed));
        println!("  CLA group:  {}", s.project_id);
        println!("  Reference:  {} ({})", s.reference_name, s.reference_id);
        if let Some(company) = &s.company_id {
            println!("  Company:    {company}");
        }
        if let Some(email) = &s.user_email {
            println!("  Email:      {email}");
        }
        if !s.acl.is_empty() {
            let managers: Vec<&str> = s.acl.iter().map(|u| u.username.as_str()).collect();
            println!("  Managers:   {}", managers.join(", "));
        }
        if !s.approval_list.is_empty() {
            render_approval_list(&s.approval_list);
        }
        if let Some(note) = &s.note {
            println!("  Note:       {note}");
        }
    }
}

fn render_approval_list(list: &ApprovalList) {
    println!("  Approval list:");
    let categories: [(&str, &[String]); 6] = [
        ("email", &list.email),
        ("domain", &list.domain),
        ("github user", &list.github_username),
        ("github org", &list.github_org),
        ("gitlab user", &list.gitlab_username),
        ("gitlab org", &list.gitlab_org),
    ];
    for (label, entries) in categories {
        if !entries.is_empty() {
            println!("    {label:<12} {}", entries.join(", "));
        }
    }
}

/// Whether a user is covered by a signature on a CLA group
#[derive(Debug, Serialize)]
pub struct CoverageResult {
    /// User that was checked
    pub user_id: String,
    /// CLA group
    pub project_id: String,
    /// Covered by an ICLA or an approved ECLA
    pub signed: bool,
}

impl CoverageResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                let verdict = if self.signed {
                    "SIGNED".green().bold()
                } else {
                    "NOT SIGNED".red().bold()
                };
                println!("{verdict}: user {} on CLA group {}", self.user_id, self.project_id);
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// GitHub organizations on a corporate approval list
#[derive(Debug, Serialize)]
pub struct OrganizationsResult {
    /// Corporate signature
    pub signature_id: String,
    /// Organization names
    pub organizations: Vec<String>,
}

impl OrganizationsResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                if self.organizations.is_empty() {
                    println!("{}", "No GitHub organizations".dimmed());
                    return;
                }
                for org in &self.organizations {
                    println!("  {org}");
                }
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Summary report for a CLA group
#[derive(Debug, Serialize)]
pub struct ReportResult {
    /// The report
    #[serde(flatten)]
    pub report: SignatureReport,
}

impl ReportResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let r = &self.report;
        println!("CLA group {}", r.project_id);
        println!("  Total:      {}", r.total_count);
        println!("  Individual: {}", r.individual_count);
        println!("  Corporate:  {}", r.corporate_count);
        println!("  Employee:   {}", r.employee_count);
        if !r.signatures.is_empty() {
            println!();
            for s in &r.signatures {
                println!(
                    "  {:<38} {:<5} {:<12} {}",
                    s.signature_id,
                    s.signature_type,
                    status_word(s.approved, s.signed),
                    s.reference_name
                );
            }
        }
        if let Some(key) = &r.last_key {
            println!("\nNext page: --next-key {key}");
        }
    }
}

/// Result of invalidating a CLA group's signatures
#[derive(Debug, Serialize)]
pub struct InvalidateResult {
    /// CLA group
    pub project_id: String,
    /// Signatures an invalidation was attempted for
    pub attempted: usize,
}

impl InvalidateResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!(
                "{} {} signature(s) on CLA group {}",
                "Invalidated".yellow(),
                self.attempted,
                self.project_id
            ),
            OutputMode::Json => print_json(self),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                let mark = if self.success { "✓".green() } else { "✗".red() };
                println!("{mark} {}", self.message);
            },
            OutputMode::Json => print_json(self),
        }
    }
}
