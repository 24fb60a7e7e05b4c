//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands;
use super::context::Context;
use cla_signatures::core::models::{ApprovalListDelta, SignatureType};
use cla_signatures::output::OutputMode;

/// cla-signatures - Contributor License Agreement signature service
#[derive(Parser, Debug)]
#[command(
    name = "cla-signatures",
    version,
    about = "Manage CLA signatures and corporate approval lists",
    long_about = "Query individual, corporate and employee CLA signatures, edit the\n\
                  approval lists of corporate agreements and check whether a\n\
                  contributor is covered on a CLA group."
)]
pub struct Cli {
    /// Config file (defaults to ~/.cla-signatures/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON store file (overrides the config and CLA_STORE)
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a signature
    Signature {
        /// Signature ID
        id: String,
    },

    /// List signatures
    Signatures {
        #[command(subcommand)]
        action: SignaturesAction,
    },

    /// Check whether a contributor is covered on a CLA group
    HasSigned {
        /// LF username of the contributor
        username: String,

        /// CLA group ID
        project_id: String,
    },

    /// Edit corporate approval lists
    ApprovalList {
        #[command(subcommand)]
        action: ApprovalListAction,
    },

    /// Manage GitHub organizations on a corporate approval list
    GithubOrgs {
        #[command(subcommand)]
        action: GithubOrgsAction,
    },

    /// Manage CLA managers of a signature
    Managers {
        #[command(subcommand)]
        action: ManagersAction,
    },

    /// Invalidate every signature of a CLA group
    Invalidate {
        /// CLA group ID
        project_id: String,

        /// Note recorded on each signature
        #[arg(short, long, default_value = "CLA group signatures invalidated")]
        note: String,
    },

    /// Show version
    Version,
}

/// Cursor options shared by paginated listings
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Cursor returned by the previous page
    #[arg(long)]
    pub next_key: Option<String>,

    /// Page size
    #[arg(long)]
    pub page_size: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum SignaturesAction {
    /// Signatures of a CLA group
    Project {
        /// CLA group ID
        project_id: String,

        /// Signature type: icla, ccla, ecla
        #[arg(short = 't', long = "type")]
        signature_type: Option<SignatureType>,

        /// Name, email or username filter
        #[arg(short, long)]
        search: Option<String>,

        /// Filter on approved
        #[arg(long)]
        approved: Option<bool>,

        /// Filter on signed
        #[arg(long)]
        signed: Option<bool>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Signatures of a company
    Company {
        /// Company ID
        company_id: String,

        /// Only the approved corporate signatures on this CLA group
        #[arg(long)]
        project: Option<String>,

        /// Newest first (with --project)
        #[arg(long)]
        desc: bool,

        /// Only signatures referencing this user
        #[arg(long)]
        user_id: Option<String>,

        /// Signature type: icla, ccla, ecla
        #[arg(short = 't', long = "type")]
        signature_type: Option<SignatureType>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Signatures of a user
    User {
        /// User ID
        user_id: String,

        /// Display name to match when the user ID is unknown
        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Employee acknowledgements of a company on a CLA group
    Employees {
        /// Company ID
        company_id: String,

        /// CLA group ID
        project_id: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Individual signatures of a CLA group
    Icla {
        /// CLA group ID
        cla_group_id: String,

        /// Name, email or username filter
        #[arg(short, long)]
        search: Option<String>,

        /// Filter on approved
        #[arg(long)]
        approved: Option<bool>,

        /// Filter on signed
        #[arg(long)]
        signed: Option<bool>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Corporate signatures of a CLA group
    Ccla {
        /// CLA group ID
        cla_group_id: String,

        /// Filter on approved
        #[arg(long)]
        approved: Option<bool>,

        /// Filter on signed
        #[arg(long)]
        signed: Option<bool>,
    },

    /// Employees contributing under corporate agreements of a CLA group
    Contributors {
        /// CLA group ID
        cla_group_id: String,

        /// Only this company
        #[arg(long)]
        company: Option<String>,

        /// Name, email or username filter
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Companies with a signed corporate agreement on a CLA group
    CompanyIds {
        /// CLA group ID
        cla_group_id: String,
    },

    /// Summary report for a CLA group
    Report {
        /// CLA group ID
        project_id: String,

        /// Signature type: icla, ccla, ecla
        #[arg(short = 't', long = "type")]
        signature_type: Option<SignatureType>,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum ApprovalListAction {
    /// Add and remove approval list entries
    Update {
        /// CLA group ID
        #[arg(long)]
        cla_group: String,

        /// Company ID
        #[arg(long)]
        company: String,

        /// LF username of the CLA manager making the change
        #[arg(long = "as", value_name = "USERNAME")]
        as_user: String,

        /// Email of the CLA manager making the change
        #[arg(long, default_value = "")]
        as_email: String,

        #[command(flatten)]
        delta: DeltaArgs,
    },
}

/// Approval list entries to add and remove; each flag may be repeated
#[derive(Args, Debug, Clone, Default)]
pub struct DeltaArgs {
    /// Email to add
    #[arg(long)]
    pub add_email: Vec<String>,
    /// Email to remove
    #[arg(long)]
    pub remove_email: Vec<String>,
    /// Domain pattern to add
    #[arg(long)]
    pub add_domain: Vec<String>,
    /// Domain pattern to remove
    #[arg(long)]
    pub remove_domain: Vec<String>,
    /// GitHub username to add
    #[arg(long)]
    pub add_github_username: Vec<String>,
    /// GitHub username to remove
    #[arg(long)]
    pub remove_github_username: Vec<String>,
    /// GitHub organization to add
    #[arg(long)]
    pub add_github_org: Vec<String>,
    /// GitHub organization to remove
    #[arg(long)]
    pub remove_github_org: Vec<String>,
    /// GitLab username to add
    #[arg(long)]
    pub add_gitlab_username: Vec<String>,
    /// GitLab username to remove
    #[arg(long)]
    pub remove_gitlab_username: Vec<String>,
    /// GitLab group to add
    #[arg(long)]
    pub add_gitlab_org: Vec<String>,
    /// GitLab group to remove
    #[arg(long)]
    pub remove_gitlab_org: Vec<String>,
}

impl From<DeltaArgs> for ApprovalListDelta {
    fn from(args: DeltaArgs) -> Self {
        Self {
            add_email: args.add_email,
            remove_email: args.remove_email,
            add_domain: args.add_domain,
            remove_domain: args.remove_domain,
            add_github_username: args.add_github_username,
            remove_github_username: args.remove_github_username,
            add_github_org: args.add_github_org,
            remove_github_org: args.remove_github_org,
            add_gitlab_username: args.add_gitlab_username,
            remove_gitlab_username: args.remove_gitlab_username,
            add_gitlab_org: args.add_gitlab_org,
            remove_gitlab_org: args.remove_gitlab_org,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum GithubOrgsAction {
    /// List organizations on the approval list
    List {
        /// Corporate signature ID
        signature_id: String,
    },

    /// Add an organization
    Add {
        /// Corporate signature ID
        signature_id: String,

        /// GitHub organization name
        org: String,
    },

    /// Remove an organization
    Remove {
        /// Corporate signature ID
        signature_id: String,

        /// GitHub organization name
        org: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ManagersAction {
    /// Add a CLA manager
    Add {
        /// Signature ID
        signature_id: String,

        /// LF username
        username: String,
    },

    /// Remove a CLA manager
    Remove {
        /// Signature ID
        signature_id: String,

        /// LF username
        username: String,
    },
}

/// Run the CLI
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("cla-signatures v{}", env!("CARGO_PKG_VERSION"));
            println!("\nRun 'cla-signatures --help' for usage");
        }
        return Ok(());
    };

    if let Command::Version = command {
        if output_mode == OutputMode::Json {
            println!("{}", serde_json::json!({ "version": env!("CARGO_PKG_VERSION") }));
        } else {
            println!("cla-signatures v{}", env!("CARGO_PKG_VERSION"));
        }
        return Ok(());
    }

    let ctx = Context::load(cli.config.as_deref(), cli.store, output_mode)?;

    match command {
        Command::Signature { id } => commands::signature(&ctx, &id).await,
        Command::Signatures { action } => commands::signatures(&ctx, action).await,
        Command::HasSigned {
            username,
            project_id,
        } => commands::has_signed(&ctx, username, project_id).await,
        Command::ApprovalList { action } => commands::approval_list(&ctx, action).await,
        Command::GithubOrgs { action } => commands::github_orgs(&ctx, action).await,
        Command::Managers { action } => commands::managers(&ctx, action).await,
        Command::Invalidate { project_id, note } => commands::invalidate(&ctx, project_id, note).await,
        Command::Version => Ok(()),
    }
}
