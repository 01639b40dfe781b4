//! Command-line surface for `backoffice-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::fmt;
use std::path::PathBuf;

use backoffice::config::ConfigOverrides;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "backoffice-cli", version, about = "Back-office admin API CLI", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigOverrides,

    /// Path to file containing the API token (takes precedence over env)
    #[arg(long, env = "BACKOFFICE_API_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    /// API token from env (CLI flag intentionally disabled to avoid shell history leaks)
    #[arg(hide = true, env = "BACKOFFICE_API_TOKEN")]
    pub api_token_env: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Testimonial moderation (list/show/approve/reject/feature/delete)
    Testimonials(TestimonialsArgs),
    /// Subscription pack management
    Packs(PacksArgs),
    /// Registered users
    Users(MembersArgs),
    /// Back-office administrators
    Admins(MembersArgs),
    /// Management tabs the current account may open
    Tabs,
}

#[derive(Parser, Debug)]
pub struct TestimonialsArgs {
    #[command(subcommand)]
    pub action: TestimonialsCmd,
}

#[derive(Subcommand, Debug)]
pub enum TestimonialsCmd {
    /// List testimonials with optional filters
    List {
        #[arg(long)]
        status: Option<ModerationStatusArg>,
        #[arg(long)]
        featured: Option<bool>,
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one testimonial
    Show { id: String },
    /// Approve a pending testimonial
    Approve { id: String },
    /// Reject a testimonial
    Reject { id: String },
    /// Feature a testimonial on the public site
    Feature { id: String },
    /// Remove a testimonial from the featured set
    Unfeature { id: String },
    /// Delete a testimonial (asks for confirmation unless --yes)
    Delete {
        id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Parser, Debug)]
pub struct PacksArgs {
    #[command(subcommand)]
    pub action: PacksCmd,
}

#[derive(Subcommand, Debug)]
pub enum PacksCmd {
    /// List packs with optional filters
    List {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        active: Option<bool>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one pack as stored by the server
    Show { id: String },
    /// Load a pack into the edit form and print the normalized draft
    Draft { id: String },
    /// Edit a pack; unspecified fields keep their current value
    Update(PackUpdateArgs),
    /// Delete a pack (asks for confirmation unless --yes)
    Delete {
        id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Parser, Debug, Default)]
pub struct PackUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub description_file: Option<PathBuf>,
    #[arg(long)]
    pub price: Option<String>,
    #[arg(long)]
    pub duration_days: Option<String>,
    /// Replace the benefit list (repeatable)
    #[arg(long = "benefit")]
    pub benefits: Vec<String>,
    /// Append a benefit (repeatable)
    #[arg(long)]
    pub add_benefit: Vec<String>,
    /// Remove the benefit at a 1-based position (repeatable)
    #[arg(long)]
    pub remove_benefit: Vec<usize>,
    #[arg(long)]
    pub active: Option<bool>,
    #[arg(long)]
    pub popular: Option<bool>,
}

#[derive(Parser, Debug)]
pub struct MembersArgs {
    #[command(subcommand)]
    pub action: MembersCmd,
}

#[derive(Subcommand, Debug)]
pub enum MembersCmd {
    /// List accounts with optional filters
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one account
    Show { id: String },
    /// Delete an account (asks for confirmation unless --yes)
    Delete {
        id: String,
        #[arg(long, default_value_t = false)]
        yes: bool,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModerationStatusArg {
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatusArg {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ModerationStatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
