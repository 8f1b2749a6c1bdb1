use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "xpguard",
    version,
    about = "Checks whether work-item assignees meet experience requirements"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate every assignee of a work item
    Evaluate(EvaluateCommand),
    /// Compute the percentile rank for a set of activity counters
    Rank(RankCommand),
    /// Parse and resolve work-item labels against the policy
    Labels(LabelsCommand),
    /// Validate the policy configuration
    Lint(LintCommand),
}

#[derive(Args)]
pub struct EvaluateCommand {
    /// Directory holding xpguard.toml
    pub path: PathBuf,
    /// Work item JSON: number, assignees, labels
    #[arg(long)]
    pub work_item: PathBuf,
    /// Signal snapshot JSON keyed by login
    #[arg(long)]
    pub signals: PathBuf,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Post notices and unassign failing users
    #[arg(long)]
    pub apply: bool,
}

#[derive(Args)]
pub struct RankCommand {
    #[arg(long, default_value_t = 0)]
    pub commits: u64,
    #[arg(long, default_value_t = 0)]
    pub prs: u64,
    #[arg(long, default_value_t = 0)]
    pub issues: u64,
    #[arg(long, default_value_t = 0)]
    pub reviews: u64,
    #[arg(long, default_value_t = 0)]
    pub stars: u64,
    #[arg(long, default_value_t = 0)]
    pub followers: u64,
}

#[derive(Args)]
pub struct LabelsCommand {
    pub path: PathBuf,
    #[arg(required = true)]
    pub labels: Vec<String>,
}

#[derive(Args)]
pub struct LintCommand {
    pub path: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
