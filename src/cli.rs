use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "reporank",
    version,
    about = "Rank an organization's repositories by weighted metadata and README criteria"
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
    /// Score and rank every eligible repository in an organization
    Rank(RankCommand),
    /// Print the tool input schema sent to the model
    Schema(SchemaCommand),
    /// Load and validate the configuration
    Check(CheckCommand),
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
    Md,
}

#[derive(Args)]
pub struct RankCommand {
    /// Organization to inventory
    pub org: String,
    #[arg(short, long, default_value = "reporank.toml")]
    pub config: PathBuf,
    /// GitHub access token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Overrides output.format from the config
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    /// Overrides output.path from the config
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Overrides search.max_concurrency from the config
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Args)]
pub struct SchemaCommand {
    #[arg(short, long, default_value = "reporank.toml")]
    pub config: PathBuf,
}

#[derive(Args)]
pub struct CheckCommand {
    #[arg(short, long, default_value = "reporank.toml")]
    pub config: PathBuf,
}
