use crate::storage::report_store::DEFAULT_OUTPUT_DIR;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gmp-audit")]
#[command(about = "Read-only audit of Google Tag Manager and Google Analytics 4 accounts")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./config.json, then ~/.config/gmp-audit/config.json)
    #[arg(long, env = "GMP_AUDIT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Save the report to a timestamped file in DIR instead of printing it
    #[arg(
        short,
        long,
        value_name = "DIR",
        num_args = 0..=1,
        default_missing_value = DEFAULT_OUTPUT_DIR
    )]
    pub output: Option<PathBuf>,

    /// Print API payload summaries and traversal details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress progress messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Number of container or property lookups in flight at once
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Use a pre-issued OAuth access token instead of the service account key
    #[arg(long, env = "GMP_AUDIT_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,
}
