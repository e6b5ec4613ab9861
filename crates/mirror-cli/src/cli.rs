//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::Parser;

/// Mirror Runner - run scheduled directory-synchronization jobs
#[derive(Parser, Debug)]
#[command(name = "mirror")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory containing job definition files (*.toml)
    #[arg(long, value_name = "DIR")]
    pub config_dir: PathBuf,

    /// Directory receiving logs, reports and the batch summary
    #[arg(long, value_name = "DIR")]
    pub log_dir: PathBuf,

    /// Run only the job with this name
    #[arg(long, value_name = "NAME")]
    pub job_name: Option<String>,

    /// Bypass the delete threshold gate
    #[arg(long)]
    pub force: bool,

    /// Run every job's live pass in dry-run mode
    #[arg(long)]
    pub dry_run: bool,

    /// Print each job's command instead of executing it
    #[arg(long)]
    pub print_command: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
