//! Mirror Runner CLI
//!
//! Loads job definitions from a config directory and runs them as a
//! sequential batch, writing per-job logs and reports plus a redacted
//! batch summary to the log directory.

mod batch;
mod cli;
mod config;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use batch::BatchOptions;
use cli::Cli;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    // Both directories must exist before any job runs
    if !cli.config_dir.is_dir() {
        return Err(CliError::user(format!(
            "Configuration directory invalid: {}. Usage: --config-dir \"./conf.d\"",
            cli.config_dir.display()
        )));
    }
    if !cli.log_dir.is_dir() {
        return Err(CliError::user(format!(
            "Log directory invalid: {}. Usage: --log-dir \"./logs\"",
            cli.log_dir.display()
        )));
    }

    println!(
        "{} Config directory set to {}",
        "=>".blue().bold(),
        cli.config_dir.display().to_string().cyan()
    );
    println!(
        "{} Log directory set to {}",
        "=>".blue().bold(),
        cli.log_dir.display().to_string().cyan()
    );
    if cli.dry_run {
        println!("{} Dry-run mode enabled", "=>".blue().bold());
    }
    if let Some(name) = &cli.job_name {
        println!("{} Processing job {}", "=>".blue().bold(), name.cyan());
    }

    let jobs = config::load_jobs(&cli.config_dir)?;
    println!("{} {} job(s) available", "=>".blue().bold(), jobs.len());

    let options = BatchOptions {
        job_name: cli.job_name,
        force: cli.force,
        dry_run: cli.dry_run,
        print_command: cli.print_command,
    };
    if let Some(summary_path) = batch::run_batch(&jobs, &cli.log_dir, &options)? {
        println!(
            "{} Summary appended to {}",
            "=>".blue().bold(),
            summary_path.display().to_string().cyan()
        );
    }

    Ok(())
}
