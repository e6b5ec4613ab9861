//! Sequential batch loop
//!
//! Runs the selected jobs one after another, prints operator notices, and
//! appends a redacted summary of every completed run to a dated JSON file
//! in the log directory. One job's failure never blocks the next.

use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};
use colored::Colorize;
use tracing::error;

use mirror_core::{JobDescriptor, JobPipeline, RunContext, build_command};

use crate::error::Result;

/// Run-level options applied to every job in the batch
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Only run the job with this name
    pub job_name: Option<String>,
    /// Bypass the delete threshold gate
    pub force: bool,
    /// Make every live pass a dry run
    pub dry_run: bool,
    /// Print commands instead of executing
    pub print_command: bool,
}

/// Execute the batch and return the summary path, if one was written
pub fn run_batch(
    jobs: &[JobDescriptor],
    log_dir: &Path,
    options: &BatchOptions,
) -> Result<Option<PathBuf>> {
    let pipeline = JobPipeline::new();
    let mut summary = serde_json::Map::new();

    for job in jobs {
        if let Some(filter) = &options.job_name
            && &job.name != filter
        {
            continue;
        }

        println!("{} Starting job: {}", "=>".blue().bold(), job.name.cyan());
        println!(
            "{} Delete threshold set to {}",
            "=>".blue().bold(),
            job.delete_threshold
        );

        if options.print_command {
            println!("{}", build_command(job, options.dry_run));
            continue;
        }

        let ctx = RunContext::bind(&job.name, log_dir, options.dry_run, options.force);
        match pipeline.execute(job, &ctx) {
            Ok(report) => {
                if report.has_error {
                    println!(
                        "{} Job {} finished with {} error(s) in {}s",
                        "WARN".yellow().bold(),
                        job.name.cyan(),
                        report.count_errors,
                        report.duration
                    );
                } else {
                    println!(
                        "{} Job {} finished in {}s",
                        "OK".green().bold(),
                        job.name.cyan(),
                        report.duration
                    );
                }
                summary.insert(job.name.clone(), report.redacted()?);
            }
            Err(e) => {
                // Fatal to this job only; the batch moves on
                error!(job = %job.name, "job aborted: {e}");
                eprintln!(
                    "{} Job {} aborted: {}",
                    "FAILED".red().bold(),
                    job.name.cyan(),
                    e
                );
            }
        }
    }

    if options.print_command {
        return Ok(None);
    }

    let summary_path = write_summary(log_dir, &summary)?;
    Ok(Some(summary_path))
}

/// Append the redacted batch summary to a dated file in `log_dir`
fn write_summary(
    log_dir: &Path,
    summary: &serde_json::Map<String, serde_json::Value>,
) -> Result<PathBuf> {
    let stamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    let path = log_dir.join(format!("{stamp}.summary.json"));

    let json = serde_json::to_string_pretty(summary)?;
    mirror_core::artifact::append_text(&path, &format!("{json}\n"))?;
    Ok(path)
}
