//! Per-execution run context
//!
//! A [`RunContext`] layers the run-time flags (dry-run, force) and the
//! resolved artifact paths on top of an immutable
//! [`crate::JobDescriptor`]. It is bound once per execution and owned by
//! that execution alone; nothing in it is shared across jobs.

use std::path::{Path, PathBuf};

use chrono::{Local, SecondsFormat};

/// Run-time flags and artifact paths for one job execution
#[derive(Debug, Clone)]
pub struct RunContext {
    dry_run: bool,
    force: bool,
    log_directory: PathBuf,
    dry_run_log: PathBuf,
    live_log: PathBuf,
    report_path: PathBuf,
}

impl RunContext {
    /// Bind a context for `job_name` under `log_directory`, taking the
    /// binding timestamp now.
    ///
    /// Artifact paths are deterministic given (log directory, job name,
    /// timestamp), so distinct job names never collide within a batch.
    pub fn bind(job_name: &str, log_directory: &Path, dry_run: bool, force: bool) -> Self {
        let stamp = Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
        Self::bind_at(job_name, log_directory, &stamp, dry_run, force)
    }

    /// Bind a context with an explicit timestamp string.
    ///
    /// Split out from [`RunContext::bind`] so path derivation stays a
    /// deterministic function of its inputs.
    pub fn bind_at(
        job_name: &str,
        log_directory: &Path,
        stamp: &str,
        dry_run: bool,
        force: bool,
    ) -> Self {
        let log_name = sanitize_job_name(job_name);
        let dry_run_log = log_directory.join(format!("{stamp}-{log_name}.rsync.dry_run.log"));
        let live_log = log_directory.join(format!("{stamp}-{log_name}.rsync.log"));
        let report_path = log_directory.join(format!("{stamp}-{log_name}.json"));

        Self {
            dry_run,
            force,
            log_directory: log_directory.to_path_buf(),
            dry_run_log,
            live_log,
            report_path,
        }
    }

    /// Whether the live pass should itself run in dry-run mode
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    /// Whether the operator override for the delete gate is set
    pub fn force(&self) -> bool {
        self.force
    }

    /// Directory holding all artifacts for this run
    pub fn log_directory(&self) -> &Path {
        &self.log_directory
    }

    /// Path of the verbatim dry-run output log
    pub fn dry_run_log(&self) -> &Path {
        &self.dry_run_log
    }

    /// Path of the verbatim live output log
    pub fn live_log(&self) -> &Path {
        &self.live_log
    }

    /// Path of the JSON run report
    pub fn report_path(&self) -> &Path {
        &self.report_path
    }
}

/// Replace every non-word character in a job name with `_` so it is safe
/// inside a filename.
fn sanitize_job_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
