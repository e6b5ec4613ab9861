//! Single-job execution pipeline
//!
//! Drives one job through its run protocol:
//! bind artifacts, dry-run pass, delete gate, live pass, report.
//! The dry run predicts deletions for the gate; the live pass's
//! classification is what populates the final report, so the predicted
//! and actual delete counts can legitimately differ.

use tracing::{debug, warn};

use crate::alert::{AlertSink, NoAlert};
use crate::artifact;
use crate::classify::classify;
use crate::command::{build_command, build_command_with_options};
use crate::context::RunContext;
use crate::error::Result;
use crate::executor::{CommandExecutor, ShellExecutor};
use crate::gate;
use crate::job::JobDescriptor;
use crate::report::{RunReport, RunStamp};

/// Executes jobs one at a time and persists their artifacts
pub struct JobPipeline {
    executor: Box<dyn CommandExecutor>,
    alerts: Box<dyn AlertSink>,
}

impl Default for JobPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl JobPipeline {
    /// Pipeline backed by the real shell and no alert transport
    pub fn new() -> Self {
        Self {
            executor: Box::new(ShellExecutor),
            alerts: Box::new(NoAlert),
        }
    }

    /// Pipeline with explicit collaborators, used by tests and by
    /// deployments that wire in an alert transport
    pub fn with_collaborators(
        executor: Box<dyn CommandExecutor>,
        alerts: Box<dyn AlertSink>,
    ) -> Self {
        Self { executor, alerts }
    }

    /// Execute one job under the given context.
    ///
    /// Filesystem failures while binding artifacts are fatal to this job
    /// and surface as `Err`; everything the mirroring tool itself reports
    /// ends up as data inside the returned [`RunReport`].
    pub fn execute(&self, job: &JobDescriptor, ctx: &RunContext) -> Result<RunReport> {
        let started = RunStamp::now();
        self.prepare_artifacts(ctx)?;

        // Dry-run pass: predict what the live command would do
        let dry_run_command = build_command(job, true);
        debug!(job = %job.name, command = %dry_run_command, "running dry-run pass");
        let dry_run_lines = self.executor.run(&dry_run_command)?;
        artifact::write_text(ctx.dry_run_log(), &dry_run_lines.join("\n"))?;
        let predicted = classify(&dry_run_lines);

        // Gate on the predicted deletions before the live command exists
        let decision = gate::evaluate(
            predicted.delete_count(),
            job.delete_threshold,
            ctx.force(),
            &job.options,
        );
        if let Some(warning) = &decision.warning {
            warn!(job = %job.name, "{warning}");
            self.alerts.notify(&job.name, warning);
        }

        // Live pass honors the run-level dry-run flag; when set, this
        // second invocation is itself a dry run, but the gate above has
        // already adjusted the options.
        let command = build_command_with_options(job, &decision.options, ctx.dry_run());
        debug!(job = %job.name, command = %command, "running live pass");
        let lines = self.executor.run(&command)?;
        artifact::write_text(ctx.live_log(), &lines.join("\n"))?;

        let mut output = classify(&lines);
        if let Some(warning) = decision.warning {
            output.errors.push(warning);
        }

        let finished = RunStamp::now();
        let report = RunReport::aggregate(&job.name, &command, &started, &finished, output);
        artifact::write_json(ctx.report_path(), &report)?;

        debug!(
            job = %job.name,
            duration = report.duration,
            has_error = report.has_error,
            "job finished"
        );
        Ok(report)
    }

    /// Create the log directory and the three artifact files.
    ///
    /// Failure here prevents this job's execution; the batch loop decides
    /// whether to continue with other jobs.
    fn prepare_artifacts(&self, ctx: &RunContext) -> Result<()> {
        artifact::create_dir_recursive(ctx.log_directory())?;
        for path in [ctx.dry_run_log(), ctx.live_log(), ctx.report_path()] {
            artifact::write_text(path, "")?;
        }
        Ok(())
    }
}
