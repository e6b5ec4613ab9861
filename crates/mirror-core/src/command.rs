//! Command construction for the mirroring tool
//!
//! Pure string assembly: no path validation, no filesystem access. The
//! loader is responsible for validating paths before a descriptor exists.

use crate::job::JobDescriptor;

/// Flag that switches the mirroring tool into preview mode
pub const DRY_RUN_OPTION: &str = "--dry-run";

/// Prefix used to run the mirroring tool with elevated privileges
const PRIVILEGE_ESCALATION: &str = "sudo";

/// Build the shell command for one invocation of the mirroring tool.
///
/// Options are deduplicated preserving the first occurrence, then the
/// dry-run flag is appended when requested (the dedup pass guarantees it
/// appears exactly once even if already present). Shape:
/// `sudo <binary> <options...> <source> <destination>`.
pub fn build_command(job: &JobDescriptor, dry_run: bool) -> String {
    build_command_with_options(job, &job.options, dry_run)
}

/// Build the command from an explicit option list.
///
/// Used after the delete gate has adjusted the options for the live pass.
pub fn build_command_with_options(job: &JobDescriptor, options: &[String], dry_run: bool) -> String {
    let mut options: Vec<&str> = options.iter().map(String::as_str).collect();
    if dry_run {
        options.push(DRY_RUN_OPTION);
    }

    format!(
        "{} {} {} {} {}",
        PRIVILEGE_ESCALATION,
        job.binary,
        dedupe(&options).join(" "),
        job.source,
        job.destination
    )
}

/// Drop repeated options, keeping each at its first occurrence
fn dedupe<'a>(options: &[&'a str]) -> Vec<&'a str> {
    let mut seen = Vec::with_capacity(options.len());
    for option in options {
        if !seen.contains(option) {
            seen.push(option);
        }
    }
    seen
}
