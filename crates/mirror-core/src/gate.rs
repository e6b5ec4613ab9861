//! Delete safety gate
//!
//! Prevents an unreviewed mass-deletion from executing live. The gate is
//! evaluated against the dry-run pass's predicted deletion count, before
//! the live command is built, and returns a plain decision value rather
//! than raising an error: a refusal is policy, not a fault.

/// Tool option that enables deletion of destination-only files
pub const DELETE_OPTION: &str = "--delete";

/// Outcome of evaluating the delete safety gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDecision {
    /// Whether the destructive option may remain on the live command
    pub allowed: bool,
    /// Option list for the live command, with the destructive option
    /// stripped on refusal
    pub options: Vec<String>,
    /// Operator-facing warning on refusal, surfaced through the report's
    /// error channel
    pub warning: Option<String>,
}

/// Evaluate the gate for one job.
///
/// A `threshold` of 0 disables the gate entirely. Otherwise the gate
/// refuses when the dry run predicted more than `threshold` deletions and
/// the operator has not set `force`; refusal strips [`DELETE_OPTION`]
/// from the option list so the live command cannot delete.
pub fn evaluate(
    delete_count: usize,
    threshold: u32,
    force: bool,
    options: &[String],
) -> GateDecision {
    if threshold != 0 && delete_count > threshold as usize && !force {
        let options = options
            .iter()
            .filter(|option| option.as_str() != DELETE_OPTION)
            .cloned()
            .collect();

        return GateDecision {
            allowed: false,
            options,
            warning: Some(format!(
                "Skipping delete for {delete_count} files. \
                 More than {threshold} deletes requires a manual force."
            )),
        };
    }

    GateDecision {
        allowed: true,
        options: options.to_vec(),
        warning: None,
    }
}
