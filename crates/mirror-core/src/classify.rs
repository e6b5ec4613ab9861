//! Output classification
//!
//! Partitions the mirroring tool's combined output into five disjoint
//! buckets using ordered prefix rules. Classification is total: every
//! non-blank line lands in exactly one bucket, with `messages` catching
//! everything unmatched.

use serde::{Deserialize, Serialize};

/// Prefix of a planned or performed deletion line
const DELETE_PREFIX: &str = "del. ";
/// Prefix of a received-file line
const RECEIVE_PREFIX: &str = "recv ";
/// Prefix of a sent-file line
const SEND_PREFIX: &str = "send ";
/// Prefix of a tool-reported error line
const ERROR_PREFIX: &str = "rsync error";

/// Output lines of one tool invocation, partitioned by meaning
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifiedOutput {
    /// Lines describing deletions of destination-only files
    pub deletes: Vec<String>,
    /// Lines describing files sent to the destination
    pub sends: Vec<String>,
    /// Lines describing files received from the source
    pub receives: Vec<String>,
    /// Unmatched informational lines
    pub messages: Vec<String>,
    /// Tool-reported errors plus gate-refusal warnings
    pub errors: Vec<String>,
}

impl ClassifiedOutput {
    /// Number of classified deletion lines
    pub fn delete_count(&self) -> usize {
        self.deletes.len()
    }

    /// Whether the error bucket is non-empty
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Classify raw output lines into a [`ClassifiedOutput`].
///
/// Blank lines are dropped. The prefix rules are evaluated in a fixed
/// order (delete, receive, send, error, default) and each line lands in
/// the first bucket whose rule matches, preserving input order within
/// every bucket.
pub fn classify<I, S>(lines: I) -> ClassifiedOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output = ClassifiedOutput::default();

    for line in lines {
        let line = line.as_ref();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(DELETE_PREFIX) {
            output.deletes.push(line.to_string());
        } else if line.starts_with(RECEIVE_PREFIX) {
            output.receives.push(line.to_string());
        } else if line.starts_with(SEND_PREFIX) {
            output.sends.push(line.to_string());
        } else if line.starts_with(ERROR_PREFIX) {
            output.errors.push(line.to_string());
        } else {
            output.messages.push(line.to_string());
        }
    }

    output
}
