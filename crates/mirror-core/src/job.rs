//! Job descriptors
//!
//! A [`JobDescriptor`] is the immutable per-job configuration supplied by
//! the loader. Run-time flags (force, dry-run, log directory) never live
//! here; they belong to the per-execution [`crate::RunContext`].

use serde::{Deserialize, Serialize};

/// Immutable configuration for one mirror job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Unique job identifier, also used to derive log filenames
    pub name: String,
    /// Path to the mirroring binary (e.g. `/usr/bin/rsync`)
    pub binary: String,
    /// Source path passed to the mirroring tool
    pub source: String,
    /// Destination path passed to the mirroring tool
    pub destination: String,
    /// Ordered tool options; duplicates allowed, deduplicated at command
    /// build time preserving the first occurrence
    pub options: Vec<String>,
    /// Maximum predicted deletions tolerated before requiring a manual
    /// force; 0 disables the gate
    pub delete_threshold: u32,
}

impl JobDescriptor {
    /// Create a descriptor with the gate disabled (threshold 0)
    pub fn new(
        name: impl Into<String>,
        binary: impl Into<String>,
        source: impl Into<String>,
        destination: impl Into<String>,
        options: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            binary: binary.into(),
            source: source.into(),
            destination: destination.into(),
            options,
            delete_threshold: 0,
        }
    }

    /// Return a copy of this descriptor with a different delete threshold
    pub fn with_delete_threshold(mut self, threshold: u32) -> Self {
        self.delete_threshold = threshold;
        self
    }
}
