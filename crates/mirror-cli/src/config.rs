//! Job definition loading
//!
//! Reads `*.toml` files from a config directory, each holding one or more
//! `[[jobs]]` tables, and turns them into [`JobDescriptor`] values. The
//! core never sees this format; it only receives finished descriptors.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use mirror_core::JobDescriptor;

use crate::error::{CliError, Result};

/// Options applied when a job omits its `options` list
pub const DEFAULT_OPTIONS: &[&str] = &[
    "--archive",
    "--compress",
    "--update",
    "--out-format='%o %n%L'",
];

/// One job definition file
#[derive(Debug, Deserialize)]
struct JobFile {
    #[serde(default)]
    jobs: Vec<JobEntry>,
}

/// A single `[[jobs]]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JobEntry {
    name: String,
    binary: String,
    source: String,
    destination: String,
    /// Full option list; when absent, [`DEFAULT_OPTIONS`] applies
    options: Option<Vec<String>>,
    /// Options appended after the defaults (or after `options`)
    #[serde(default)]
    extra_options: Vec<String>,
    #[serde(default)]
    delete_threshold: u32,
}

impl JobEntry {
    fn into_descriptor(self) -> JobDescriptor {
        let mut options: Vec<String> = match self.options {
            Some(options) => options,
            None => DEFAULT_OPTIONS.iter().map(|s| s.to_string()).collect(),
        };
        options.extend(self.extra_options);

        JobDescriptor::new(self.name, self.binary, self.source, self.destination, options)
            .with_delete_threshold(self.delete_threshold)
    }
}

/// Load every job defined under `config_dir`.
///
/// Files are read in sorted name order so batch order is stable across
/// runs. Duplicate job names are a configuration error: log-file paths
/// are derived from names and must not collide within a batch.
pub fn load_jobs(config_dir: &Path) -> Result<Vec<JobDescriptor>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(config_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    let mut jobs = Vec::new();
    let mut seen = HashSet::new();

    for path in paths {
        debug!(path = %path.display(), "loading job file");
        let content = std::fs::read_to_string(&path)?;
        let file: JobFile = toml::from_str(&content).map_err(|e| CliError::JobFileParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        for entry in file.jobs {
            if !seen.insert(entry.name.clone()) {
                return Err(CliError::user(format!(
                    "Duplicate job name {:?} in {}",
                    entry.name,
                    path.display()
                )));
            }
            jobs.push(entry.into_descriptor());
        }
    }

    Ok(jobs)
}
