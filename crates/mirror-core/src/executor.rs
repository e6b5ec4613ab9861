//! Process execution boundary
//!
//! The pipeline hands a fully-formed shell command string to a
//! [`CommandExecutor`] and gets back the combined stdout+stderr as lines.
//! The trait is the seam where tests substitute a scripted fake for the
//! real shell.

use std::process::Command;

use crate::error::{Error, Result};

/// Runs one command line and returns its combined output lines
pub trait CommandExecutor {
    /// Execute `command` to completion and return combined stdout+stderr,
    /// split on newlines with no content transformation.
    ///
    /// A non-zero exit is not an error at this boundary: the tool reports
    /// its failures as output lines and the classifier picks them up.
    /// Only a failure to launch the hosting shell is an [`Error`].
    fn run(&self, command: &str) -> Result<Vec<String>>;
}

/// Executes commands through `sh -c`, blocking until the tool exits.
///
/// Stderr is folded into stdout by the shell (`2>&1`) so line ordering
/// matches what an operator would see in a terminal. There is no timeout:
/// a hung tool hangs the batch.
#[derive(Debug, Default)]
pub struct ShellExecutor;

impl CommandExecutor for ShellExecutor {
    fn run(&self, command: &str) -> Result<Vec<String>> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(format!("{command} 2>&1"))
            .output()
            .map_err(|source| Error::CommandSpawn {
                command: command.to_string(),
                source,
            })?;

        let text = String::from_utf8_lossy(&output.stdout);
        Ok(text.lines().map(str::to_string).collect())
    }
}
