//! Core execution pipeline for mirror jobs
//!
//! This crate owns the decision logic of the runner:
//!
//! - **Command builder**: turns a descriptor plus dry-run flag into a shell command string
//! - **Output classifier**: partitions raw tool output into five semantic buckets
//! - **Delete safety gate**: dry-run deletion count vs. threshold
//! - **Execution pipeline**: dry-run, gate, live pass, report, per job
//! - **Run report**: structured, JSON-serializable result of one run
//!
//! Everything around it (CLI parsing, job-file loading, batch looping)
//! is thin glue living in `mirror-cli`. The process and filesystem
//! boundaries are explicit seams ([`CommandExecutor`], [`artifact`]) so
//! the pipeline is testable without a real mirroring tool.
//!
//! ```text
//!          mirror-cli (loader, batch loop, summary)
//!                          |
//!                    mirror-core
//!       command -> executor -> classify -> gate -> report
//! ```

pub mod alert;
pub mod artifact;
pub mod classify;
pub mod command;
pub mod context;
pub mod error;
pub mod executor;
pub mod gate;
pub mod job;
pub mod pipeline;
pub mod report;

pub use alert::{AlertSink, NoAlert};
pub use classify::{ClassifiedOutput, classify};
pub use command::{DRY_RUN_OPTION, build_command, build_command_with_options};
pub use context::RunContext;
pub use error::{Error, Result};
pub use executor::{CommandExecutor, ShellExecutor};
pub use gate::{DELETE_OPTION, GateDecision, evaluate};
pub use job::JobDescriptor;
pub use pipeline::JobPipeline;
pub use report::{RunReport, RunStamp};
