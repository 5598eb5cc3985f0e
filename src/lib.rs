//! File-based job scheduling protocol
//!
//! Jobs are queued, tracked and killed purely through marker files (statefiles) named
//! `<job_id>.<STATE>` in a shared directory on the execution host. This crate builds the shell
//! commands that read and write that directory and turns their output back into job states.

use std::path::PathBuf;

/// Render list, submit and kill shell commands
pub mod command;
/// Scheduler settings passed into every operation
pub mod config;
pub mod error;
pub mod job;
pub mod parse;
pub mod scheduler;
pub mod transport;

pub use config::SchedulerConfig;
pub use error::{Result, SchedulerError};
pub use job::id::{JobId, JobSelection};
pub use job::info::JobInfo;
pub use job::state::JobState;
pub use scheduler::StatefileScheduler;
pub use transport::{local::LocalShell, CommandOutput, Transport};

/// Directory a job is submitted from, its basename becomes the job id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory {
    pub path: PathBuf,
}
