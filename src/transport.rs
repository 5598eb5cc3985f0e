//! Running generated commands on the execution host
//!
//! The protocol itself only produces command strings and parses their results. A transport is
//! whatever runs a shell command and hands back its exit code, stdout and stderr.

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Run commands in a local `bash`
pub mod local;

/// Complete result of one remote command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub retval: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(retval: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            retval,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.retval == 0
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "retval={}; stdout={}; stderr={}",
            self.retval, self.stdout, self.stderr
        )
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Executes a shell command string and waits for it to finish
pub trait Transport {
    /// Run `command`, optionally from `workdir`, and collect its whole output
    fn exec_command_wait(
        &self,
        command: &str,
        workdir: Option<&Path>,
    ) -> Result<CommandOutput, TransportError>;

    /// Short description of where commands run, used in log messages
    fn label(&self) -> String;
}
