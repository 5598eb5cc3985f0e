use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::transport::{CommandOutput, Transport, TransportError};

/// Log target for process lines unless configured otherwise
pub const DEFAULT_LOG_TARGET: &str = "statefile_sched::transport";

/// Runs commands with `bash -c` on this machine
///
/// The generated commands rely on `set -eu` and `echo -e`, so they are run by bash rather than
/// whatever `/bin/sh` happens to be. Log lines go to its own target, hand it the scheduler's
/// `log_target` to keep a host's messages together.
#[derive(Debug, Clone)]
pub struct LocalShell {
    program: OsString,
    envs: Vec<(OsString, OsString)>,
    removed_envs: Vec<OsString>,
    log_target: String,
}

impl Default for LocalShell {
    fn default() -> Self {
        Self {
            program: OsString::from("bash"),
            envs: Vec::new(),
            removed_envs: Vec::new(),
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }
}

impl LocalShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an environment variable for every command, e.g. the statefile directory
    pub fn with_env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        let key = key.into();
        self.removed_envs.retain(|k| *k != key);
        self.envs.push((key, value.into()));
        self
    }

    pub fn with_log_target(mut self, log_target: impl Into<String>) -> Self {
        self.log_target = log_target.into();
        self
    }

    /// Don't pass `key` on from this process's environment
    pub fn without_env(mut self, key: impl Into<OsString>) -> Self {
        let key = key.into();
        self.envs.retain(|(k, _)| *k != key);
        self.removed_envs.push(key);
        self
    }
}

impl Transport for LocalShell {
    fn exec_command_wait(
        &self,
        command: &str,
        workdir: Option<&Path>,
    ) -> Result<CommandOutput, TransportError> {
        let mut shell = Command::new(&self.program);
        shell.arg("-c").arg(command);
        for key in &self.removed_envs {
            shell.env_remove(key);
        }
        for (key, value) in &self.envs {
            shell.env(key, value);
        }
        if let Some(dir) = workdir {
            shell.current_dir(dir);
        }

        let target = self.log_target.as_str();
        info!(target: target, "Running {} process", self.label());
        debug!(target: target, "{:?}", &shell);
        let output = shell.output().map_err(|source| TransportError::Spawn {
            program: self.program.to_string_lossy().into_owned(),
            source,
        })?;

        // no exit code when killed by a signal
        let retval = output.status.code().unwrap_or(-1);

        Ok(CommandOutput {
            retval,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn label(&self) -> String {
        format!("local {}", self.program.to_string_lossy())
    }
}
