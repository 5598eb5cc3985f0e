//! The statefile scheduler: commands, parsers, and the transport round trips tying them together

use log::info;

use crate::command;
use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::job::id::{JobId, JobSelection};
use crate::job::info::JobInfo;
use crate::parse::joblist::parse_joblist_output;
use crate::parse::kill::parse_kill_output;
use crate::parse::submit::parse_submit_output;
use crate::transport::{CommandOutput, Transport};
use crate::WorkingDirectory;

/// Reports job state from marker files in a shared statefile directory
///
/// Nothing is kept between calls, every listing reads the directory again.
#[derive(Debug, Clone, Default)]
pub struct StatefileScheduler {
    config: SchedulerConfig,
}

impl StatefileScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn get_joblist_command(&self, jobs: &JobSelection) -> Result<String> {
        command::joblist_command(&self.config, jobs)
    }

    pub fn parse_joblist_output(&self, output: &CommandOutput) -> Result<Vec<JobInfo>> {
        parse_joblist_output(&self.config, output)
    }

    pub fn get_submit_command(&self, submit_script: &str) -> Result<String> {
        let submit_command = command::submit_command(&self.config, submit_script)?;
        info!(target: self.target(), "Submitting with: {submit_command}");
        Ok(submit_command)
    }

    pub fn parse_submit_output(&self, output: &CommandOutput) -> Result<JobId> {
        parse_submit_output(&self.config, output)
    }

    pub fn get_kill_command(&self, job_id: &JobId) -> Result<String> {
        let kill_command = command::kill_command(&self.config, job_id)?;
        info!(target: self.target(), "Killing job {job_id}");
        Ok(kill_command)
    }

    pub fn parse_kill_output(&self, host: &str, output: &CommandOutput) -> bool {
        parse_kill_output(&self.config, host, output)
    }

    /// List the selected jobs through `transport`
    pub fn get_jobs<T: Transport + ?Sized>(
        &self,
        transport: &T,
        jobs: &JobSelection,
    ) -> Result<Vec<JobInfo>> {
        let command = self.get_joblist_command(jobs)?;
        let output = transport.exec_command_wait(&command, None)?;
        self.parse_joblist_output(&output)
    }

    /// Queue `submit_script` (already shell escaped) from `working_directory`
    ///
    /// The returned job id is the basename of `working_directory`. A basename that can't be a job
    /// id is refused before anything runs; the submit command checks the remote one again.
    pub fn submit_from_script<T: Transport + ?Sized>(
        &self,
        transport: &T,
        working_directory: &WorkingDirectory,
        submit_script: &str,
    ) -> Result<JobId> {
        if let Some(name) = working_directory.path.file_name() {
            JobId::new(name.to_string_lossy())?;
        }
        let command = self.get_submit_command(submit_script)?;
        let output = transport.exec_command_wait(&command, Some(working_directory.path.as_path()))?;
        self.parse_submit_output(&output)
    }

    /// Ask for `job_id` to be killed by dropping its KILL marker
    pub fn kill<T: Transport + ?Sized>(&self, transport: &T, job_id: &JobId) -> Result<bool> {
        let command = self.get_kill_command(job_id)?;
        let output = transport.exec_command_wait(&command, None)?;
        Ok(self.parse_kill_output(&transport.label(), &output))
    }

    fn target(&self) -> &str {
        &self.config.log_target
    }
}
