use std::collections::BTreeMap;

use log::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::error::{Result, SchedulerError};
use crate::job::id::JobId;
use crate::job::info::JobInfo;
use crate::job::state::JobState;
use crate::parse::line::{ErrorLine, StatefileName};
use crate::parse::unbound::check_statefile_var;
use crate::transport::CommandOutput;

/// Shell builtin used to enter the statefile directory
static CHANGE_DIR: &str = "cd";

/// Parse the output of the list command into one record per job, sorted by job id
///
/// The listing can race with submissions, kills and whatever moves jobs along, so a job may show
/// several statefiles at once. The most advanced state wins. A job only seen in stderr (every
/// probed statefile missing) is reported as `UNDETERMINED`.
pub fn parse_joblist_output(config: &SchedulerConfig, output: &CommandOutput) -> Result<Vec<JobInfo>> {
    check_statefile_var(config, output)?;

    let target = config.log_target.as_str();
    let mut jobs: BTreeMap<JobId, JobInfo> = BTreeMap::new();

    for line in output.stdout.lines().filter(|line| !line.trim().is_empty()) {
        let name = match StatefileName::parse(line) {
            Ok(name) => name,
            Err(err) => {
                warn!(target: target, "Skipping statefile listing line {line:?}: {err}");
                continue;
            }
        };

        if name.is_kill_marker() {
            info!(target: target, "Ignoring the KILL pseudo-state file for: {}", name.job_id);
            continue;
        }

        let state = JobState::from_token_lossy(&name.token);
        match jobs.get_mut(&name.job_id) {
            Some(job) => {
                let previous = job.state;
                if job.upgrade(state) {
                    debug!(target: target, "Upgrading {} from {previous} to {state}", job.job_id);
                }
            }
            None => {
                jobs.insert(name.job_id.clone(), JobInfo::new(name.job_id, state));
            }
        }
    }

    for line in output.stderr.lines().filter(|line| !line.trim().is_empty()) {
        let error = match ErrorLine::parse(line) {
            Ok(error) => error,
            Err(err) => {
                warn!(target: target, "Skipping statefile listing error {line:?}: {err}");
                continue;
            }
        };

        if error.command == CHANGE_DIR {
            return Err(SchedulerError::StatefileDirAccess {
                var: config.statefile_var.clone(),
                path: error.path,
                message: error.message,
            });
        }

        let name = match StatefileName::parse(&error.path) {
            Ok(name) => name,
            Err(err) => {
                warn!(target: target, "Skipping statefile listing error {line:?}: {err}");
                continue;
            }
        };

        // another statefile of this job exists, missing the rest is expected
        if jobs.contains_key(&name.job_id) {
            continue;
        }

        debug!(target: target, "No statefile found for {}", name.job_id);
        jobs.insert(
            name.job_id.clone(),
            JobInfo::new(name.job_id, JobState::Undetermined),
        );
    }

    Ok(jobs.into_values().collect())
}
