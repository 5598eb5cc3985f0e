use serde::Serialize;

use crate::job::id::JobId;
use crate::job::state::JobState;

/// The single resolved state of one job in one listing
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JobInfo {
    pub job_id: JobId,
    pub state: JobState,
}

impl JobInfo {
    pub fn new(job_id: JobId, state: JobState) -> Self {
        Self { job_id, state }
    }

    /// Move to `state` if it is further along the lifecycle, never back
    ///
    /// Returns true if the state changed.
    pub fn upgrade(&mut self, state: JobState) -> bool {
        if state > self.state {
            self.state = state;
            true
        } else {
            false
        }
    }
}
