use std::fmt;

use serde::Serialize;

/// Statefile suffix of the advisory kill marker. It is never a job state.
pub const KILL_TOKEN: &str = "KILL";

/// Job lifecycle encoded in the statefile suffix
///
/// The variant order is the lifecycle order and is part of the protocol: when several statefiles
/// exist for one job, the highest state wins (`Undetermined < QueuedHeld < Queued < Running <
/// Done`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Undetermined,
    QueuedHeld,
    Queued,
    Running,
    Done,
}

impl JobState {
    /// All states in lifecycle order
    pub const ALL: [JobState; 5] = [
        JobState::Undetermined,
        JobState::QueuedHeld,
        JobState::Queued,
        JobState::Running,
        JobState::Done,
    ];

    /// statefile names use upper case tokens
    pub fn as_token(&self) -> &'static str {
        match self {
            JobState::Undetermined => "UNDETERMINED",
            JobState::QueuedHeld => "QUEUED_HELD",
            JobState::Queued => "QUEUED",
            JobState::Running => "RUNNING",
            JobState::Done => "DONE",
        }
    }

    pub fn from_token(token: &str) -> Option<JobState> {
        JobState::ALL
            .into_iter()
            .find(|state| state.as_token() == token)
    }

    /// Unknown tokens are not an error, the job just can't be placed in its lifecycle
    pub fn from_token_lossy(token: &str) -> JobState {
        JobState::from_token(token).unwrap_or(JobState::Undetermined)
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_is_totally_ordered() {
        assert!(JobState::Undetermined < JobState::QueuedHeld);
        assert!(JobState::QueuedHeld < JobState::Queued);
        assert!(JobState::Queued < JobState::Running);
        assert!(JobState::Running < JobState::Done);

        let mut sorted = JobState::ALL;
        sorted.sort();
        assert_eq!(sorted, JobState::ALL);
    }

    #[test]
    fn tokens_map_both_ways() {
        for state in JobState::ALL {
            assert_eq!(JobState::from_token(state.as_token()), Some(state));
            assert_eq!(state.to_string(), state.as_token());
        }
    }

    #[test]
    fn kill_and_unknown_tokens_are_not_states() {
        assert_eq!(JobState::from_token(KILL_TOKEN), None);
        assert_eq!(JobState::from_token("queued"), None);
        assert_eq!(JobState::from_token_lossy("FOO"), JobState::Undetermined);
    }

    #[test]
    fn serialises_as_token() {
        let json = serde_json::to_string(&JobState::QueuedHeld).unwrap();
        assert_eq!(json, "\"QUEUED_HELD\"");
    }
}
