use std::fmt;

use serde::Serialize;

use crate::error::{Result, SchedulerError};

/// Opaque job identifier, used verbatim as the statefile name prefix
///
/// A job id is the basename of the job's working directory on the remote host. Only ASCII
/// alphanumerics, `-` and `_` are accepted: the id is joined to the state token with a `.` and
/// pasted unquoted into shell commands, so anything else can't be parsed back reliably.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        match validate(&id) {
            Ok(()) => Ok(JobId(id)),
            Err(reason) => Err(SchedulerError::InvalidJobId { id, reason }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn validate(id: &str) -> std::result::Result<(), &'static str> {
    if id.is_empty() {
        return Err("job id is empty");
    }
    // ls would read a leading dash as an option
    if id.starts_with('-') {
        return Err("job id starts with '-'");
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err("job id may only contain ASCII letters, digits, '-' and '_'");
    }
    Ok(())
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for JobId {
    type Error = SchedulerError;

    fn try_from(id: &str) -> Result<Self> {
        JobId::new(id)
    }
}

impl TryFrom<String> for JobId {
    type Error = SchedulerError;

    fn try_from(id: String) -> Result<Self> {
        JobId::new(id)
    }
}

/// Which jobs a listing should report
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum JobSelection {
    /// Every statefile in the directory
    #[default]
    All,
    /// Probe each of these jobs for every known state
    Jobs(Vec<JobId>),
}

impl JobSelection {
    pub fn single(job_id: JobId) -> Self {
        JobSelection::Jobs(vec![job_id])
    }

    /// Validate every id up front, failing on the first bad one
    pub fn from_ids<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let jobs = ids
            .into_iter()
            .map(JobId::new)
            .collect::<Result<Vec<JobId>>>()?;
        Ok(JobSelection::Jobs(jobs))
    }

    /// Job ids to probe for, `None` means list the whole directory
    pub fn job_ids(&self) -> Option<&[JobId]> {
        match self {
            JobSelection::Jobs(jobs) if !jobs.is_empty() => Some(jobs),
            _ => None,
        }
    }
}

impl From<JobId> for JobSelection {
    fn from(job_id: JobId) -> Self {
        JobSelection::single(job_id)
    }
}

impl From<Vec<JobId>> for JobSelection {
    fn from(jobs: Vec<JobId>) -> Self {
        JobSelection::Jobs(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_working_directory_basenames() {
        for id in ["12345", "job-42", "a1b2_c3", "d2f1c7e4-9b1a-4c0e-8f7d-2a6b5c4d3e2f"] {
            assert_eq!(JobId::new(id).unwrap().as_str(), id);
        }
    }

    #[test]
    fn rejects_state_separator() {
        let err = JobId::new("calc.1").unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidJobId { ref id, .. } if id == "calc.1"));
    }

    #[test]
    fn rejects_empty_leading_dash_and_shell_characters() {
        for id in ["", "-l", "a b", "a;rm", "a/b", "$(x)", "jöb"] {
            assert!(JobId::new(id).is_err(), "{id:?} should be rejected");
        }
    }

    #[test]
    fn selection_from_ids_fails_fast() {
        let err = JobSelection::from_ids(["j1", "bad.id", "j3"]).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidJobId { ref id, .. } if id == "bad.id"));
    }

    #[test]
    fn empty_selection_lists_everything() {
        assert_eq!(JobSelection::All.job_ids(), None);
        assert_eq!(JobSelection::Jobs(Vec::new()).job_ids(), None);

        let single = JobSelection::single(JobId::new("j1").unwrap());
        assert_eq!(single.job_ids().map(|ids| ids.len()), Some(1));
    }
}
