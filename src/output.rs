use std::fmt;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use statefile_sched::JobInfo;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One listing of the statefile directory
///
/// Statefiles keep changing underneath us, so a listing is only true at the time it was taken.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub jobs: Vec<JobInfo>,
}

impl Snapshot {
    pub fn now(jobs: Vec<JobInfo>) -> Self {
        Snapshot {
            taken_at: Utc::now(),
            jobs,
        }
    }

    pub fn render(&self, format: OutputFormat) -> serde_json::Result<String> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self),
            OutputFormat::Table => Ok(self
                .jobs
                .iter()
                .map(|job| format!("{}\t{}\n", job.job_id, job.state))
                .collect()),
        }
    }
}

/// Wrap in single quotes so the submit command passes the script name through untouched
pub fn escape_for_bash(value: &str) -> String {
    format!("'{}'", value.replace('\'', r#"'"'"'"#))
}

#[cfg(test)]
mod tests {
    use statefile_sched::{JobId, JobState};

    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot::now(vec![
            JobInfo::new(JobId::new("j1").unwrap(), JobState::Queued),
            JobInfo::new(JobId::new("j2").unwrap(), JobState::Done),
        ])
    }

    #[test]
    fn table_has_one_line_per_job() {
        let table = snapshot().render(OutputFormat::Table).unwrap();
        assert_eq!(table, "j1\tQUEUED\nj2\tDONE\n");
    }

    #[test]
    fn json_is_stamped() {
        let json = snapshot().render(OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["taken_at"].is_string());
        assert_eq!(value["jobs"][1], serde_json::json!({"job_id": "j2", "state": "DONE"}));
    }

    #[test]
    fn escape_single_quotes() {
        assert_eq!(escape_for_bash("_submit.sh"), "'_submit.sh'");
        assert_eq!(escape_for_bash("it's.sh"), r#"'it'"'"'s.sh'"#);
    }
}
