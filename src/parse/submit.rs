use log::debug;

use crate::config::SchedulerConfig;
use crate::error::{Result, SchedulerError};
use crate::job::id::JobId;
use crate::parse::unbound::check_statefile_var;
use crate::transport::CommandOutput;

/// Parse the output of the submit command into the new job's id
///
/// The submit command echoes the basename of the working directory it ran in.
pub fn parse_submit_output(config: &SchedulerConfig, output: &CommandOutput) -> Result<JobId> {
    check_statefile_var(config, output)?;

    if !output.success() {
        return Err(SchedulerError::QueuedStatefileFailed {
            stderr: output.stderr.clone(),
        });
    }

    let job_id = JobId::new(output.stdout.trim())?;
    debug!(target: config.log_target.as_str(), "Submitted job {job_id}");
    Ok(job_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(retval: i32, stdout: &str, stderr: &str) -> Result<JobId> {
        parse_submit_output(&SchedulerConfig::default(), &CommandOutput::new(retval, stdout, stderr))
    }

    #[test]
    fn job_id_is_trimmed() {
        assert_eq!(parse(0, "12345\n", "").unwrap().as_str(), "12345");
        assert_eq!(parse(0, "  job-7 \r\n", "").unwrap().as_str(), "job-7");
    }

    #[test]
    fn unbound_variable_is_a_configuration_error() {
        let err = parse(1, "", "line 3: AIIDA_STATEFILE_DIR: unbound variable").unwrap_err();
        assert!(matches!(err, SchedulerError::MissingStatefileDir { .. }));
        assert_eq!(
            err.to_string(),
            "This scheduler requires the AIIDA_STATEFILE_DIR environment variable set on the target computer"
        );
    }

    #[test]
    fn other_failures_carry_stderr() {
        let stderr = "bash: line 1: /scratch/statefiles/calc.QUEUED: Permission denied";
        let err = parse(1, "", stderr).unwrap_err();
        match err {
            SchedulerError::QueuedStatefileFailed { stderr: carried } => assert_eq!(carried, stderr),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unusable_job_id_is_rejected() {
        let err = parse(0, "calc.dir\n", "").unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidJobId { .. }));

        let err = parse(0, "\n", "").unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidJobId { .. }));
    }
}
