use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::transport::CommandOutput;

/// What bash and POSIX shells print under `set -u` when a variable isn't set
static UNBOUND_MARKERS: [&str; 2] = ["unbound variable", "parameter not set"];

/// Matching shell messages is fragile, but it is the only signal a remote shell gives us until the
/// commands report a missing variable through a dedicated exit code.
pub fn reports_unbound_variable(stderr: &str) -> bool {
    UNBOUND_MARKERS.iter().any(|marker| stderr.contains(marker))
}

/// Fail if a command died because the statefile directory variable isn't set
pub fn check_statefile_var(
    config: &SchedulerConfig,
    output: &CommandOutput,
) -> Result<(), SchedulerError> {
    if !output.success() && reports_unbound_variable(&output.stderr) {
        return Err(SchedulerError::MissingStatefileDir {
            var: config.statefile_var.clone(),
        });
    }
    Ok(())
}
