use log::{error, warn};

use crate::config::SchedulerConfig;
use crate::transport::CommandOutput;

/// What the kill command's output says about the KILL marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillOutcome {
    /// Marker written, nothing printed
    Killed,
    /// Exit code 0 but the shell printed something, the marker was most likely still written
    KilledWithOutput { stdout: String, stderr: String },
    /// Non-zero exit code
    Failed(CommandOutput),
}

impl KillOutcome {
    pub fn classify(output: &CommandOutput) -> Self {
        if !output.success() {
            return KillOutcome::Failed(output.clone());
        }

        if output.stdout.trim().is_empty() && output.stderr.trim().is_empty() {
            KillOutcome::Killed
        } else {
            KillOutcome::KilledWithOutput {
                stdout: output.stdout.clone(),
                stderr: output.stderr.clone(),
            }
        }
    }

    pub fn is_success(&self) -> bool {
        !matches!(self, KillOutcome::Failed(_))
    }
}

/// Parse the output of the kill command, true if the marker seems to be in place
///
/// `host` names where the command ran and only shows up in log messages.
pub fn parse_kill_output(config: &SchedulerConfig, host: &str, output: &CommandOutput) -> bool {
    let target = config.log_target.as_str();
    let outcome = KillOutcome::classify(output);

    match &outcome {
        KillOutcome::Killed => {}
        KillOutcome::KilledWithOutput { stdout, stderr } => {
            if !stderr.trim().is_empty() {
                warn!(target: target, "Kill on {host}: there was some text in stderr: {stderr}");
            }
            if !stdout.trim().is_empty() {
                warn!(target: target, "Kill on {host}: there was some text in stdout: {stdout}");
            }
        }
        KillOutcome::Failed(output) => {
            error!(target: target, "Kill on {host} failed: {output}");
        }
    }

    outcome.is_success()
}
