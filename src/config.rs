/// Environment variable holding the statefile directory on the remote host
pub const DEFAULT_STATEFILE_VAR: &str = "AIIDA_STATEFILE_DIR";

/// Log target used for protocol messages unless configured otherwise
pub const DEFAULT_LOG_TARGET: &str = "statefile_sched::scheduler";

/// Settings injected into every scheduler operation
///
/// There is no process-wide scheduler state: callers build one of these and hand it to a
/// [`StatefileScheduler`](crate::scheduler::StatefileScheduler).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Name of the remote environment variable pointing at the statefile directory
    pub statefile_var: String,
    /// `log` target for info/warn/error lines emitted while parsing command output
    pub log_target: String,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            statefile_var: DEFAULT_STATEFILE_VAR.to_string(),
            log_target: DEFAULT_LOG_TARGET.to_string(),
        }
    }
}

impl SchedulerConfig {
    pub fn new(statefile_var: impl Into<String>) -> Self {
        Self {
            statefile_var: statefile_var.into(),
            ..Default::default()
        }
    }

    pub fn with_log_target(mut self, log_target: impl Into<String>) -> Self {
        self.log_target = log_target.into();
        self
    }
}
