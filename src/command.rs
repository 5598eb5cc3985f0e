//! Render the list, submit and kill shell commands
//!
//! These three command strings are the whole wire protocol to the execution host. Every command
//! pins the locale and runs with `set -eu`, so a missing statefile directory variable aborts the
//! command instead of touching the wrong directory.

use serde::Serialize;
use tinytemplate::TinyTemplate;

use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::job::id::{JobId, JobSelection};
use crate::job::state::JobState;

/// included list command template
static LIST: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/list.txt"));
/// included submit command template
static SUBMIT: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/submit.txt"));
/// included kill command template
static KILL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/data/templates/kill.txt"));

/// Rendering context for the list command
#[derive(Serialize)]
struct ListContext {
    statefile_var: String,
    /// space separated `<job_id>.<STATE>` probes, each with a leading space
    probes: String,
}

/// Rendering context for the submit command
#[derive(Serialize)]
struct SubmitContext {
    statefile_var: String,
    script: String,
}

/// Rendering context for the kill command
#[derive(Serialize)]
struct KillContext {
    statefile_var: String,
    job_id: String,
}

/// Command listing the statefile directory
///
/// For explicit jobs every `<job_id>.<STATE>` is passed to `ls`, so each missing statefile shows
/// up as its own line in stderr. A job with no statefile at all is still reported that way.
pub fn joblist_command(config: &SchedulerConfig, jobs: &JobSelection) -> Result<String> {
    let probes: String = jobs
        .job_ids()
        .unwrap_or_default()
        .iter()
        .flat_map(|job| {
            JobState::ALL
                .into_iter()
                .map(move |state| format!(" {}", statefile_name(job, state)))
        })
        .collect();

    let context = ListContext {
        statefile_var: config.statefile_var.clone(),
        probes,
    };
    render("list", LIST, &context)
}

/// Command queuing the job in the current working directory
///
/// The job id is the basename of the working directory. Writing `<job_id>.QUEUED` is the whole
/// submission, its content is `cwd='<dir>'` and `cmd=<script>` on two lines. `submit_script`
/// must already be escaped for the shell.
///
/// A basename that isn't a valid [`JobId`] aborts the command before anything is written, since
/// its statefile could never be listed again.
pub fn submit_command(config: &SchedulerConfig, submit_script: &str) -> Result<String> {
    let context = SubmitContext {
        statefile_var: config.statefile_var.clone(),
        script: submit_script.to_string(),
    };
    render("submit", SUBMIT, &context)
}

/// Command dropping an empty `<job_id>.KILL` marker
///
/// The marker is advisory: whatever drives the jobs decides what to do with it.
pub fn kill_command(config: &SchedulerConfig, job_id: &JobId) -> Result<String> {
    let context = KillContext {
        statefile_var: config.statefile_var.clone(),
        job_id: job_id.to_string(),
    };
    render("kill", KILL, &context)
}

/// Name of the statefile recording `state` for `job_id`
pub fn statefile_name(job_id: &JobId, state: JobState) -> String {
    format!("{}.{}", job_id, state.as_token())
}

fn render<C: Serialize>(name: &str, template: &str, context: &C) -> Result<String> {
    let mut tt = TinyTemplate::new();
    // shell text, not HTML
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(name, template)?;
    let command = tt.render(name, context)?;
    Ok(command.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SchedulerConfig {
        SchedulerConfig::default()
    }

    #[test]
    fn list_all_statefiles() {
        let command = joblist_command(&config(), &JobSelection::All).unwrap();
        assert_eq!(
            command,
            "export LC_ALL=C; set -eu; cd \"$AIIDA_STATEFILE_DIR\"; command ls -1"
        );
    }

    #[test]
    fn list_probes_every_state_of_every_job() {
        let jobs = JobSelection::from_ids(["j1", "j2"]).unwrap();
        let command = joblist_command(&config(), &jobs).unwrap();
        assert_eq!(
            command,
            "export LC_ALL=C; set -eu; cd \"$AIIDA_STATEFILE_DIR\"; command ls -1 \
             j1.UNDETERMINED j1.QUEUED_HELD j1.QUEUED j1.RUNNING j1.DONE \
             j2.UNDETERMINED j2.QUEUED_HELD j2.QUEUED j2.RUNNING j2.DONE"
        );
    }

    #[test]
    fn list_uses_configured_variable() {
        let command = joblist_command(&SchedulerConfig::new("MY_DIR"), &JobSelection::All).unwrap();
        assert!(command.contains("cd \"$MY_DIR\";"));
        assert!(!command.contains("AIIDA"));
    }

    #[test]
    fn submit_writes_queued_statefile_and_echoes_id() {
        let command = submit_command(&config(), "'_submit.sh'").unwrap();
        assert_eq!(
            command,
            "export LC_ALL=C;set -eu;jobid=$(basename $(pwd));\
             case \"$jobid\" in ''|-*|*[!A-Za-z0-9_-]*) \
             echo \"unsupported job id: $jobid\" >&2; exit 1;; esac;\
             echo -e \"cwd='$(pwd)'\\ncmd='_submit.sh'\" > \"$AIIDA_STATEFILE_DIR/$jobid.QUEUED\";\
             echo $jobid"
        );
    }

    #[test]
    fn submit_script_is_not_html_escaped() {
        let command = submit_command(&config(), "run.sh <in >out && true").unwrap();
        assert!(command.contains("cmd=run.sh <in >out && true\""));
    }

    #[test]
    fn kill_touches_marker() {
        let job_id = JobId::new("12345").unwrap();
        let command = kill_command(&config(), &job_id).unwrap();
        assert_eq!(
            command,
            "export LC_ALL=C;set -eu;touch \"$AIIDA_STATEFILE_DIR/12345.KILL\""
        );
    }
}
