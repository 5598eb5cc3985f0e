use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use statefile_sched::config::DEFAULT_STATEFILE_VAR;
use statefile_sched::{
    JobId, JobSelection, LocalShell, SchedulerConfig, StatefileScheduler, Transport,
    WorkingDirectory,
};

use crate::output::{escape_for_bash, OutputFormat, Snapshot};

mod output;

/// Queue, list and kill jobs through statefiles in a shared directory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Environment variable naming the statefile directory
    #[arg(long, env = "STATEFILE_SCHED_VAR", default_value = DEFAULT_STATEFILE_VAR)]
    statefile_var: String,

    /// Statefile directory, exported to the shell under --statefile-var
    ///
    /// If unset the variable must already be present in the environment.
    #[arg(long)]
    statefile_dir: Option<PathBuf>,

    /// How to print job listings
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Report the state of some or all jobs
    List {
        /// Job ids to probe, lists every statefile if empty
        jobs: Vec<String>,
    },
    /// Queue a job script, the job id is the working directory's basename
    Submit {
        /// Directory the job runs in
        #[arg(long)]
        workdir: PathBuf,
        /// Script to run, relative to the working directory
        script: String,
    },
    /// Drop a KILL marker for a job
    Kill {
        job_id: String,
    },
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();
    info!(
        "statefile-sched {} using statefile directory variable {}",
        env!("CARGO_PKG_VERSION"),
        args.statefile_var
    );

    let scheduler = StatefileScheduler::new(SchedulerConfig::new(&args.statefile_var));
    let mut shell = LocalShell::new().with_log_target(&scheduler.config().log_target);
    if let Some(dir) = &args.statefile_dir {
        let dir = dir
            .canonicalize()
            .with_context(|| format!("Can't resolve statefile directory {}", dir.display()))?;
        shell = shell.with_env(&args.statefile_var, dir);
    }
    info!("Running commands with {}", shell.label());

    match args.action {
        Action::List { jobs } => {
            let selection = JobSelection::from_ids(jobs)?;
            let jobs = scheduler
                .get_jobs(&shell, &selection)
                .context("Listing statefiles failed")?;
            print!("{}", Snapshot::now(jobs).render(args.format)?);
        }
        Action::Submit { workdir, script } => {
            let wd = WorkingDirectory {
                path: workdir
                    .canonicalize()
                    .with_context(|| format!("Can't resolve working directory {}", workdir.display()))?,
            };
            let job_id = scheduler
                .submit_from_script(&shell, &wd, &escape_for_bash(&script))
                .context("Submitting job failed")?;
            println!("{job_id}");
        }
        Action::Kill { job_id } => {
            let job_id = JobId::new(job_id)?;
            if !scheduler.kill(&shell, &job_id)? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
