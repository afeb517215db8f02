use anyhow::{anyhow, Result};
use nix::sys::signal::Signal;

use crate::builtins::signal_job;
use crate::error::{ErrorSink, StderrSink};
use crate::job::format::job_display_name;
use crate::job::record::JobState;
use crate::job::{do_wait, parse_job_spec, JobTable};

/// Resumes a stopped job in the background. Defaults to the current job
/// with no argument.
pub fn builtin_bg(args: &[String], table: &mut JobTable) -> Result<i32> {
    do_wait(table, &StderrSink as &dyn ErrorSink);

    let n = match args.first() {
        Some(spec) => parse_job_spec(table, spec)?,
        None => parse_job_spec(table, "%%").map_err(|e| anyhow!("bg: {}", e))?,
    };

    let job = table.get(n).ok_or_else(|| anyhow!("bg: no such job"))?;
    if job.state != JobState::Stopped {
        return Err(anyhow!("bg: job {} is not stopped", n));
    }

    signal_job(job, Signal::SIGCONT)?;
    eprintln!("[{}]+  {} &", n, job_display_name(job));
    Ok(0)
}
