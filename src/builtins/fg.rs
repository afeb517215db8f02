use anyhow::{anyhow, Result};
use nix::sys::signal::Signal;

use crate::builtins::signal_job;
use crate::error::{ErrorSink, StderrSink};
use crate::job::format::job_display_name;
use crate::job::record::JobState;
use crate::job::{do_wait, parse_job_spec, wait_for_job, JobTable};

/// Resumes a stopped or backgrounded job in the foreground, waiting for
/// it to finish or stop again. Defaults to the current job (`%%`) with no
/// argument.
pub fn builtin_fg(args: &[String], table: &mut JobTable) -> Result<i32> {
    do_wait(table, &StderrSink as &dyn ErrorSink);

    let n = resolve(table, args)?;
    let job = table.get(n).ok_or_else(|| anyhow!("fg: no such job"))?;
    let was_stopped = job.state == JobState::Stopped;
    eprintln!("{}", job_display_name(job));

    if was_stopped {
        signal_job(job, Signal::SIGCONT)?;
    }

    wait_for_job(table, n, true, &StderrSink);

    let code = match table.get(n) {
        Some(job) if job.state == JobState::Stopped => {
            eprintln!("[{}]+  Stopped\t{}", n, job_display_name(job));
            job.stopped_status()
        }
        Some(job) => job.exit_status(),
        None => 0,
    };
    table.set_current(n);
    Ok(code)
}

fn resolve(table: &JobTable, args: &[String]) -> Result<usize> {
    match args.first() {
        Some(spec) => Ok(parse_job_spec(table, spec)?),
        None => parse_job_spec(table, "%%").map_err(|e| anyhow!("fg: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::process::ProcessRecord;
    use crate::job::record::Job;
    use nix::unistd::Pid;
    use std::process::Command;

    #[test]
    fn foregrounds_current_job_and_waits_for_exit() {
        let child = Command::new("true").spawn().unwrap();
        let pid = Pid::from_raw(child.id() as i32);

        let mut table = JobTable::new();
        table.set_active(Job::new(vec![ProcessRecord::forked(pid, "true")], false));
        table.add_job(false);

        let code = builtin_fg(&[], &mut table).unwrap();
        assert_eq!(code, 0);
        // The printer, not `fg`, collects completed jobs: it stays in the
        // table, now Done.
        assert_eq!(table.get(1).unwrap().state, JobState::Done);
    }

    #[test]
    fn no_current_job_is_an_error() {
        let mut table = JobTable::new();
        assert!(builtin_fg(&[], &mut table).is_err());
    }
}
