use anyhow::{anyhow, Result};

use crate::error::StderrSink;
use crate::job::{parse_job_spec, wait_for_job, JobTable};

/// Waits for one or more jobs to finish, or (with no argument) every job
/// currently in the table. Returns the exit status of the last job
/// waited for, per §4.4's no-argument semantics: the snapshot of job
/// numbers is taken once up front, so jobs started by a concurrent
/// process during the wait are not included.
pub fn builtin_wait(args: &[String], table: &mut JobTable) -> Result<i32> {
    if args.is_empty() {
        let snapshot: Vec<usize> = table.jobnumbers().collect();
        let mut code = 0;
        for n in snapshot {
            wait_for_job(table, n, false, &StderrSink);
            if let Some(job) = table.get(n) {
                code = job.exit_status();
            }
        }
        return Ok(code);
    }

    let mut code = 0;
    for spec in args {
        let n = parse_job_spec(table, spec).map_err(|e| anyhow!("wait: {}", e))?;
        wait_for_job(table, n, false, &StderrSink);
        if let Some(job) = table.get(n) {
            code = job.exit_status();
        }
    }
    Ok(code)
}
