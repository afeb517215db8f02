use anyhow::{anyhow, Result};

use crate::config::Config;
use crate::error::{ErrorSink, StderrSink};
use crate::job::{do_wait, print_job_status, JobSelector, JobTable};

/// Lists background jobs. `-l` switches to the verbose, process-wise
/// format; unlike most shells this table has no `-r`/`-s` running/stopped
/// filters, since the core's aggregate state model makes "running"
/// ambiguous for a partially-stopped pipeline.
pub fn builtin_jobs(args: &[String], table: &mut JobTable, config: &Config) -> Result<i32> {
    do_wait(table, &StderrSink as &dyn ErrorSink);

    let mut verbose = false;
    for arg in args {
        match arg.as_str() {
            "-l" => verbose = true,
            other => return Err(anyhow!("jobs: invalid option: {}", other)),
        }
    }

    let mut stdout = std::io::stdout();
    print_job_status(table, JobSelector::All, false, verbose, config.posixly_correct, &mut stdout)?;
    Ok(0)
}
