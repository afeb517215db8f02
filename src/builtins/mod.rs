//! Job-control builtins: thin glue between the CLI demo's command loop
//! and the `job` module's core, in the teacher's `src/builtins/*.rs`
//! style (free functions taking `&[String]` plus shared state, returning
//! `anyhow::Result`).

mod bg;
mod fg;
mod jobs;
mod kill;
mod wait;

pub use bg::builtin_bg;
pub use fg::builtin_fg;
pub use jobs::builtin_jobs;
pub use kill::builtin_kill;
pub use wait::builtin_wait;

use nix::sys::signal::{kill, Signal};

use crate::job::Job;

/// Sends `sig` to every process still known to belong to `job`. Process-group
/// signalling is a named Non-goal of the job-control core (no `setpgid` is
/// ever performed), so `fg`/`bg`/`kill` reach every member individually
/// instead of signalling a single negated process-group id.
pub fn signal_job(job: &Job, sig: Signal) -> nix::Result<()> {
    for process in job.processes() {
        if let Some(pid) = process.id.pid() {
            kill(pid, sig)?;
        }
    }
    Ok(())
}
