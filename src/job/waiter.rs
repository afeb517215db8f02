//! Blocking waiter (§4.4): suspends the caller until a job reaches a
//! target state, racing safely against the reaper via the signal
//! subsystem's block/sleep primitives.

use crate::error::ErrorSink;
use crate::signals::{block_sigchld_and_sighup, unblock_sigchld_and_sighup, wait_for_sigchld};

use super::reaper::do_wait;
use super::record::JobState;
use super::table::JobTable;

/// Suspends the caller until job `n` reaches Done, or -- if
/// `return_on_stop` -- Done or Stopped. Returns immediately if the job is
/// already in the target state. No-op (returns immediately) if the job
/// does not exist.
///
/// The caller must hold no other locks across this call: it blocks
/// SIGCHLD+SIGHUP for its own thread for the duration.
///
/// The reaper is drained before the first state check, not just between
/// sleeps: if the target already exited in the spawn-to-block window, its
/// SIGCHLD was delivered under the default disposition and discarded
/// rather than left pending, so a `sigwait` before any drain would block
/// forever waiting for a signal that already came and went.
pub fn wait_for_job(table: &mut JobTable, n: usize, return_on_stop: bool, sink: &dyn ErrorSink) {
    block_sigchld_and_sighup().expect("failed to block SIGCHLD/SIGHUP");

    loop {
        do_wait(table, sink);

        let Some(job) = table.get(n) else { break };
        let reached = match job.state {
            JobState::Done => true,
            JobState::Stopped => return_on_stop,
            JobState::Running => false,
        };
        if reached {
            break;
        }

        wait_for_sigchld().expect("sigwait failed");
    }

    unblock_sigchld_and_sighup().expect("failed to unblock SIGCHLD/SIGHUP");
}
