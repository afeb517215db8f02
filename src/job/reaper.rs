//! Reaper (§4.3): a non-blocking drain of pending child events. Safe to
//! call with SIGCHLD blocked or unblocked; never blocks on a live child.

use nix::errno::Errno;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::error::{ErrorSink, WaitError};

use super::process::ProcessId;
use super::table::JobTable;

/// Drains every currently-pending child event, updating process and job
/// state in `table`. Returns once `waitpid` reports no more events.
pub fn do_wait(table: &mut JobTable, sink: &dyn ErrorSink) {
    let mut flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;

    loop {
        match waitpid(None::<Pid>, Some(flags)) {
            Err(Errno::EINTR) => continue,
            Err(Errno::ECHILD) => return,
            Err(Errno::EINVAL) if flags.contains(WaitPidFlag::WCONTINUED) => {
                // Some platforms accept WCONTINUED at compile time but
                // reject it at runtime. Drop it permanently and retry;
                // subsequent continued events simply go unnoticed.
                flags.remove(WaitPidFlag::WCONTINUED);
                continue;
            }
            Err(e) => {
                sink.report_wait_error(&WaitError::Errno(e));
                return;
            }
            Ok(WaitStatus::StillAlive) => return,
            Ok(status) => {
                apply_status(table, status);
            }
        }
    }
}

fn status_pid(status: WaitStatus) -> Option<Pid> {
    match status {
        WaitStatus::Exited(pid, _)
        | WaitStatus::Signaled(pid, _, _)
        | WaitStatus::Stopped(pid, _)
        | WaitStatus::Continued(pid)
        | WaitStatus::PtraceEvent(pid, _, _)
        | WaitStatus::PtraceSyscall(pid) => Some(pid),
        WaitStatus::StillAlive => None,
    }
}

fn apply_status(table: &mut JobTable, status: WaitStatus) {
    let Some(pid) = status_pid(status) else { return };

    for n in table.jobnumbers().collect::<Vec<_>>() {
        let job = table.get_mut(n).unwrap();
        let found = job
            .processes_mut()
            .iter_mut()
            .find(|p| p.id == ProcessId::Forked(pid));
        let Some(process) = found else { continue };
        process.apply_wait_status(status);
        job.recompute_state();
        return;
    }
    // Reaped a pid no job claims -- expected after disown; ignore.
}
