use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;

/// Identity of a process tracked by a job.
///
/// `waitpid(-1, ..., WNOHANG)` returning `0` means "no event pending" --
/// that zero must never be confused with a process that never forked (a
/// builtin absorbed into the current shell, e.g. the last stage of a
/// pipeline run in-process). Keeping the two as distinct variants avoids
/// the classic C bug of overloading `pid == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessId {
    Forked(Pid),
    NeverForked,
}

impl ProcessId {
    pub fn pid(self) -> Option<Pid> {
        match self {
            ProcessId::Forked(pid) => Some(pid),
            ProcessId::NeverForked => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Running,
    Stopped,
    Done,
}

/// The last wait-primitive result recorded for a process.
///
/// For a forked process this is the decoded `waitpid` status. For a
/// process that never forked, only the in-shell exit status is ever
/// recorded (`NeverForked` below).
#[derive(Debug, Clone, Copy)]
pub enum RawStatus {
    Wait(WaitStatus),
    NeverForked(i32),
}

/// Snapshot of one child process within a job's pipeline.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub id: ProcessId,
    pub raw_status: Option<RawStatus>,
    pub state: ProcessState,
    pub name: String,
}

impl ProcessRecord {
    pub fn forked(pid: Pid, name: impl Into<String>) -> Self {
        Self {
            id: ProcessId::Forked(pid),
            raw_status: None,
            state: ProcessState::Running,
            name: name.into(),
        }
    }

    /// A process record for a command that ran entirely in the shell
    /// (e.g. a builtin absorbed into the current process) and has already
    /// produced a final status.
    pub fn never_forked(name: impl Into<String>, status: i32) -> Self {
        Self {
            id: ProcessId::NeverForked,
            raw_status: Some(RawStatus::NeverForked(status)),
            state: ProcessState::Done,
            name: name.into(),
        }
    }

    /// Apply one reaped `WaitStatus` for this process.
    pub fn apply_wait_status(&mut self, status: WaitStatus) {
        let next_state = match status {
            WaitStatus::Exited(..) | WaitStatus::Signaled(..) => Some(ProcessState::Done),
            WaitStatus::Stopped(..) => Some(ProcessState::Stopped),
            WaitStatus::Continued(..) => Some(ProcessState::Running),
            WaitStatus::StillAlive | WaitStatus::PtraceEvent(..) | WaitStatus::PtraceSyscall(..) => None,
        };
        if let Some(state) = next_state {
            self.raw_status = Some(RawStatus::Wait(status));
            self.state = state;
        }
    }

    /// Exit code if this process exited normally (never-forked processes
    /// report their stored status directly, per the exit-status rule).
    pub fn exit_code(&self) -> Option<i32> {
        match self.raw_status {
            Some(RawStatus::NeverForked(status)) => Some(status),
            Some(RawStatus::Wait(WaitStatus::Exited(_, code))) => Some(code),
            _ => None,
        }
    }

    pub fn term_signal(&self) -> Option<nix::sys::signal::Signal> {
        match self.raw_status {
            Some(RawStatus::Wait(WaitStatus::Signaled(_, sig, _))) => Some(sig),
            _ => None,
        }
    }

    pub fn stop_signal(&self) -> Option<nix::sys::signal::Signal> {
        match self.raw_status {
            Some(RawStatus::Wait(WaitStatus::Stopped(_, sig))) => Some(sig),
            _ => None,
        }
    }

    pub fn core_dumped(&self) -> bool {
        matches!(self.raw_status, Some(RawStatus::Wait(WaitStatus::Signaled(_, _, true))))
    }
}
