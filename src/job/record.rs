use super::process::{ProcessRecord, ProcessState, RawStatus};

/// Shell-chosen constant added to signal numbers when expressing them as
/// exit statuses, so signal-derived statuses are distinguishable from exit
/// codes 0-255 and from shell-internal statuses.
pub const TERMSIG_OFFSET: i32 = 384;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Stopped,
    Done,
}

/// A pipeline of one or more processes tracked as a single job.
#[derive(Debug, Clone)]
pub struct Job {
    processes: Vec<ProcessRecord>,
    pub state: JobState,
    pub status_changed: bool,
    pub is_loop: bool,
}

impl Job {
    /// Builds a job from a non-empty pipeline of process records.
    ///
    /// Panics if `processes` is empty -- the launcher never constructs an
    /// empty pipeline, so an empty `Vec` here is a programmer error, not a
    /// condition the core recovers from.
    pub fn new(processes: Vec<ProcessRecord>, is_loop: bool) -> Self {
        assert!(!processes.is_empty(), "a job must have at least one process");
        let state = aggregate_state(&processes);
        Self {
            processes,
            state,
            status_changed: false,
            is_loop,
        }
    }

    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    pub fn processes_mut(&mut self) -> &mut [ProcessRecord] {
        &mut self.processes
    }

    /// The last process in the pipeline; its exit status is the job's.
    pub fn last_process(&self) -> &ProcessRecord {
        self.processes.last().expect("job always has >= 1 process")
    }

    /// Recomputes the aggregate state from member processes (§3 I2).
    /// Returns whether the state changed, and sets `status_changed` if so.
    pub fn recompute_state(&mut self) -> bool {
        let next = aggregate_state(&self.processes);
        if next != self.state {
            self.state = next;
            self.status_changed = true;
            true
        } else {
            false
        }
    }

    /// The reportable exit status of a Done job (§4.5).
    ///
    /// Calling this on a Running job is a programming error.
    pub fn exit_status(&self) -> i32 {
        debug_assert!(
            self.state != JobState::Running,
            "exit_status() called on a Running job"
        );
        if self.state == JobState::Running {
            // Defensive fallback for release builds: Running has no
            // well-defined exit status, but we must return something.
            return 0;
        }
        let last = self.last_process();
        // A never-forked process's status is whatever the shell itself
        // computed (e.g. a signal-derived `sig + TERMSIG_OFFSET`); it is
        // not a raw `wait(2)` status, so it is never masked to a byte.
        if let Some(RawStatus::NeverForked(status)) = last.raw_status {
            return status;
        }
        if let Some(code) = last.exit_code() {
            return code & 0xff;
        }
        if let Some(sig) = last.term_signal() {
            return sig as i32 + TERMSIG_OFFSET;
        }
        debug_assert!(false, "Done job's last process has neither exit code nor term signal");
        0
    }

    /// The reportable status of a Stopped job: the stop signal of the
    /// *last stopped process*, scanning from the end (§4.5).
    ///
    /// Calling this on a job that is not Stopped is a programming error.
    pub fn stopped_status(&self) -> i32 {
        debug_assert!(self.state == JobState::Stopped, "stopped_status() called on a non-Stopped job");
        let last_stopped = self
            .processes
            .iter()
            .rev()
            .find(|p| p.state == ProcessState::Stopped);
        match last_stopped.and_then(|p| p.stop_signal()) {
            Some(sig) => sig as i32 + TERMSIG_OFFSET,
            None => {
                debug_assert!(false, "Stopped job has no stopped process");
                0
            }
        }
    }
}

fn aggregate_state(processes: &[ProcessRecord]) -> JobState {
    if processes.iter().any(|p| p.state == ProcessState::Running) {
        JobState::Running
    } else if processes.iter().any(|p| p.state == ProcessState::Stopped) {
        JobState::Stopped
    } else {
        JobState::Done
    }
}
