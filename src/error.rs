//! Structured error types for the job-control core, in the teacher's
//! `thiserror`-for-types / `anyhow`-at-boundaries style (see
//! `src/builtins/{jobs,wait}.rs`, which wrap these with `anyhow!`).

use thiserror::Error;

/// An OS `waitpid` failure the reaper could not recover from locally.
#[derive(Debug, Error)]
pub enum WaitError {
    #[error("waitpid failed: {0}")]
    Errno(#[from] nix::errno::Errno),
}

/// A `%jobspec` that failed to resolve to exactly one job.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobControlError {
    #[error("no such job: {0}")]
    NoSuchJob(String),
    #[error("ambiguous job specification: {0}")]
    AmbiguousJobSpec(String),
}

/// Where the reaper reports OS wait failures, so `src/job/reaper.rs`
/// never reaches for `eprintln!` directly.
pub trait ErrorSink {
    fn report_wait_error(&self, err: &WaitError);
}

/// Default sink matching the teacher's `eprintln!`-based error surfacing.
pub struct StderrSink;

impl ErrorSink for StderrSink {
    fn report_wait_error(&self, err: &WaitError) {
        eprintln!("joshell: {}", err);
    }
}

#[cfg(test)]
pub struct RecordingSink {
    pub errors: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl Default for RecordingSink {
    fn default() -> Self {
        Self {
            errors: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
impl ErrorSink for RecordingSink {
    fn report_wait_error(&self, err: &WaitError) {
        self.errors.lock().unwrap().push(err.to_string());
    }
}
