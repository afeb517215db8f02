//! Status formatter (§4.6): produces the human strings POSIX job-control
//! builtins render, given a way to turn a signal into its symbolic name.

use super::process::{ProcessRecord, ProcessState};
use super::record::{Job, JobState};

/// Renders one process's status string.
///
/// | state | string |
/// |---|---|
/// | Running | `Running` |
/// | Stopped | `Stopped(SIG<name>)` |
/// | Done, exit 0 | `Done` |
/// | Done, exit n != 0 | `Done(n)` |
/// | Done, signalled | `Killed (SIG<name>)` / `Killed (SIG<name>: core dumped)` |
pub fn process_status_string(process: &ProcessRecord) -> String {
    match process.state {
        ProcessState::Running => "Running".to_string(),
        ProcessState::Stopped => {
            let name = process
                .stop_signal()
                .map(crate::signals::signal_name)
                .unwrap_or("?");
            format!("Stopped(SIG{})", name)
        }
        ProcessState::Done => {
            if let Some(code) = process.exit_code() {
                if code == 0 {
                    "Done".to_string()
                } else {
                    format!("Done({})", code)
                }
            } else if let Some(sig) = process.term_signal() {
                let name = crate::signals::signal_name(sig);
                if process.core_dumped() {
                    format!("Killed (SIG{}: core dumped)", name)
                } else {
                    format!("Killed (SIG{})", name)
                }
            } else {
                "Done".to_string()
            }
        }
    }
}

/// Renders a job's status string: Running -> "Running"; Stopped -> the
/// string of the last Stopped process; Done -> the string of the last
/// process.
pub fn job_status_string(job: &Job) -> String {
    match job.state {
        JobState::Running => "Running".to_string(),
        JobState::Stopped => {
            let last_stopped = job
                .processes()
                .iter()
                .rev()
                .find(|p| p.state == ProcessState::Stopped)
                .expect("Stopped job has a Stopped process");
            process_status_string(last_stopped)
        }
        JobState::Done => process_status_string(job.last_process()),
    }
}

/// Renders a job's display name: the sole process's name for a
/// single-process job, otherwise each process's name joined by " | ",
/// prefixed with "| " when the pipeline loops back on itself.
pub fn job_display_name(job: &Job) -> String {
    let joined = if job.processes().len() == 1 {
        job.processes()[0].name.clone()
    } else {
        job.processes()
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    };
    if job.is_loop {
        format!("| {}", joined)
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::process::ProcessRecord;
    use nix::sys::signal::Signal;
    use nix::sys::wait::WaitStatus;
    use nix::unistd::Pid;

    #[test]
    fn running_process_string() {
        let p = ProcessRecord::forked(Pid::from_raw(1), "sleep 10");
        assert_eq!(process_status_string(&p), "Running");
    }

    #[test]
    fn stopped_process_string_includes_signal_name() {
        let pid = Pid::from_raw(1);
        let mut p = ProcessRecord::forked(pid, "vi");
        p.apply_wait_status(WaitStatus::Stopped(pid, Signal::SIGTSTP));
        assert_eq!(process_status_string(&p), "Stopped(SIGTSTP)");
    }

    #[test]
    fn done_exit_zero_is_plain_done() {
        let pid = Pid::from_raw(1);
        let mut p = ProcessRecord::forked(pid, "true");
        p.apply_wait_status(WaitStatus::Exited(pid, 0));
        assert_eq!(process_status_string(&p), "Done");
    }

    #[test]
    fn done_nonzero_exit_includes_code() {
        let pid = Pid::from_raw(1);
        let mut p = ProcessRecord::forked(pid, "false");
        p.apply_wait_status(WaitStatus::Exited(pid, 7));
        assert_eq!(process_status_string(&p), "Done(7)");
    }

    #[test]
    fn killed_with_core_dump() {
        let pid = Pid::from_raw(1);
        let mut p = ProcessRecord::forked(pid, "crashy");
        p.apply_wait_status(WaitStatus::Signaled(pid, Signal::SIGSEGV, true));
        assert_eq!(process_status_string(&p), "Killed (SIGSEGV: core dumped)");
    }

    #[test]
    fn killed_without_core_dump() {
        let pid = Pid::from_raw(1);
        let mut p = ProcessRecord::forked(pid, "victim");
        p.apply_wait_status(WaitStatus::Signaled(pid, Signal::SIGTERM, false));
        assert_eq!(process_status_string(&p), "Killed (SIGTERM)");
    }

    #[test]
    fn job_display_name_single_process() {
        let job = Job::new(vec![ProcessRecord::forked(Pid::from_raw(1), "sleep 10")], false);
        assert_eq!(job_display_name(&job), "sleep 10");
    }

    #[test]
    fn job_display_name_pipeline_joins_with_pipe() {
        let job = Job::new(
            vec![
                ProcessRecord::forked(Pid::from_raw(1), "cat file"),
                ProcessRecord::forked(Pid::from_raw(2), "grep foo"),
            ],
            false,
        );
        assert_eq!(job_display_name(&job), "cat file | grep foo");
    }

    #[test]
    fn job_display_name_loop_is_prefixed() {
        let job = Job::new(
            vec![
                ProcessRecord::forked(Pid::from_raw(1), "a"),
                ProcessRecord::forked(Pid::from_raw(2), "b"),
            ],
            true,
        );
        assert_eq!(job_display_name(&job), "| a | b");
    }
}
