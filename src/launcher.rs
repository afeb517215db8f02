//! Minimal pipeline launcher: forks a sequence of real processes
//! connected by OS pipes and hands the resulting [`Job`](crate::job::Job)
//! to the core for tracking.
//!
//! This is deliberately not a full executor (see the teacher's
//! `src/executor/pipeline.rs`, which buffers each stage's output fully
//! before feeding the next): job control needs stages to run
//! *concurrently*, so the shell can stop or background a pipeline mid-
//! stream, which a buffer-and-forward design cannot do. Stages are wired
//! with real kernel pipes via `os_pipe` and connected directly to each
//! child's stdio, with no expansion, redirection, or builtin dispatch --
//! those stay in the CLI demo and the real executor it would eventually
//! grow into.
//!
//! Process-group creation and terminal foreground-group management
//! (`tcsetpgrp`) are named Non-goals of the job-control core, so every
//! forked process here stays in the shell's own process group; `fg`/`bg`
//! signal a job by walking its process records individually
//! (`crate::builtins::signal_job`) rather than by signalling a negated
//! process-group id.

use std::io;
use std::process::{Command, Stdio};

use nix::unistd::Pid;

use crate::job::{Job, ProcessRecord};

/// One pipeline stage: a program and its arguments, no expansion applied.
pub struct Stage {
    pub program: String,
    pub args: Vec<String>,
}

impl Stage {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    fn display_name(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

/// Forks every stage of `stages`, wiring stdout of stage *i* to stdin of
/// stage *i+1* with a real OS pipe. Returns a [`Job`] the caller should
/// hand to `JobTable::set_active`.
pub fn launch(stages: Vec<Stage>, is_loop: bool) -> io::Result<Job> {
    assert!(!stages.is_empty(), "launch called with no pipeline stages");

    let mut processes = Vec::with_capacity(stages.len());
    let mut next_stdin: Option<os_pipe::PipeReader> = None;
    let stage_count = stages.len();

    for (i, stage) in stages.into_iter().enumerate() {
        let is_last = i + 1 == stage_count;

        let mut cmd = Command::new(&stage.program);
        cmd.args(&stage.args);

        match next_stdin.take() {
            Some(reader) => cmd.stdin(reader),
            None => cmd.stdin(Stdio::inherit()),
        };

        let stdout = if is_last {
            Stdio::inherit()
        } else {
            let (reader, writer) = os_pipe::pipe()?;
            next_stdin = Some(reader);
            Stdio::from(writer)
        };
        cmd.stdout(stdout).stderr(Stdio::inherit());

        let child = cmd.spawn()?;
        let pid = Pid::from_raw(child.id() as i32);

        processes.push(ProcessRecord::forked(pid, stage.display_name()));
        drop(child); // reaping happens through the core's waitpid, not Child::wait.
    }

    Ok(Job::new(processes, is_loop))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_stage_spawns_a_running_process() {
        let job = launch(vec![Stage::new("true", vec![])], false).unwrap();
        assert_eq!(job.processes().len(), 1);
        let pid = job.processes()[0].id.pid().unwrap();
        // Let it run to completion, then confirm it's reapable.
        std::thread::sleep(std::time::Duration::from_millis(100));
        let status = nix::sys::wait::waitpid(pid, None).unwrap();
        assert!(matches!(status, nix::sys::wait::WaitStatus::Exited(_, 0)));
    }

    #[test]
    fn pipeline_stages_are_wired_through_real_pipes() {
        let job = launch(
            vec![
                Stage::new("echo", vec!["hi".to_string()]),
                Stage::new("cat", vec![]),
            ],
            false,
        )
        .unwrap();

        assert_eq!(job.processes().len(), 2);
        for p in job.processes() {
            let pid = p.id.pid().unwrap();
            let _ = nix::sys::wait::waitpid(pid, None);
        }
    }
}
