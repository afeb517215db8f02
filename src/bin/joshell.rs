//! Demonstration harness for the job-control core, not a production
//! shell: no expansion, redirection, or quoting, and -- per the core's
//! Non-goals -- no process-group creation or `tcsetpgrp` terminal
//! handoff. A background job therefore still shares a controlling
//! terminal with the shell, so Ctrl-C lands on everything at once; real
//! foreground isolation is left to whatever full executor eventually
//! grows around this core.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::borrow::Cow;
use std::env;

use anyhow::Result;
use reedline::{Prompt, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal as ReedlineSignal};

use rush::builtins::{builtin_bg, builtin_fg, builtin_jobs, builtin_kill, builtin_wait};
use rush::config::Config;
use rush::error::{ErrorSink, StderrSink};
use rush::job::{do_wait, print_job_status, JobSelector, JobTable};
use rush::launcher::{launch, Stage};

struct JoshellPrompt;

impl Prompt for JoshellPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        let cwd = env::current_dir()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| "?".to_string());
        Cow::Owned(format!("{}> ", cwd))
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: reedline::PromptEditMode) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("> ")
    }

    fn render_prompt_history_search_indicator(&self, search: PromptHistorySearch) -> Cow<str> {
        let prefix = match search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!("({}reverse-search: {}) ", prefix, search.term))
    }
}

/// Splits a line into pipeline stages on `|` and a trailing `&`. No
/// quoting, expansion, or redirection -- this demo exercises the job-
/// control core, not a command language.
fn parse_line(line: &str) -> (Vec<Stage>, bool) {
    let background = line.trim_end().ends_with('&');
    let body = if background { line.trim_end().trim_end_matches('&') } else { line };

    let stages = body
        .split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let mut words = s.split_whitespace();
            let program = words.next().unwrap_or_default().to_string();
            let args = words.map(str::to_string).collect();
            Stage::new(program, args)
        })
        .collect();

    (stages, background)
}

fn report_done_jobs(table: &mut JobTable) {
    let mut stdout = std::io::stdout();
    let _ = print_job_status(table, JobSelector::All, true, false, false, &mut stdout);
}

fn dispatch(line: &str, table: &mut JobTable, config: &Config) -> Result<i32> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else { return Ok(0) };
    let rest: Vec<String> = words.map(str::to_string).collect();

    match command {
        "jobs" => builtin_jobs(&rest, table, config),
        "fg" => builtin_fg(&rest, table),
        "bg" => builtin_bg(&rest, table),
        "wait" => builtin_wait(&rest, table),
        "kill" => builtin_kill(&rest, table),
        _ => run_pipeline(line, table),
    }
}

fn run_pipeline(line: &str, table: &mut JobTable) -> Result<i32> {
    let (stages, background) = parse_line(line);
    if stages.is_empty() {
        return Ok(0);
    }

    let job = launch(stages, false)?;
    let leader = job.processes()[0].id.pid().expect("launched job has a forked leader");
    table.set_active(job);
    let n = table.add_job(!background);

    if background {
        println!("[{}] {}", n, leader);
        return Ok(0);
    }

    rush::job::wait_for_job(table, n, true, &StderrSink);

    Ok(match table.get(n) {
        Some(job) if job.state == rush::job::JobState::Stopped => {
            eprintln!("[{}]+  Stopped\t{}", n, rush::job::format::job_display_name(job));
            job.stopped_status()
        }
        Some(job) => job.exit_status(),
        None => 0,
    })
}

fn main() -> Result<()> {
    let config = Config::load();
    let mut table = JobTable::new();

    let mut line_editor = Reedline::create();
    let prompt = JoshellPrompt;

    loop {
        do_wait(&mut table, &StderrSink as &dyn ErrorSink);
        report_done_jobs(&mut table);

        match line_editor.read_line(&prompt) {
            Ok(ReedlineSignal::Success(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if let Err(e) = dispatch(line, &mut table, &config) {
                    eprintln!("joshell: {}", e);
                }
            }
            Ok(ReedlineSignal::CtrlC) => continue,
            Ok(ReedlineSignal::CtrlD) => break,
            Err(e) => {
                if e.kind() == std::io::ErrorKind::Interrupted {
                    continue;
                }
                eprintln!("joshell: error reading line: {}", e);
                break;
            }
        }
    }

    Ok(())
}
