use nix::sys::signal::{kill, Signal};
use nix::sys::wait::waitpid;
use nix::unistd::Pid;

use rush::builtins::{builtin_bg, builtin_fg, builtin_jobs, builtin_kill, builtin_wait};
use rush::config::Config;
use rush::job::process::ProcessRecord;
use rush::job::record::{Job, JobState};
use rush::job::JobTable;

fn background(table: &mut JobTable, program: &str, args: &[&str]) -> usize {
    let stage = rush::launcher::Stage::new(program, args.iter().map(|s| s.to_string()).collect());
    let job = rush::launcher::launch(vec![stage], false).unwrap();
    table.set_active(job);
    table.add_job(true)
}

#[test]
fn jobs_builtin_rejects_unknown_flags() {
    let mut table = JobTable::new();
    let config = Config::default();
    assert!(builtin_jobs(&["-z".to_string()], &mut table, &config).is_err());
}

#[test]
fn jobs_builtin_lists_a_backgrounded_job() {
    let mut table = JobTable::new();
    let config = Config::default();
    background(&mut table, "sleep", &["5"]);

    let code = builtin_jobs(&[], &mut table, &config).unwrap();
    assert_eq!(code, 0);

    let pid = table.get(1).unwrap().processes()[0].id.pid().unwrap();
    let _ = kill(pid, Signal::SIGKILL);
    let _ = waitpid(pid, None);
}

#[test]
fn wait_waits_for_a_job_spec_and_reports_its_status() {
    let mut table = JobTable::new();
    let n = background(&mut table, "false", &[]);

    let code = builtin_wait(&[format!("%{n}")], &mut table).unwrap();
    assert_eq!(code, 1);
    assert_eq!(table.get(n).unwrap().state, JobState::Done);
}

#[test]
fn fg_then_kill_roundtrip_on_a_stopped_job() {
    let child = std::process::Command::new("sleep").arg("5").spawn().unwrap();
    let pid = Pid::from_raw(child.id() as i32);
    kill(pid, Signal::SIGSTOP).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(50));
    let status = waitpid(pid, Some(nix::sys::wait::WaitPidFlag::WUNTRACED)).unwrap();

    let mut table = JobTable::new();
    let mut record = ProcessRecord::forked(pid, "sleep 5");
    record.apply_wait_status(status);
    table.set_active(Job::new(vec![record], false));
    table.add_job(true);

    builtin_bg(&[], &mut table).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(50));
    rush::job::do_wait(&mut table, &rush::error::StderrSink);
    assert_eq!(table.get(1).unwrap().state, JobState::Running);

    builtin_kill(&["-KILL".to_string(), "%1".to_string()], &table).unwrap();
    let _ = waitpid(pid, None);
}

#[test]
fn fg_without_current_job_is_an_error() {
    let mut table = JobTable::new();
    assert!(builtin_fg(&[], &mut table).is_err());
}
