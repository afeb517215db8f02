use anyhow::{anyhow, Result};
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::str::FromStr;

use crate::builtins::signal_job;
use crate::job::{parse_job_spec, JobTable};
use crate::signals::signal_name;

/// Sends a signal to every process of a job (`%jobspec` targets), or (if
/// the argument parses as a plain number) directly to that pid. Accepts
/// `-SIGNAME`/`-n` to pick the signal, defaulting to SIGTERM.
pub fn builtin_kill(args: &[String], table: &JobTable) -> Result<i32> {
    let mut signal = Signal::SIGTERM;
    let mut targets = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(spec) = arg.strip_prefix('-') {
            signal = parse_signal(spec)?;
        } else {
            targets.push(arg.clone());
        }
    }

    if targets.is_empty() {
        return Err(anyhow!("kill: usage: kill [-signal] pid|%job ..."));
    }

    for target in targets {
        if let Some(spec) = target.strip_prefix('%') {
            let n = parse_job_spec(table, &format!("%{}", spec)).map_err(|e| anyhow!("kill: {}", e))?;
            let job = table.get(n).expect("parse_job_spec returned an extant job");
            signal_job(job, signal).map_err(|e| anyhow!("kill: ({}) - {}", target, e))?;
        } else {
            let raw: i32 = target.parse().map_err(|_| anyhow!("kill: invalid pid or job spec: {}", target))?;
            kill(Pid::from_raw(raw), signal).map_err(|e| anyhow!("kill: ({}) - {}", target, e))?;
        }
    }
    Ok(0)
}

fn parse_signal(spec: &str) -> Result<Signal> {
    if let Ok(n) = spec.parse::<i32>() {
        return Signal::try_from(n).map_err(|_| anyhow!("kill: invalid signal number: {}", n));
    }
    let name = spec.strip_prefix("SIG").unwrap_or(spec);
    for candidate in Signal::iterator() {
        if signal_name(candidate).eq_ignore_ascii_case(name) {
            return Ok(candidate);
        }
    }
    Signal::from_str(&format!("SIG{}", name.to_uppercase())).map_err(|_| anyhow!("kill: invalid signal: {}", spec))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::process::ProcessRecord;
    use crate::job::record::Job;

    #[test]
    fn no_targets_is_an_error() {
        let table = JobTable::new();
        assert!(builtin_kill(&[], &table).is_err());
    }

    #[test]
    fn unknown_job_spec_is_an_error() {
        let table = JobTable::new();
        assert!(builtin_kill(&["%1".to_string()], &table).is_err());
    }

    #[test]
    fn kills_a_real_process_by_job_spec() {
        let child = std::process::Command::new("sleep").arg("5").spawn().unwrap();
        let pid = Pid::from_raw(child.id() as i32);

        let mut table = JobTable::new();
        table.set_active(Job::new(vec![ProcessRecord::forked(pid, "sleep 5")], false));
        table.add_job(false);

        builtin_kill(&["-KILL".to_string(), "%1".to_string()], &table).unwrap();
        let status = nix::sys::wait::waitpid(pid, None).unwrap();
        assert!(matches!(status, nix::sys::wait::WaitStatus::Signaled(_, Signal::SIGKILL, _)));
    }

    #[test]
    fn parses_bare_signal_number() {
        assert_eq!(parse_signal("9").unwrap(), Signal::SIGKILL);
    }

    #[test]
    fn parses_signal_name_with_and_without_sig_prefix() {
        assert_eq!(parse_signal("TERM").unwrap(), Signal::SIGTERM);
        assert_eq!(parse_signal("SIGTERM").unwrap(), Signal::SIGTERM);
    }
}
