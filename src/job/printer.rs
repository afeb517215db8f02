//! Printer (§4.7): the sole collector of completed jobs. Renders job
//! status in the POSIX-mandated formats and removes Done jobs once they
//! have been reported.

use std::io::Write;

use super::format::{job_display_name, job_status_string, process_status_string};
use super::record::JobState;
use super::table::JobTable;

/// Which job(s) a print request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSelector {
    All,
    Number(usize),
}

fn current_marker(table: &JobTable, n: usize) -> char {
    if n == table.current_jobnumber() {
        '+'
    } else if n == table.previous_jobnumber() {
        '-'
    } else {
        ' '
    }
}

/// Prints the status of the selected job(s) to `sink`.
///
/// - `changed_only`: skip jobs whose `status_changed` flag is not set.
/// - `verbose`: process-wise format instead of job-wise.
/// - `posixly_correct`: under verbose mode, suppress per-process status
///   strings on continuation lines (the field is still emitted, empty, to
///   preserve column width).
///
/// After printing a job, its `status_changed` flag is cleared; if it was
/// Done, it is removed from the table.
pub fn print_job_status(
    table: &mut JobTable,
    selector: JobSelector,
    changed_only: bool,
    verbose: bool,
    posixly_correct: bool,
    sink: &mut dyn Write,
) -> std::io::Result<()> {
    match selector {
        JobSelector::All => {
            for n in table.jobnumbers().collect::<Vec<_>>() {
                print_one(table, n, changed_only, verbose, posixly_correct, sink)?;
            }
            Ok(())
        }
        JobSelector::Number(n) => print_one(table, n, changed_only, verbose, posixly_correct, sink),
    }
}

fn print_one(
    table: &mut JobTable,
    n: usize,
    changed_only: bool,
    verbose: bool,
    posixly_correct: bool,
    sink: &mut dyn Write,
) -> std::io::Result<()> {
    let Some(job) = table.get(n) else { return Ok(()) };
    if changed_only && !job.status_changed {
        return Ok(());
    }

    let marker = current_marker(table, n);
    let job = table.get(n).unwrap();

    if verbose {
        write_verbose(sink, n, marker, job, posixly_correct)?;
    } else {
        writeln!(sink, "[{}] {} {:<20} {}", n, marker, job_status_string(job), job_display_name(job))?;
    }

    let is_done = job.state == JobState::Done;

    table.get_mut(n).unwrap().status_changed = false;
    if is_done {
        table.remove(n);
    }
    Ok(())
}

fn write_verbose(
    sink: &mut dyn Write,
    n: usize,
    marker: char,
    job: &super::record::Job,
    posixly_correct: bool,
) -> std::io::Result<()> {
    let processes = job.processes();
    let pipe_marker = if job.is_loop { '|' } else { ' ' };

    let first = &processes[0];
    let first_pid = first.id.pid().map(|p| p.as_raw()).unwrap_or(0);
    writeln!(
        sink,
        "[{}] {} {:>5} {:<20} {} {}",
        n,
        marker,
        first_pid,
        process_status_string(first),
        pipe_marker,
        first.name,
    )?;

    for process in &processes[1..] {
        let pid = process.id.pid().map(|p| p.as_raw()).unwrap_or(0);
        let status = if posixly_correct {
            String::new()
        } else {
            process_status_string(process)
        };
        writeln!(sink, "      {:>5} {:<20} | {}", pid, status, process.name)?;
    }
    Ok(())
}
