//! `%jobspec` resolution: translates the argument users type to `fg`,
//! `bg`, `wait`, and `kill` into a job number.
//!
//! Grammar: `%%`, `%+`, bare `%` (current job); `%-` (previous job); `%n`
//! or bare `n` (job number `n`); `%string` (unique prefix of a job's
//! display name); `%?string` (unique substring of a job's display name).

use crate::error::JobControlError;

use super::format::job_display_name;
use super::table::JobTable;

pub fn parse_job_spec(table: &JobTable, spec: &str) -> Result<usize, JobControlError> {
    let body = spec.strip_prefix('%').unwrap_or(spec);

    if spec.starts_with('%') {
        if body.is_empty() || body == "%" || body == "+" {
            return current_job(table);
        }
        if body == "-" {
            return previous_job(table);
        }
        if let Some(needle) = body.strip_prefix('?') {
            return by_predicate(table, needle, "Invalid job specification", |a, b| a.contains(b));
        }
        if let Ok(n) = body.parse::<usize>() {
            return by_number(table, n);
        }
        return by_predicate(table, body, "Invalid job specification", |a, b| a.starts_with(b));
    }

    match spec.parse::<usize>() {
        Ok(n) => by_number(table, n),
        Err(_) => Err(JobControlError::NoSuchJob(spec.to_string())),
    }
}

fn current_job(table: &JobTable) -> Result<usize, JobControlError> {
    let n = table.current_jobnumber();
    if n == 0 || table.get(n).is_none() {
        return Err(JobControlError::NoSuchJob("%%: no current job".to_string()));
    }
    Ok(n)
}

fn previous_job(table: &JobTable) -> Result<usize, JobControlError> {
    let n = table.previous_jobnumber();
    if n == 0 || table.get(n).is_none() {
        return Err(JobControlError::NoSuchJob("%-: no previous job".to_string()));
    }
    Ok(n)
}

fn by_number(table: &JobTable, n: usize) -> Result<usize, JobControlError> {
    if table.get(n).is_some() {
        Ok(n)
    } else {
        Err(JobControlError::NoSuchJob(format!("%{}", n)))
    }
}

fn by_predicate(
    table: &JobTable,
    needle: &str,
    empty_needle_msg: &str,
    matches: fn(&str, &str) -> bool,
) -> Result<usize, JobControlError> {
    if needle.is_empty() {
        return Err(JobControlError::NoSuchJob(empty_needle_msg.to_string()));
    }
    let mut hits: Vec<usize> = table
        .jobnumbers()
        .filter(|&n| matches(&job_display_name(table.get(n).unwrap()), needle))
        .collect();
    hits.sort_unstable();
    match hits.len() {
        0 => Err(JobControlError::NoSuchJob(format!("%{}", needle))),
        1 => Ok(hits[0]),
        _ => Err(JobControlError::AmbiguousJobSpec(format!("%{}", needle))),
    }
}
