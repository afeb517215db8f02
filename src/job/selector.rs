//! Current/previous job selection policy (§4.2).
//!
//! Implemented as free functions over a `JobTable`'s slots so the policy
//! can be exercised in isolation from the rest of the table's CRUD
//! operations (see `find_next` tests below, which correspond to T6).

use super::record::{Job, JobState};

/// Selects a job number for current/previous, excluding `excluding`:
/// prefer Stopped jobs, tie-break on the largest index; otherwise any
/// other job, again preferring the largest index; otherwise 0.
pub fn find_next(slots: &[Option<Job>], excluding: usize) -> usize {
    let candidates = || {
        slots
            .iter()
            .enumerate()
            .skip(1)
            .filter(move |(n, job)| *n != excluding && job.is_some())
    };

    if let Some((n, _)) = candidates()
        .filter(|(_, job)| job.as_ref().unwrap().state == JobState::Stopped)
        .max_by_key(|(n, _)| *n)
    {
        return n;
    }

    candidates().max_by_key(|(n, _)| *n).map(|(n, _)| n).unwrap_or(0)
}

/// `set_current(n)` per §4.2. `n == 0` means "promote previous, or pick
/// one"; otherwise `n` must name an extant job.
pub fn set_current(slots: &[Option<Job>], current: &mut usize, previous: &mut usize, n: usize) {
    let old_current = *current;
    *previous = old_current;

    let mut new_current = n;
    if new_current == 0 {
        new_current = *previous;
        let extant = slots.get(new_current).is_some_and(Option::is_some);
        if new_current == 0 || !extant {
            new_current = find_next(slots, 0);
        }
    }
    *current = new_current;

    if *previous == 0 || *previous == *current {
        *previous = find_next(slots, *current);
    }
}

/// Adjusts current/previous after `remove(n)` per §4.2.
pub fn on_remove(slots: &[Option<Job>], current: &mut usize, previous: &mut usize, removed: usize) {
    if removed == *current {
        *current = *previous;
        *previous = find_next(slots, *current);
    } else if removed == *previous {
        *previous = find_next(slots, *current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::process::ProcessRecord;
    use nix::sys::signal::Signal;
    use nix::sys::wait::WaitStatus;
    use nix::unistd::Pid;

    fn running_job() -> Option<Job> {
        Some(Job::new(vec![ProcessRecord::forked(Pid::from_raw(1), "sleep 10")], false))
    }

    fn stopped_job() -> Option<Job> {
        let mut p = ProcessRecord::forked(Pid::from_raw(2), "vi");
        p.apply_wait_status(WaitStatus::Stopped(Pid::from_raw(2), Signal::SIGTSTP));
        Some(Job::new(vec![p], false))
    }

    fn slots(entries: Vec<Option<Job>>) -> Vec<Option<Job>> {
        let mut v = vec![None];
        v.extend(entries);
        v
    }

    #[test]
    fn find_next_never_returns_excluded_or_missing() {
        let slots = slots(vec![running_job(), None, running_job()]);
        let n = find_next(&slots, 1);
        assert_ne!(n, 1);
        assert!(slots[n].is_some());
    }

    #[test]
    fn find_next_prefers_stopped_over_running() {
        let slots = slots(vec![running_job(), stopped_job(), running_job()]);
        assert_eq!(find_next(&slots, 0), 2);
    }

    #[test]
    fn find_next_prefers_largest_index_among_equals() {
        let slots = slots(vec![stopped_job(), stopped_job(), stopped_job()]);
        assert_eq!(find_next(&slots, 0), 3);
    }

    #[test]
    fn find_next_falls_back_to_any_job() {
        let slots = slots(vec![running_job(), None]);
        assert_eq!(find_next(&slots, 0), 1);
    }

    #[test]
    fn find_next_returns_zero_when_nothing_left() {
        let slots = slots(vec![running_job()]);
        assert_eq!(find_next(&slots, 1), 0);
    }

    #[test]
    fn set_current_zero_promotes_previous() {
        let slots = slots(vec![running_job(), running_job()]);
        let mut current = 1;
        let mut previous = 2;
        set_current(&slots, &mut current, &mut previous, 0);
        assert_eq!(current, 2);
        assert_eq!(previous, 1);
    }

    #[test]
    fn set_current_explicit_demotes_old_current_to_previous() {
        let slots = slots(vec![running_job(), running_job(), running_job()]);
        let mut current = 1;
        let mut previous = 0;
        set_current(&slots, &mut current, &mut previous, 3);
        assert_eq!(current, 3);
        assert_eq!(previous, 1);
    }

    #[test]
    fn on_remove_current_promotes_previous_and_refills_previous() {
        let slots = slots(vec![running_job(), stopped_job(), running_job(), stopped_job()]);
        let mut current = 3;
        let mut previous = 4;
        on_remove(&slots, &mut current, &mut previous, 3);
        assert_eq!(current, 4);
        assert_eq!(previous, 2);
    }

    #[test]
    fn on_remove_previous_refills_from_find_next() {
        let slots = slots(vec![running_job(), stopped_job(), running_job()]);
        let mut current = 3;
        let mut previous = 2;
        on_remove(&slots, &mut current, &mut previous, 2);
        assert_eq!(current, 3);
        assert_eq!(previous, 2);
    }

    #[test]
    fn on_remove_unrelated_job_leaves_labels_unchanged() {
        let slots = slots(vec![running_job(), stopped_job(), running_job()]);
        let mut current = 3;
        let mut previous = 2;
        on_remove(&slots, &mut current, &mut previous, 1);
        assert_eq!(current, 3);
        assert_eq!(previous, 2);
    }
}
