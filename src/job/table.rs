use super::record::Job;
use super::selector;

/// Capacity above which an underused table is shrunk back down; a
/// memory-reclamation hint, not part of the observable contract.
const SHRINK_CAPACITY_THRESHOLD: usize = 20;

/// Sparse, indexed collection of jobs. Index 0 is reserved for the
/// "active" slot: the job under construction by the launcher, invisible
/// to job numbers and counts. Indices 1.. are user-visible job numbers.
pub struct JobTable {
    slots: Vec<Option<Job>>,
    current_jobnumber: usize,
    previous_jobnumber: usize,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

impl JobTable {
    /// Creates a table with the active slot present and empty.
    pub fn new() -> Self {
        Self {
            slots: vec![None],
            current_jobnumber: 0,
            previous_jobnumber: 0,
        }
    }

    pub fn current_jobnumber(&self) -> usize {
        self.current_jobnumber
    }

    pub fn previous_jobnumber(&self) -> usize {
        self.previous_jobnumber
    }

    /// Parks `job` in the active slot. Panics if the slot is already
    /// occupied -- the launcher must `add_job` (or discard) before
    /// starting another pipeline.
    pub fn set_active(&mut self, job: Job) {
        assert!(self.slots[0].is_none(), "set_active called with the active slot occupied");
        self.slots[0] = Some(job);
    }

    /// True if a job is currently parked in the active slot.
    pub fn has_active(&self) -> bool {
        self.slots[0].is_some()
    }

    /// Moves the job out of the active slot into the lowest free index
    /// >= 1 (appending if none is free), then updates current/previous.
    /// Returns the assigned job number.
    ///
    /// Panics if the active slot is empty.
    pub fn add_job(&mut self, make_current: bool) -> usize {
        let job = self.slots[0].take().expect("add_job called with no active job");

        let index = (1..self.slots.len())
            .find(|&i| self.slots[i].is_none())
            .unwrap_or(self.slots.len());
        if index == self.slots.len() {
            self.slots.push(None);
        }
        self.slots[index] = Some(job);

        if make_current || self.current_jobnumber == 0 {
            selector::set_current(&self.slots, &mut self.current_jobnumber, &mut self.previous_jobnumber, index);
        } else if self.previous_jobnumber == 0 {
            self.previous_jobnumber = index;
        }

        index
    }

    pub fn get(&self, n: usize) -> Option<&Job> {
        self.slots.get(n).and_then(|s| s.as_ref())
    }

    pub fn get_mut(&mut self, n: usize) -> Option<&mut Job> {
        self.slots.get_mut(n).and_then(|s| s.as_mut())
    }

    /// Clears slot `n`, compacts trailing empty slots, and updates
    /// current/previous. No-op if `n` is already empty or out of range.
    pub fn remove(&mut self, n: usize) -> Option<Job> {
        if n == 0 || n >= self.slots.len() {
            return None;
        }
        let removed = self.slots[n].take()?;

        let tail = self.slots.iter().rposition(Option::is_some).unwrap_or(0);
        self.slots.truncate(tail + 1);
        if self.slots.capacity() > SHRINK_CAPACITY_THRESHOLD && self.slots.len() * 2 < self.slots.capacity() {
            self.slots.shrink_to(self.slots.len());
        }

        selector::on_remove(&self.slots, &mut self.current_jobnumber, &mut self.previous_jobnumber, n);

        Some(removed)
    }

    /// Clears every slot and zeroes current/previous.
    ///
    /// `remove(i)` already re-derives current/previous as jobs disappear,
    /// so the explicit zeroing below is redundant given a full sweep --
    /// but it is kept regardless, rather than relied-upon-implicitly, per
    /// the open question in the design notes.
    pub fn remove_all(&mut self) {
        for n in 1..self.slots.len() {
            self.slots[n] = None;
        }
        self.slots.truncate(1);
        self.current_jobnumber = 0;
        self.previous_jobnumber = 0;
    }

    pub fn count(&self) -> usize {
        self.slots.iter().skip(1).filter(|s| s.is_some()).count()
    }

    pub fn stopped_count(&self) -> usize {
        self.jobnumbers()
            .filter(|&n| self.get(n).unwrap().state == super::record::JobState::Stopped)
            .count()
    }

    /// Ascending iterator of occupied job numbers (index 0 excluded).
    pub fn jobnumbers(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, s)| s.is_some())
            .map(|(n, _)| n)
    }

    /// Re-derives current/previous after an external state change (e.g.
    /// `bg` on the current or previous job, per P3). `n == 0` re-picks
    /// using the existing policy without forcing a specific job current.
    pub fn set_current(&mut self, n: usize) {
        selector::set_current(&self.slots, &mut self.current_jobnumber, &mut self.previous_jobnumber, n);
    }
}
