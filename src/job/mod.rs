//! Job-control core: process/job records, the job table and its
//! current/previous selection policy, the non-blocking reaper, the
//! race-free waiter, and status formatting/printing.

pub mod format;
pub mod jobspec;
pub mod printer;
pub mod process;
pub mod reaper;
pub mod record;
pub mod selector;
pub mod table;
pub mod waiter;

pub use jobspec::parse_job_spec;
pub use printer::{print_job_status, JobSelector};
pub use process::{ProcessId, ProcessRecord, ProcessState};
pub use reaper::do_wait;
pub use record::{Job, JobState, TERMSIG_OFFSET};
pub use table::JobTable;
pub use waiter::wait_for_job;
