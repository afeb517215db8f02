//! Signal primitives the job-control core consumes: blocking/unblocking
//! SIGCHLD+SIGHUP, an atomic "sleep until SIGCHLD" primitive, and
//! signal-to-name lookup.
//!
//! The teacher repo drives its signal handling through a `signal_hook`
//! background thread that flips flags for a poll loop to notice and
//! manually forwards terminal-generated signals (SIGINT/SIGTSTP/...) to a
//! tracked foreground process group. That whole relay exists to serve
//! terminal/trap signal forwarding, which this crate's scope excludes
//! (process-group creation and `tcsetpgrp` terminal handoff are named
//! Non-goals of the job-control core, and it does not reimplement a
//! general `trap` facility); there is nothing left here for a
//! `signal_hook`-style async relay to do, so it is dropped as a
//! dependency (see DESIGN.md). What remains is SIGCHLD and SIGHUP
//! delivery to the shell itself, which only needs a race-free
//! block-then-sleep: the caller blocks both signals up front, and
//! `wait_for_sigchld` uses `sigwait(2)` (via `nix`) to atomically consume
//! one pending occurrence without ever unblocking them -- a signal raised
//! between the caller's state check and this call is already pending in
//! the kernel, so it cannot be lost the way it could with a handler-based
//! design.

use nix::sys::signal::{SigSet, Signal};

fn chld_and_hup_set() -> SigSet {
    let mut set = SigSet::empty();
    set.add(Signal::SIGCHLD);
    set.add(Signal::SIGHUP);
    set
}

/// Blocks SIGCHLD and SIGHUP for the calling thread.
pub fn block_sigchld_and_sighup() -> nix::Result<()> {
    chld_and_hup_set().thread_block()
}

/// Unblocks SIGCHLD and SIGHUP for the calling thread.
pub fn unblock_sigchld_and_sighup() -> nix::Result<()> {
    chld_and_hup_set().thread_unblock()
}

/// Blocks until SIGCHLD or SIGHUP is pending and consumes it. The caller
/// must have already blocked both signals (`block_sigchld_and_sighup`)
/// before calling this -- `sigwait(2)` requires it.
pub fn wait_for_sigchld() -> nix::Result<Signal> {
    chld_and_hup_set().wait()
}

/// Translates a signal to its symbolic name, e.g. `SIGTSTP` -> `TSTP`.
pub fn signal_name(signal: Signal) -> &'static str {
    signal.as_str().trim_start_matches("SIG")
}
