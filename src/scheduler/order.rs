//! Orderings used to pick a process out of the ready set.
//!
//! All three fall back to effective arrival, then pid. The effective arrival
//! is `ready_since`, which equals `arrival` for every policy except
//! round-robin.

use std::cmp::Ordering;

use crate::core::state::Ticks;
use crate::sim::{Pid, Process};

/// `ready_since` asc, then `pid` asc.
pub fn by_arrival(a: &Process, b: &Process) -> Ordering {
    a.ready_since
        .cmp(&b.ready_since)
        .then_with(|| a.pid.cmp(&b.pid))
}

/// `remaining` asc, then [`by_arrival`].
pub fn by_remaining(a: &Process, b: &Process) -> Ordering {
    a.remaining
        .cmp(&b.remaining)
        .then_with(|| by_arrival(a, b))
}

/// `priority` asc (smaller is more urgent), then [`by_arrival`].
pub fn by_priority(a: &Process, b: &Process) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| by_arrival(a, b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Arrival,
    Remaining,
    Priority,
}

/// Materialised form of an [`Order`] for one process, so queues can store it.
///
/// `seq` is the process's position in the workload; it only matters when two
/// processes share a pid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SortKey {
    rank: i128,
    since: Ticks,
    pid: Pid,
    seq: usize,
}

impl Order {
    pub fn compare(self, a: &Process, b: &Process) -> Ordering {
        match self {
            Order::Arrival => by_arrival(a, b),
            Order::Remaining => by_remaining(a, b),
            Order::Priority => by_priority(a, b),
        }
    }

    pub fn key(self, process: &Process, seq: usize) -> SortKey {
        let rank = match self {
            Order::Arrival => 0,
            Order::Remaining => i128::from(process.remaining),
            Order::Priority => i128::from(process.priority),
        };
        SortKey {
            rank,
            since: process.ready_since,
            pid: process.pid,
            seq,
        }
    }
}
