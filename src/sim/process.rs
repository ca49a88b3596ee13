use crate::core::state::Ticks;

pub type Pid = i64;
pub type Priority = i64;

/// One process of a workload.
///
/// `pid`, `arrival`, `burst` and `priority` describe the process and are never
/// touched by a simulation. `remaining` and `ready_since` are per-run scratch:
/// a fresh copy starts with `remaining == burst` and `ready_since == arrival`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    /// Smaller value means higher priority.
    pub priority: Priority,
    pub remaining: Ticks,
    /// Effective arrival used for ordering. Round-robin moves it to the
    /// time a preempted process went back to the ready queue.
    pub ready_since: Ticks,
}

impl Process {
    pub fn new(pid: Pid, arrival: Ticks, burst: Ticks, priority: Priority) -> Self {
        Self {
            pid,
            arrival,
            burst,
            priority,
            remaining: burst,
            ready_since: arrival,
        }
    }

    /// Copy of the descriptor with the scratch fields reset.
    pub fn fresh(&self) -> Self {
        Self::new(self.pid, self.arrival, self.burst, self.priority)
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}
