pub mod fifo;
pub mod order;
pub mod priq;
pub mod round_robin;

use std::fmt;
use std::num::NonZeroU64;

use crate::core::state::{SimCtx, TaskId, Ticks};
pub use fifo::FifoScheduler;
pub use order::{Order, by_arrival, by_priority, by_remaining};
pub use priq::{
    NonPreemptivePriority, NonPreemptiveSjf, PreemptivePriority, PreemptiveSjf, PriqScheduler,
};
pub use round_robin::RoundRobinScheduler;

/// Parameters every scheduler is initialised with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedParams {
    /// Round-robin time slice.
    pub quantum: NonZeroU64,
}

impl SchedParams {
    pub fn new(quantum: NonZeroU64) -> Self {
        Self { quantum }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    Fcfs,
    NonPreemptivePriority,
    NonPreemptiveSjf,
    PreemptivePriority,
    PreemptiveSjf,
    RoundRobin,
}

impl Policy {
    /// Every policy, in the order results are reported.
    pub const ALL: [Policy; 6] = [
        Policy::Fcfs,
        Policy::NonPreemptivePriority,
        Policy::NonPreemptiveSjf,
        Policy::PreemptivePriority,
        Policy::PreemptiveSjf,
        Policy::RoundRobin,
    ];

    /// Report label. The spelling is fixed by downstream consumers.
    pub fn label(self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::NonPreemptivePriority => "NonPreemtive priority",
            Policy::NonPreemptiveSjf => "NonPreemtive SJF",
            Policy::PreemptivePriority => "Preemtive priority",
            Policy::PreemptiveSjf => "Preemtive SJF",
            Policy::RoundRobin => "RoundRobin",
        }
    }

    pub fn is_preemptive(self) -> bool {
        matches!(
            self,
            Policy::PreemptivePriority | Policy::PreemptiveSjf | Policy::RoundRobin
        )
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Policy::Fcfs => "fcfs",
            Policy::NonPreemptivePriority => "np-priority",
            Policy::NonPreemptiveSjf => "np-sjf",
            Policy::PreemptivePriority => "p-priority",
            Policy::PreemptiveSjf => "srtf",
            Policy::RoundRobin => "rr",
        };
        f.write_str(name)
    }
}

/// A ready-queue discipline driven by [`crate::core::SchedCore`].
///
/// The core hands every task that becomes ready to [`Scheduler::enqueue`],
/// asks [`Scheduler::dispatch`] for the next one to run, charges it
/// [`Scheduler::slice`] ticks and, if it still has work left, calls
/// [`Scheduler::stopping`] before enqueueing it again.
pub trait Scheduler {
    fn init(ctx: &mut SimCtx, params: &SchedParams) -> Self;

    fn enqueue(&mut self, ctx: &mut SimCtx, task: TaskId);

    /// `None` leaves the CPU idle for one tick.
    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<TaskId>;

    fn slice(&self, ctx: &SimCtx, task: TaskId) -> Ticks;

    fn stopping(&mut self, _ctx: &mut SimCtx, _task: TaskId) {}
}
