use std::marker::PhantomData;

use super::{Order, SchedParams, Scheduler, SimCtx, TaskId, Ticks};
use crate::core::state::DsqId;

/// How a [`PriqScheduler`] ranks ready tasks and how long it lets one run.
pub trait Discipline {
    const ORDER: Order;
    /// Preemptive disciplines reselect after every tick.
    const PREEMPTIVE: bool;
}

/// Ready set kept in a keyed priority queue ordered by `D::ORDER`.
///
/// A task's key is computed when it is enqueued. Preemptive disciplines
/// re-enqueue the running task after each tick, which refreshes its key, so
/// shortest-remaining-time sees the decremented `remaining`.
pub struct PriqScheduler<D: Discipline> {
    dsq: DsqId,
    _discipline: PhantomData<D>,
}

impl<D: Discipline> Scheduler for PriqScheduler<D> {
    fn init(ctx: &mut SimCtx, _params: &SchedParams) -> Self {
        Self {
            dsq: ctx.create_dsq_priq(D::ORDER),
            _discipline: PhantomData,
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, task: TaskId) {
        ctx.dsq_push(self.dsq, task);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<TaskId> {
        ctx.dsq_pop(self.dsq)
    }

    fn slice(&self, ctx: &SimCtx, task: TaskId) -> Ticks {
        if D::PREEMPTIVE {
            1
        } else {
            ctx.task(task).process.remaining
        }
    }
}

pub enum ByPriority {}
pub enum ByBurst {}
pub enum ByPriorityPreempt {}
pub enum ByRemaining {}

impl Discipline for ByPriority {
    const ORDER: Order = Order::Priority;
    const PREEMPTIVE: bool = false;
}

// Nothing has run at dispatch time, so remaining equals burst
impl Discipline for ByBurst {
    const ORDER: Order = Order::Remaining;
    const PREEMPTIVE: bool = false;
}

impl Discipline for ByPriorityPreempt {
    const ORDER: Order = Order::Priority;
    const PREEMPTIVE: bool = true;
}

impl Discipline for ByRemaining {
    const ORDER: Order = Order::Remaining;
    const PREEMPTIVE: bool = true;
}

pub type NonPreemptivePriority = PriqScheduler<ByPriority>;
pub type NonPreemptiveSjf = PriqScheduler<ByBurst>;
pub type PreemptivePriority = PriqScheduler<ByPriorityPreempt>;
pub type PreemptiveSjf = PriqScheduler<ByRemaining>;
