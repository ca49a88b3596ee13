use std::num::NonZeroU64;

use super::{Order, SchedParams, Scheduler, SimCtx, TaskId, Ticks};
use crate::core::state::DsqId;

/// Round-robin over the effective arrival order.
///
/// A task stopped with work left is re-stamped with `ready_since = now`, which
/// puts it behind everything already ready. Tasks arriving at that same tick
/// are ordered against it by pid. Waiting time still uses the original
/// `arrival`.
pub struct RoundRobinScheduler {
    dsq: DsqId,
    quantum: NonZeroU64,
}

impl Scheduler for RoundRobinScheduler {
    fn init(ctx: &mut SimCtx, params: &SchedParams) -> Self {
        Self {
            dsq: ctx.create_dsq_priq(Order::Arrival),
            quantum: params.quantum,
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, task: TaskId) {
        ctx.dsq_push(self.dsq, task);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<TaskId> {
        ctx.dsq_pop(self.dsq)
    }

    fn slice(&self, ctx: &SimCtx, task: TaskId) -> Ticks {
        self.quantum.get().min(ctx.task(task).process.remaining)
    }

    fn stopping(&mut self, ctx: &mut SimCtx, task: TaskId) {
        let now = ctx.now;
        ctx.task_mut(task).process.ready_since = now;
    }
}
