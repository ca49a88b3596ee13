use super::{SchedParams, Scheduler, SimCtx, TaskId, Ticks};
use crate::core::state::DsqId;

/// First-come-first-served. Arrivals are enqueued in arrival order, so the
/// head of the queue is always the earliest arrived task; it runs to
/// completion.
pub struct FifoScheduler {
    dsq: DsqId,
}

impl Scheduler for FifoScheduler {
    fn init(ctx: &mut SimCtx, _params: &SchedParams) -> Self {
        Self {
            dsq: ctx.create_dsq_fifo(),
        }
    }

    fn enqueue(&mut self, ctx: &mut SimCtx, task: TaskId) {
        ctx.dsq_push(self.dsq, task);
    }

    fn dispatch(&mut self, ctx: &mut SimCtx) -> Option<TaskId> {
        ctx.dsq_pop(self.dsq)
    }

    fn slice(&self, ctx: &SimCtx, task: TaskId) -> Ticks {
        ctx.task(task).process.remaining
    }
}
