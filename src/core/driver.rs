use super::{
    event::SimEvent,
    observer::Observer,
    state::{SimCtx, TaskId},
};
use crate::scheduler::{SchedParams, Scheduler};
use crate::sim::Workload;

/// One policy run over a private copy of a workload.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(workload: &Workload, params: &SchedParams) -> Self {
        let mut ctx = SimCtx::load(workload);
        let scheduler = S::init(&mut ctx, params);
        Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.ctx.is_drained()
    }

    /// One iteration of the loop: admit arrivals, then either idle for a
    /// tick or run the dispatched task for its slice.
    pub fn step(&mut self) -> Vec<SimEvent> {
        let mut events = Vec::new();
        self.handle_arrivals(&mut events);

        let Some(task) = self.scheduler.dispatch(&mut self.ctx) else {
            self.ctx.advance_time(1);
            events.push(SimEvent::Idle);
            self.observer.observe(&self.ctx, None);
            return events;
        };

        let slice = self.scheduler.slice(&self.ctx, task);
        let pid = self.ctx.task(task).process.pid;
        self.ctx.set_running(task);
        self.ctx.charge(task, slice);
        events.push(SimEvent::Dispatch { pid, slice });

        if self.ctx.task(task).process.is_finished() {
            let wait = self.ctx.mark_completed(task);
            events.push(SimEvent::Complete { pid, wait });
        } else {
            self.requeue(task);
            events.push(SimEvent::Requeue { pid });
        }

        self.observer.observe(&self.ctx, Some(slice));
        events
    }

    /// Step until every task has completed.
    pub fn run(&mut self) {
        while !self.is_done() {
            self.step();
        }
    }

    fn handle_arrivals(&mut self, events: &mut Vec<SimEvent>) {
        for task in self.ctx.take_arrivals() {
            events.push(SimEvent::Arrive {
                pid: self.ctx.task(task).process.pid,
            });
            self.scheduler.enqueue(&mut self.ctx, task);
        }
    }

    fn requeue(&mut self, task: TaskId) {
        self.ctx.mark_runnable(task);
        self.scheduler.stopping(&mut self.ctx, task);
        self.scheduler.enqueue(&mut self.ctx, task);
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}
