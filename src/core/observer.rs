use super::state::{SimCtx, TaskState, Ticks};

/// Checks run-state invariants after every step and tallies where the
/// clock went.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    busy_ticks: Ticks,
    idle_ticks: Ticks,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    /// `ran` is the slice charged this step, `None` for an idle tick.
    pub fn observe(&mut self, ctx: &SimCtx, ran: Option<Ticks>) {
        self.step += 1;
        match ran {
            Some(slice) => self.busy_ticks += slice,
            None => {
                self.idle_ticks += 1;
                debug_assert!(
                    ctx.task_to_dsq.is_empty(),
                    "CPU idle at t={} with runnable tasks queued",
                    ctx.now
                );
            }
        }

        debug_assert_eq!(
            self.busy_ticks + self.idle_ticks,
            ctx.now,
            "Every tick must be either busy or idle"
        );
        debug_assert_eq!(
            ctx.tasks.len() + ctx.finished.len(),
            ctx.population(),
            "Tasks lost or duplicated"
        );

        for (task_id, task) in &ctx.tasks {
            let process = &task.process;
            debug_assert!(
                process.remaining >= 1 && process.remaining <= process.burst,
                "Task {task_id:?} has {} of {} ticks left",
                process.remaining,
                process.burst
            );
            match task.state {
                TaskState::Pending => debug_assert!(
                    !ctx.task_in_any_dsq(task_id),
                    "Pending task {task_id:?} must not be enqueued"
                ),
                TaskState::Runnable => debug_assert!(
                    ctx.task_in_any_dsq(task_id),
                    "Runnable task {task_id:?} missing from every DSQ"
                ),
                TaskState::Running | TaskState::Completed => debug_assert!(
                    false,
                    "Task {task_id:?} left in state {:?} between steps",
                    task.state
                ),
            }
        }

        for (&task_id, &dsq_id) in &ctx.task_to_dsq {
            if let Some(dsq) = ctx.dsqs.get(dsq_id) {
                debug_assert!(
                    dsq.contains(task_id),
                    "task_to_dsq claims task {task_id:?} in DSQ {dsq_id:?}, but queue does not contain it"
                );
            } else {
                debug_assert!(false, "task_to_dsq references unknown DSQ {dsq_id:?}");
            }
        }

        for task in &ctx.finished {
            debug_assert!(
                task.state == TaskState::Completed && task.process.is_finished(),
                "Finished task {:?} is not complete",
                task.id
            );
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn busy_ticks(&self) -> Ticks {
        self.busy_ticks
    }

    pub fn idle_ticks(&self) -> Ticks {
        self.idle_ticks
    }
}
