use keyed_priority_queue::KeyedPriorityQueue;
use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};
use std::cmp::Ordering;
use std::collections::VecDeque;

use crate::scheduler::order::{Order, SortKey};
use crate::sim::{Process, Workload};

pub type Ticks = u64;
new_key_type! {
    pub struct TaskId;
    pub struct DsqId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Not arrived yet
    Pending,
    Runnable,
    Running,
    Completed,
}

/// A process of the working copy plus the bookkeeping of one run.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: TaskId,
    // Position in the workload
    pub seq: usize,
    pub process: Process,
    pub state: TaskState,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Task {
    /// `completion - arrival - burst`, once the task has completed.
    pub fn wait(&self) -> Option<Ticks> {
        self.completion_time
            .map(|done| done - self.process.arrival - self.process.burst)
    }
}

// KeyedPriorityQueue is a max-heap, so flip SortKey's Ord to pop the smallest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinKey(pub SortKey);

impl PartialOrd for MinKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

#[derive(Debug)]
pub enum Dsq {
    Fifo {
        tasks: VecDeque<TaskId>,
    },
    Priq {
        order: Order,
        tasks: KeyedPriorityQueue<TaskId, MinKey>,
    },
}

impl Dsq {
    pub fn new_fifo() -> Self {
        Self::Fifo {
            tasks: VecDeque::new(),
        }
    }

    pub fn new_priq(order: Order) -> Self {
        Self::Priq {
            order,
            tasks: KeyedPriorityQueue::new(),
        }
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        match self {
            Self::Fifo { tasks } => tasks.contains(&task_id),
            Self::Priq { tasks, .. } => tasks.get_priority(&task_id).is_some(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Fifo { tasks } => tasks.len(),
            Self::Priq { tasks, .. } => tasks.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// State of one policy run: the clock, the working copy of the workload and
/// the dispatch queues the scheduler created.
#[derive(Debug)]
pub struct SimCtx {
    pub now: Ticks,
    pub tasks: SlotMap<TaskId, Task>,
    pub finished: Vec<Task>,
    pub dsqs: SlotMap<DsqId, Dsq>,
    pub task_to_dsq: FxHashMap<TaskId, DsqId>,

    // Tasks that have not arrived, earliest first
    pending: VecDeque<TaskId>,
    population: usize,
}

impl SimCtx {
    /// Build the run state from a deep copy of `workload`.
    pub fn load(workload: &Workload) -> Self {
        let mut tasks = SlotMap::with_capacity_and_key(workload.len());
        let mut arrivals = Vec::with_capacity(workload.len());

        for (seq, process) in workload.deep_copy().into_iter().enumerate() {
            let key = Order::Arrival.key(&process, seq);
            let id = tasks.insert_with_key(|id| Task {
                id,
                seq,
                process,
                state: TaskState::Pending,
                first_run: None,
                completion_time: None,
            });
            arrivals.push((key, id));
        }
        arrivals.sort_unstable_by_key(|&(key, _)| key);

        Self {
            now: 0,
            population: tasks.len(),
            tasks,
            finished: Vec::with_capacity(workload.len()),
            dsqs: SlotMap::with_key(),
            task_to_dsq: FxHashMap::default(),
            pending: arrivals.into_iter().map(|(_, id)| id).collect(),
        }
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self
            .now
            .checked_add(delta)
            .expect("Simulated clock overflowed");
    }

    /// Number of processes the run started with.
    pub fn population(&self) -> usize {
        self.population
    }

    pub fn is_drained(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn create_dsq_fifo(&mut self) -> DsqId {
        self.dsqs.insert(Dsq::new_fifo())
    }

    pub fn create_dsq_priq(&mut self, order: Order) -> DsqId {
        self.dsqs.insert(Dsq::new_priq(order))
    }

    pub fn dsq_push(&mut self, dsq_id: DsqId, task_id: TaskId) {
        assert!(
            !self.task_to_dsq.contains_key(&task_id),
            "Task {task_id:?} already present in some DSQ"
        );

        let task = &self.tasks[task_id];
        debug_assert_eq!(
            task.state,
            TaskState::Runnable,
            "Task {task_id:?} must be Runnable when enqueued"
        );

        let dsq = self.dsqs.get_mut(dsq_id).expect("Unknown DSQ");
        match dsq {
            Dsq::Fifo { tasks } => tasks.push_back(task_id),
            Dsq::Priq { order, tasks } => {
                tasks.push(task_id, MinKey(order.key(&task.process, task.seq)));
            }
        };

        self.task_to_dsq.insert(task_id, dsq_id);
    }

    pub fn dsq_pop(&mut self, dsq_id: DsqId) -> Option<TaskId> {
        let dsq = self.dsqs.get_mut(dsq_id)?;
        let task = match dsq {
            Dsq::Fifo { tasks } => tasks.pop_front(),
            Dsq::Priq { tasks, .. } => tasks.pop().map(|t| t.0),
        }?;

        let removed = self.task_to_dsq.remove(&task);
        debug_assert!(removed.is_some(), "Task {task:?} missing DSQ membership");

        Some(task)
    }

    pub fn task_in_any_dsq(&self, task_id: TaskId) -> bool {
        self.task_to_dsq.contains_key(&task_id)
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    /// Move every pending task whose arrival is `<= now` to Runnable and
    /// return them in arrival order.
    pub fn take_arrivals(&mut self) -> Vec<TaskId> {
        let mut arrived = Vec::new();
        while let Some(&task_id) = self.pending.front() {
            let task = &mut self.tasks[task_id];
            if task.process.ready_since > self.now {
                break;
            }
            task.state = TaskState::Runnable;
            self.pending.pop_front();
            arrived.push(task_id);
        }
        arrived
    }

    pub fn set_running(&mut self, task_id: TaskId) {
        debug_assert!(
            !self.task_to_dsq.contains_key(&task_id),
            "Running task {task_id:?} must not be enqueued"
        );

        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert_eq!(task.state, TaskState::Runnable);
        task.state = TaskState::Running;
        task.first_run.get_or_insert(now);
    }

    /// Run `task_id` for `slice` ticks.
    pub fn charge(&mut self, task_id: TaskId, slice: Ticks) {
        let task = self.task_mut(task_id);
        assert_eq!(task.state, TaskState::Running, "Charging a task that is not running");
        assert!(
            slice >= 1 && slice <= task.process.remaining,
            "Slice {slice} out of range for task {task_id:?} with {} ticks left",
            task.process.remaining
        );
        task.process.remaining -= slice;
        self.advance_time(slice);
    }

    pub fn mark_runnable(&mut self, task_id: TaskId) {
        let task = self.task_mut(task_id);
        debug_assert!(
            !task.process.is_finished(),
            "Finished task {task_id:?} cannot be runnable"
        );
        task.state = TaskState::Runnable;
    }

    /// Retire `task_id` into the finished set and return its waiting time.
    pub fn mark_completed(&mut self, task_id: TaskId) -> Ticks {
        debug_assert!(
            !self.task_to_dsq.contains_key(&task_id),
            "Completing task {task_id:?} that is still enqueued"
        );

        let mut task = self
            .tasks
            .remove(task_id)
            .expect("Completed task missing from task table");
        debug_assert!(
            task.state == TaskState::Running && task.process.is_finished(),
            "Task {task_id:?} must have been running to its last tick"
        );

        task.state = TaskState::Completed;
        task.completion_time = Some(self.now);
        let wait = task.wait().expect("completion time was just set");
        self.finished.push(task);
        wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workload() -> Workload {
        Workload::new(vec![
            Process::new(3, 2, 8, 4),
            Process::new(1, 0, 5, 2),
            Process::new(4, 2, 6, 3),
            Process::new(2, 1, 3, 1),
        ])
    }

    fn pids(ctx: &SimCtx, ids: &[TaskId]) -> Vec<i64> {
        ids.iter().map(|&id| ctx.task(id).process.pid).collect()
    }

    #[test]
    fn arrivals_come_out_in_arrival_order() {
        let mut ctx = SimCtx::load(&workload());
        assert_eq!(ctx.population(), 4);

        let first = ctx.take_arrivals();
        assert_eq!(pids(&ctx, &first), vec![1]);

        ctx.advance_time(2);
        let rest = ctx.take_arrivals();
        assert_eq!(pids(&ctx, &rest), vec![2, 3, 4]);
        assert_eq!(ctx.pending_len(), 0);
        assert!(ctx.take_arrivals().is_empty());
    }

    #[test]
    fn priq_pops_smallest_key() {
        let mut ctx = SimCtx::load(&workload());
        let dsq = ctx.create_dsq_priq(Order::Priority);
        ctx.advance_time(5);
        for id in ctx.take_arrivals() {
            ctx.dsq_push(dsq, id);
        }
        assert_eq!(ctx.dsqs[dsq].len(), 4);

        let mut order = Vec::new();
        while let Some(id) = ctx.dsq_pop(dsq) {
            assert!(!ctx.task_in_any_dsq(id));
            order.push(ctx.task(id).process.pid);
        }
        assert_eq!(order, vec![2, 1, 4, 3]);
        assert!(ctx.task_to_dsq.is_empty());
    }

    #[test]
    fn fifo_keeps_push_order() {
        let mut ctx = SimCtx::load(&workload());
        let dsq = ctx.create_dsq_fifo();
        ctx.advance_time(2);
        let arrived = ctx.take_arrivals();
        for &id in arrived.iter().rev() {
            ctx.dsq_push(dsq, id);
        }
        assert!(ctx.dsqs[dsq].contains(arrived[0]));
        assert_eq!(ctx.dsq_pop(dsq).map(|id| ctx.task(id).process.pid), Some(4));
    }

    #[test]
    #[should_panic(expected = "already present")]
    fn double_enqueue_is_a_bug() {
        let mut ctx = SimCtx::load(&workload());
        let dsq = ctx.create_dsq_fifo();
        let id = ctx.take_arrivals()[0];
        ctx.dsq_push(dsq, id);
        ctx.dsq_push(dsq, id);
    }

    #[test]
    fn completion_records_wait_and_leaves_workload_alone() {
        let original = workload();
        let mut ctx = SimCtx::load(&original);
        let id = ctx.take_arrivals()[0];

        ctx.advance_time(3);
        ctx.set_running(id);
        ctx.charge(id, 5);
        assert_eq!(ctx.now, 8);

        let wait = ctx.mark_completed(id);
        assert_eq!(wait, 3);
        assert_eq!(ctx.finished[0].first_run, Some(3));
        assert_eq!(ctx.finished[0].completion_time, Some(8));
        assert_eq!(ctx.tasks.len(), 3);
        assert_eq!(original, workload());
    }
}
