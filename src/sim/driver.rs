use log::{debug, info, trace};

use super::{Input, RunReport, Workload};
use crate::{
    core::SchedCore,
    scheduler::{
        FifoScheduler, NonPreemptivePriority, NonPreemptiveSjf, Policy, PreemptivePriority,
        PreemptiveSjf, RoundRobinScheduler, SchedParams, Scheduler,
    },
};

/// Runs scheduling policies over one workload. Every run works on its own
/// copy, so the workload is the same before and after.
pub struct Sim {
    workload: Workload,
    params: SchedParams,
}

impl Sim {
    pub fn new(input: Input) -> Self {
        Self::with_workload(input.workload, input.params)
    }

    pub fn with_workload(workload: Workload, params: SchedParams) -> Self {
        assert!(!workload.is_empty(), "Simulation requires at least one process");
        debug!(
            "Workload of {} processes, quantum {}",
            workload.len(),
            params.quantum
        );
        for process in workload.iter() {
            debug!(
                "{} {} {} {}",
                process.pid, process.arrival, process.burst, process.priority
            );
        }
        Self { workload, params }
    }

    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    pub fn params(&self) -> &SchedParams {
        &self.params
    }

    /// All policies in report order. Nothing is printed here, so callers can
    /// emit all results or none.
    pub fn run_all(&self) -> Vec<RunReport> {
        Policy::ALL
            .iter()
            .map(|&policy| self.run_policy(policy))
            .collect()
    }

    pub fn run_policy(&self, policy: Policy) -> RunReport {
        let report = match policy {
            Policy::Fcfs => self.simulate::<FifoScheduler>(policy),
            Policy::NonPreemptivePriority => self.simulate::<NonPreemptivePriority>(policy),
            Policy::NonPreemptiveSjf => self.simulate::<NonPreemptiveSjf>(policy),
            Policy::PreemptivePriority => self.simulate::<PreemptivePriority>(policy),
            Policy::PreemptiveSjf => self.simulate::<PreemptiveSjf>(policy),
            Policy::RoundRobin => self.simulate::<RoundRobinScheduler>(policy),
        };

        info!(
            "{policy}: mean wait {:.3}, mean turnaround {:.3}, mean response {:.3}, makespan {}, idle {}",
            report.mean_wait,
            report.mean_turnaround,
            report.mean_response,
            report.makespan,
            report.idle_ticks
        );
        for outcome in &report.outcomes {
            debug!(
                "{policy}: pid {} ran first at {}, completed at {}, waited {}",
                outcome.pid, outcome.first_run, outcome.completion, outcome.wait
            );
        }
        report
    }

    fn simulate<S: Scheduler>(&self, policy: Policy) -> RunReport {
        let mut core = SchedCore::<S>::new(&self.workload, &self.params);
        while !core.is_done() {
            let now = core.ctx.now;
            for event in core.step() {
                trace!("{policy} t={now} {event:?}");
            }
        }
        RunReport::new(policy, &core.ctx.finished, core.observer())
    }
}
