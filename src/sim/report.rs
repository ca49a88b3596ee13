use std::fmt;

use average::{Estimate, Mean};

use super::Pid;
use crate::core::{Observer, Task, Ticks};
use crate::error::Error;
use crate::scheduler::Policy;

pub const TERMINATED: &str = "Program terminated correctly\n";

/// What happened to one process in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub pid: Pid,
    pub arrival: Ticks,
    pub burst: Ticks,
    pub first_run: Ticks,
    pub completion: Ticks,
    pub wait: Ticks,
    pub turnaround: Ticks,
    pub response: Ticks,
}

impl Outcome {
    fn from_task(task: &Task) -> Self {
        let completion = task
            .completion_time
            .expect("Finished task missing completion time");
        let first_run = task.first_run.expect("Finished task never ran");
        let process = &task.process;
        Self {
            pid: process.pid,
            arrival: process.arrival,
            burst: process.burst,
            first_run,
            completion,
            wait: completion - process.arrival - process.burst,
            turnaround: completion - process.arrival,
            response: first_run - process.arrival,
        }
    }
}

/// Result of running one policy over a workload.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub policy: Policy,
    /// In completion order.
    pub outcomes: Vec<Outcome>,
    pub total_wait: f64,
    pub mean_wait: f64,
    pub mean_turnaround: f64,
    pub mean_response: f64,
    pub max_wait: Ticks,
    pub busy_ticks: Ticks,
    pub idle_ticks: Ticks,
    /// Clock value when the last process completed.
    pub makespan: Ticks,
}

impl RunReport {
    pub fn new(policy: Policy, finished: &[Task], observer: &Observer) -> Self {
        assert!(!finished.is_empty(), "Mean wait is undefined for an empty run");

        let outcomes: Vec<Outcome> = finished.iter().map(Outcome::from_task).collect();

        let mut total_wait = 0.0;
        for outcome in &outcomes {
            total_wait += outcome.wait as f64;
        }

        Self {
            policy,
            total_wait,
            mean_wait: total_wait / outcomes.len() as f64,
            mean_turnaround: avg(outcomes.iter().map(|o| o.turnaround as f64)),
            mean_response: avg(outcomes.iter().map(|o| o.response as f64)),
            max_wait: outcomes.iter().map(|o| o.wait).max().unwrap_or(0),
            busy_ticks: observer.busy_ticks(),
            idle_ticks: observer.idle_ticks(),
            makespan: outcomes.iter().map(|o| o.completion).max().unwrap_or(0),
            outcomes,
        }
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn outcome(&self, pid: Pid) -> Option<&Outcome> {
        self.outcomes.iter().find(|o| o.pid == pid)
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} average wait time is: {:.6}\n\n",
            self.policy.label(),
            self.mean_wait
        )
    }
}

/// Standard output for a completed batch of runs.
pub fn render(reports: &[RunReport]) -> String {
    let mut out: String = reports.iter().map(ToString::to_string).collect();
    out.push_str(TERMINATED);
    out
}

/// Standard output for a run that failed before any policy ran.
pub fn render_failure(err: &Error) -> String {
    match err {
        Error::MissingInput => format!("{err}\nAbnormal termination\n"),
        _ => format!("\nError in function main\n\t {err}\nThe program will terminate.\n\n"),
    }
}
