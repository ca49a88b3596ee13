#![allow(dead_code)]

use std::num::NonZeroU64;

use cpu_sched_sim::{Process, SchedParams, Workload};
use rand::prelude::*;

pub fn workload(processes: &[(i64, u64, u64, i64)]) -> Workload {
    processes
        .iter()
        .map(|&(pid, arrival, burst, priority)| Process::new(pid, arrival, burst, priority))
        .collect()
}

pub fn params(quantum: u64) -> SchedParams {
    SchedParams::new(NonZeroU64::new(quantum).expect("quantum must be non-zero"))
}

/// Each tick, a process arrives with probability `p_arrival`; it is short
/// with probability `p_short`. Always yields at least one process.
pub fn bernoulli_workload(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    seed: u64,
) -> Workload {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();

    for t in 0..ticks {
        if (processes.is_empty() && t + 1 == ticks) || rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            processes.push(Process::new(
                processes.len() as i64 + 1,
                t,
                burst,
                rng.random_range(0..5),
            ));
        }
    }

    // Input order should not matter
    processes.shuffle(&mut rng);
    Workload::new(processes)
}

/// Small workloads with arbitrary bursts, priorities and arrival gaps.
pub fn random_workload(rng: &mut StdRng, max_len: usize) -> Workload {
    let len = rng.random_range(1..=max_len);
    (0..len)
        .map(|i| {
            Process::new(
                i as i64 + 1,
                rng.random_range(0..12),
                rng.random_range(1..=9),
                rng.random_range(-2..=4),
            )
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
