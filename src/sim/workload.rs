use super::process::Process;
use crate::core::state::Ticks;

/// Ordered batch of processes, in input order. Every policy run starts from
/// its own [`Workload::deep_copy`], so one workload serves all runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    processes: Vec<Process>,
}

impl Workload {
    pub fn new(processes: Vec<Process>) -> Self {
        Self { processes }
    }

    pub fn push(&mut self, process: Process) {
        self.processes.push(process);
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn iter(&self) -> impl Iterator<Item = &Process> {
        self.processes.iter()
    }

    /// Independent copy whose processes have `remaining = burst` and
    /// `ready_since = arrival`.
    pub fn deep_copy(&self) -> Workload {
        self.processes.iter().map(Process::fresh).collect()
    }

    pub fn total_burst(&self) -> Ticks {
        self.processes.iter().map(|p| p.burst).sum()
    }

    pub fn earliest_arrival(&self) -> Option<Ticks> {
        self.processes.iter().map(|p| p.arrival).min()
    }
}

impl FromIterator<Process> for Workload {
    fn from_iter<I: IntoIterator<Item = Process>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Workload {
    type Item = Process;
    type IntoIter = std::vec::IntoIter<Process>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Workload {
        Workload::new(vec![
            Process::new(1, 0, 5, 2),
            Process::new(2, 1, 3, 1),
            Process::new(3, 4, 8, 4),
        ])
    }

    #[test]
    fn deep_copy_resets_scratch_fields() {
        let mut workload = sample();
        for process in workload.processes.iter_mut() {
            process.remaining = 0;
            process.ready_since = 99;
        }

        let copy = workload.deep_copy();
        for (copied, original) in copy.iter().zip(workload.iter()) {
            assert_eq!(copied.pid, original.pid);
            assert_eq!(copied.remaining, original.burst);
            assert_eq!(copied.ready_since, original.arrival);
        }
    }

    #[test]
    fn deep_copy_is_independent() {
        let workload = sample();
        let before = workload.clone();

        let mut copy = workload.deep_copy();
        copy.processes[0].remaining = 1;
        copy.processes[2].ready_since = 17;
        copy.push(Process::new(9, 0, 1, 0));

        assert_eq!(workload, before);
        assert_eq!(copy.len(), workload.len() + 1);
    }

    #[test]
    fn totals() {
        let workload = sample();
        assert_eq!(workload.total_burst(), 16);
        assert_eq!(workload.earliest_arrival(), Some(0));
        assert_eq!(Workload::default().earliest_arrival(), None);
    }
}
