use crate::core::Ticks;
use crate::sim::Pid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    Arrive {
        pid: Pid,
    },
    Dispatch {
        pid: Pid,
        slice: Ticks,
    },
    // Stopped with work left and handed back to the scheduler
    Requeue {
        pid: Pid,
    },
    Complete {
        pid: Pid,
        wait: Ticks,
    },
    // Nothing ready; the clock moved one tick
    Idle,
}
