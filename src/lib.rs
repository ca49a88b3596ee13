pub mod cli;
pub mod core;
pub mod error;
pub mod scheduler;
pub mod sim;

pub use cli::Args;
pub use error::{Error, ParseError, Result};
pub use scheduler::{Policy, SchedParams, Scheduler};
pub use sim::{Input, Process, RunReport, Sim, Workload};
