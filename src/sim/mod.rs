pub mod driver;
pub mod parse;
pub mod process;
pub mod report;
pub mod workload;

pub use driver::Sim;
pub use parse::Input;
pub use process::{Pid, Priority, Process};
pub use report::{Outcome, RunReport};
pub use workload::Workload;
