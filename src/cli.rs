use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

/// Compare the mean waiting time of classical CPU scheduling policies.
#[derive(Parser, Debug)]
#[command(name = "schedsim", version, about)]
pub struct Args {
    /// Input file: the round-robin quantum followed by
    /// `pid arrival burst priority` groups
    pub input: Option<PathBuf>,

    /// Log to stderr; repeat for more detail (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
