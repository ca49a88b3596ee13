//! Error types for reading a workload

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::Ticks;
use crate::sim::Pid;

/// Problems with the contents of an input file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Quantum not found")]
    MissingQuantum,

    #[error("Quantum must be at least 1, found {0}")]
    InvalidQuantum(i64),

    #[error("No processes found")]
    NoProcesses,

    #[error("Process {pid}: {reason}")]
    InvalidProcess { pid: Pid, reason: &'static str },

    #[error("Line {line}: '-' must be followed by a digit")]
    DanglingSign { line: usize },

    #[error("Arrivals and bursts run past the simulated time limit of {limit} ticks")]
    HorizonTooLong { limit: Ticks },

    #[error("Line {line}: integer does not fit in 64 bits")]
    Overflow { line: usize },
}

/// Main error type; everything here is fatal before any policy runs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Need a file with the process information")]
    MissingInput,

    #[error("filename does not exist or is corrupted")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Convenient Result type
pub type Result<T> = std::result::Result<T, Error>;
