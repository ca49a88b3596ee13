//! Reader for the workload text format.
//!
//! The file is a stream of integers: the round-robin quantum, then groups of
//! `pid arrival burst priority`. Anything that is not a digit is skipped, `#`
//! comments out the rest of the line and a `-` directly before a digit
//! negates the number.

use std::fs;
use std::num::NonZeroU64;
use std::path::Path;

use log::{debug, warn};
use rustc_hash::FxHashSet;

use super::{Process, Workload};
use crate::core::Ticks;
use crate::error::{Error, ParseError};
use crate::scheduler::SchedParams;

const GROUP_LEN: usize = 4;

/// Upper bound on simulated time. The clock moves one tick per idle step, so
/// `latest arrival + total burst` must stay within it.
pub const MAX_HORIZON: Ticks = 1 << 32;

/// A parsed input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub params: SchedParams,
    pub workload: Workload,
}

impl Input {
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let bytes = fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read {} bytes from {}", bytes.len(), path.display());
        Ok(Self::parse(&bytes)?)
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        let tokens = Tokens::new(bytes).collect::<Result<Vec<_>, _>>()?;
        let (quantum, rest) = tokens.split_first().ok_or(ParseError::MissingQuantum)?;
        let quantum = u64::try_from(quantum.value)
            .ok()
            .and_then(NonZeroU64::new)
            .ok_or(ParseError::InvalidQuantum(quantum.value))?;

        let groups = rest.chunks_exact(GROUP_LEN);
        if let Some(first) = groups.remainder().first() {
            warn!(
                "Discarding {} trailing value(s) starting on line {}",
                groups.remainder().len(),
                first.line
            );
        }

        let mut seen = FxHashSet::default();
        let mut workload = Workload::default();
        for group in groups {
            let process = process_from(group)?;
            if !seen.insert(process.pid) {
                warn!(
                    "Duplicate pid {} on line {}; ties fall back to input order",
                    process.pid, group[0].line
                );
            }
            workload.push(process);
        }

        if workload.is_empty() {
            return Err(ParseError::NoProcesses);
        }
        check_horizon(&workload)?;

        Ok(Self {
            params: SchedParams::new(quantum),
            workload,
        })
    }
}

// Bounds the clock of every policy: no run can finish later than the last
// arrival plus all the work
fn check_horizon(workload: &Workload) -> Result<(), ParseError> {
    let latest = workload.iter().map(|p| p.arrival).max().unwrap_or(0);
    let horizon = workload
        .iter()
        .try_fold(latest, |end, p| end.checked_add(p.burst))
        .filter(|&end| end <= MAX_HORIZON);
    match horizon {
        Some(_) => Ok(()),
        None => Err(ParseError::HorizonTooLong { limit: MAX_HORIZON }),
    }
}

fn process_from(group: &[Token]) -> Result<Process, ParseError> {
    let [pid, arrival, burst, priority] = group else {
        unreachable!("chunks_exact yields groups of {GROUP_LEN}");
    };
    let pid = pid.value;

    let arrival = u64::try_from(arrival.value).map_err(|_| ParseError::InvalidProcess {
        pid,
        reason: "arrival time is negative",
    })?;
    let burst = u64::try_from(burst.value)
        .ok()
        .filter(|&burst| burst >= 1)
        .ok_or(ParseError::InvalidProcess {
            pid,
            reason: "burst must be at least 1",
        })?;

    Ok(Process::new(pid, arrival, burst, priority.value))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Token {
    value: i64,
    line: usize,
}

struct Tokens<'a> {
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    // Stops on the newline so the line count stays right
    fn skip_comment(&mut self) {
        while self.peek().is_some_and(|b| b != b'\n') {
            self.pos += 1;
        }
    }

    fn number(&mut self, negative: bool) -> Result<Token, ParseError> {
        let line = self.line;
        let mut value: i64 = 0;
        while let Some(digit) = self.peek().filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit - b'0')))
                .ok_or(ParseError::Overflow { line })?;
            self.pos += 1;
        }
        Ok(Token {
            value: if negative { -value } else { value },
            line,
        })
    }
}

impl Iterator for Tokens<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(byte) = self.peek() {
            match byte {
                b'#' => self.skip_comment(),
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b'-' => {
                    self.pos += 1;
                    if !self.peek().is_some_and(|b| b.is_ascii_digit()) {
                        return Some(Err(ParseError::DanglingSign { line: self.line }));
                    }
                    return Some(self.number(true));
                }
                b'0'..=b'9' => return Some(self.number(false)),
                _ => self.pos += 1,
            }
        }
        None
    }
}
