//! Pipeline control signals.
//!
//! This module defines the signals stages raise towards the cycle driver. It provides:
//! 1. **Flush Requests:** Which in-flight instructions Fetch squashed after a resolved
//!    transfer, and which stage latches they were found in.
//! 2. **Interrupts:** Write-Back's request to stop the run or restart fetching.
//! 3. **Halt Reasons:** Why a run ended.

use std::fmt;

/// Instructions squashed by Fetch this cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlushRequest {
    /// A squashed instruction was waiting in IF/ID.
    pub decode: bool,
    /// A squashed instruction was waiting in ID/EX.
    pub execute: bool,
    /// A squashed instruction was waiting in EX/MEM.
    pub memory: bool,
    /// Sequence numbers of every squashed instruction.
    pub squashed: Vec<u64>,
}

impl FlushRequest {
    /// Returns `true` if nothing was squashed.
    pub fn is_empty(&self) -> bool {
        self.squashed.is_empty()
    }

    /// Returns `true` if `seq` was squashed.
    pub fn contains(&self, seq: u64) -> bool {
        self.squashed.contains(&seq)
    }
}

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// The configured cycle budget was used up.
    CycleBudget,
    /// A breakpoint instruction reached Write-Back.
    Break,
    /// DLX `TRAP 0` reached Write-Back.
    TrapStop,
    /// The program exited through a syscall with this code.
    SyscallExit(u32),
    /// An error that halts the run was surfaced.
    Fault,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleBudget => f.write_str("cycle budget exhausted"),
            Self::Break => f.write_str("breakpoint"),
            Self::TrapStop => f.write_str("trap 0"),
            Self::SyscallExit(code) => write!(f, "exit({code})"),
            Self::Fault => f.write_str("fault"),
        }
    }
}

/// Write-Back's request to the cycle driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    /// Stop the run.
    Halt(HaltReason),
    /// Flush the pipeline and resume fetching at `pc`.
    Resume {
        /// First address to fetch.
        pc: u32,
    },
}
