//! DLX Trap Handling.
//!
//! The DLX `TRAP` instruction hands a small set of host services to an external
//! collaborator. This module defines:
//! 1. **Trap Ids:** The numbered services, with id 0 reserved for stopping the run.
//! 2. **Handler Trait:** The seam the Memory stage calls through.
//! 3. **Default Handler:** A handler that refuses every service.

use crate::common::error::ExecuteError;

/// Services reachable through `TRAP`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrapId {
    /// Stop the run; never delivered to a handler.
    Stop,
    /// Open a file.
    Open,
    /// Close a file.
    Close,
    /// Read from a file.
    Read,
    /// Write to a file.
    Write,
    /// Formatted print.
    Printf,
}

impl TryFrom<u32> for TrapId {
    type Error = ExecuteError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Ok(match id {
            0 => Self::Stop,
            1 => Self::Open,
            2 => Self::Close,
            3 => Self::Read,
            4 => Self::Write,
            5 => Self::Printf,
            other => return Err(ExecuteError::UnknownTrap(other)),
        })
    }
}

/// Collaborator servicing DLX traps.
pub trait TrapHandler {
    /// Services one trap.
    ///
    /// # Arguments
    ///
    /// * `id` - The requested service; never [`TrapId::Stop`].
    /// * `arg` - The argument register value (a pointer to the argument block).
    ///
    /// # Returns
    ///
    /// The value written to the trap result register.
    fn trap(&mut self, id: TrapId, arg: u32) -> Result<u32, ExecuteError>;
}

/// Handler that answers every service with `-1`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullTrapHandler;

impl TrapHandler for NullTrapHandler {
    fn trap(&mut self, id: TrapId, arg: u32) -> Result<u32, ExecuteError> {
        tracing::warn!(?id, arg = format_args!("{arg:#010x}"), "trap service unavailable");
        Ok(u32::MAX)
    }
}
