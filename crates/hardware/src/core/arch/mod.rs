//! Architectural state and external collaborators.
//!
//! This module contains the state and seams the pipeline stages share:
//! 1. **Registers:** The general-purpose register set plus HI/LO.
//! 2. **Syscalls:** The Write-Back handoff to a system call handler.
//! 3. **Traps:** The DLX `TRAP` handoff to a trap handler.

/// Register set with initialization tracking.
pub mod gpr;

/// System call request, outcome and handler trait.
pub mod syscall;

/// DLX trap ids and handler trait.
pub mod trap;

pub use gpr::RegisterSet;
pub use syscall::{ConsoleSyscalls, SyscallHandler, SyscallOutcome, SyscallRequest};
pub use trap::{NullTrapHandler, TrapHandler, TrapId};
