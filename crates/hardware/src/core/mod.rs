//! Core processor implementation.
//!
//! This module contains the pipelined CPU: architectural state and collaborator seams,
//! the cycle driver, the pipeline stages and latches, and the execution units.

/// Architectural state and the syscall and trap seams.
pub mod arch;

/// CPU container and cycle driver.
pub mod cpu;

/// Instruction pipeline implementation (stages, latches, hazards, signals).
pub mod pipeline;

/// Execution units (ALU, branch prediction, caches, memory).
pub mod units;

pub use self::cpu::Cpu;
