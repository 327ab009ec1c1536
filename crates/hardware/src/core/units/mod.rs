//! Execution units and functional components.
//!
//! This module contains the units the pipeline stages drive: the integer ALU, the
//! branch prediction unit, the caches and the memory hierarchy behind them.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch condition evaluation, BTB and direction predictors.
pub mod bru;

/// Set-associative cache with replacement policies.
pub mod cache;

/// Main memory and the cache hierarchy in front of it.
pub mod memory;
