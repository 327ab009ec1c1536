//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics of a run. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions and the derived CPI.
//! 2. **Stalls:** Load-use bubbles, memory waits and instruction-cache bubbles.
//! 3. **Control Flow:** Squash events and squashed instructions.
//! 4. **System:** Syscalls serviced and errors surfaced.

use std::fmt;

/// Simulation statistics structure tracking pipeline-level metrics.
///
/// Branch predictor and cache counters live with their units; see
/// [`BranchStats`](crate::core::units::bru::BranchStats) and
/// [`CacheStats`](crate::core::units::cache::CacheStats).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions that completed Write-Back.
    pub instructions_retired: u64,
    /// Bubbles inserted for load-use hazards.
    pub stalls_load_use: u64,
    /// Cycles the pipeline held for a data access.
    pub stalls_mem: u64,
    /// Cycles Fetch waited on the instruction cache.
    pub fetch_bubbles: u64,
    /// Cycles in which Fetch squashed wrong-path instructions.
    pub flushes: u64,
    /// Instructions squashed from the stage latches.
    pub squashed: u64,
    /// Pipeline flushes requested by Write-Back.
    pub interrupts: u64,
    /// System calls serviced.
    pub syscalls: u64,
    /// Errors surfaced by the pipeline.
    pub exceptions: u64,
}

impl SimStats {
    /// Cycles per retired instruction, or zero before anything retired.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cycles               {}", self.cycles)?;
        writeln!(f, "instructions retired {}", self.instructions_retired)?;
        writeln!(f, "CPI                  {:.3}", self.cpi())?;
        writeln!(f, "load-use stalls      {}", self.stalls_load_use)?;
        writeln!(f, "memory stalls        {}", self.stalls_mem)?;
        writeln!(f, "fetch bubbles        {}", self.fetch_bubbles)?;
        writeln!(f, "flushes              {}", self.flushes)?;
        writeln!(f, "squashed             {}", self.squashed)?;
        writeln!(f, "interrupts           {}", self.interrupts)?;
        writeln!(f, "syscalls             {}", self.syscalls)?;
        write!(f, "exceptions           {}", self.exceptions)
    }
}
