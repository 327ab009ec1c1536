//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Hazard Detection:** Identifies load-use hazards that require a one-cycle stall.
//! 2. **Operand Forwarding:** Resolves Read-After-Write (RAW) hazards by bypassing the
//!    register file from EX/MEM, MEM/WB and the write-back bypass.
//! 3. **In-Flight Destinations:** A small ring of recently decoded destinations, used by
//!    Decode to tell a not-yet-written register from a never-written one.

use crate::common::constants::FORWARDING_WINDOW;
use crate::common::reg::Reg;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry, MemWbEntry};
use crate::isa::instruction::Destination;

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the instruction about to execute reads a register
/// that the instruction ahead of it is still loading from memory.
///
/// # Arguments
///
/// * `id_ex` - The instruction waiting to execute.
/// * `ex_mem` - The instruction about to access memory.
///
/// # Returns
///
/// `true` if a bubble must be inserted into EX/MEM this cycle.
pub fn need_stall_load_use(id_ex: &IdExEntry, ex_mem: &ExMemEntry) -> bool {
    if !ex_mem.inst.is_load_like() {
        return false;
    }
    let dest = ex_mem.inst.dest;
    id_ex.inst.sources().any(|r| dest.writes(r))
}

/// Value `entry` produces for `reg`, if it writes it.
fn produced(dest: Destination, reg: Reg, lo: u32, hi: u32) -> Option<u32> {
    if !dest.writes(reg) {
        return None;
    }
    match (dest, reg) {
        (Destination::HiLo, Reg::Hi) => Some(hi),
        _ => Some(lo),
    }
}

/// Forwards the most recent in-flight value of `reg`.
///
/// Sources are searched youngest first: EX/MEM (unless its value comes from memory),
/// then MEM/WB, then the write-back bypass.
///
/// # Arguments
///
/// * `reg` - The register being read.
/// * `ex_mem` - The instruction one ahead of the reader.
/// * `mem_wb` - The instruction two ahead of the reader.
/// * `bypass` - The instruction written back last cycle.
///
/// # Returns
///
/// The forwarded value, or `None` if no source produces `reg`.
pub fn forward(reg: Reg, ex_mem: &ExMemEntry, mem_wb: &MemWbEntry, bypass: &MemWbEntry) -> Option<u32> {
    if reg.is_zero() {
        return Some(0);
    }
    if !ex_mem.inst.is_load_like() {
        if let Some(v) = produced(ex_mem.inst.dest, reg, ex_mem.value(), ex_mem.result.hi) {
            tracing::trace!(%reg, seq = ex_mem.seq, "forward from EX/MEM");
            return Some(v);
        }
    }
    if let Some(v) = produced(mem_wb.inst.dest, reg, mem_wb.value, mem_wb.hi) {
        tracing::trace!(%reg, seq = mem_wb.seq, "forward from MEM/WB");
        return Some(v);
    }
    produced(bypass.inst.dest, reg, bypass.value, bypass.hi)
}

/// Fixed-capacity ring of the destinations of the most recently decoded instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DestinationRing {
    slots: [Destination; FORWARDING_WINDOW],
    head: usize,
}

impl DestinationRing {
    /// Records the destination of a decoded instruction, evicting the oldest.
    pub const fn push(&mut self, dest: Destination) {
        self.slots[self.head] = dest;
        self.head = (self.head + 1) % FORWARDING_WINDOW;
    }

    /// Returns `true` if a recently decoded instruction writes `reg`.
    pub fn contains(&self, reg: Reg) -> bool {
        self.slots.iter().any(|d| d.writes(reg))
    }

    /// Forgets every destination.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
