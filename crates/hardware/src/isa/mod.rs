//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the decoded-instruction vocabulary and one table-driven decoder per ISA mode.
//!
//! # Modes
//!
//! * `riscv`: RV32I with the M extension, word-sized atomics, fences, ECALL/EBREAK.
//! * `mips`: Legacy MIPS-I integer subset with HI/LO, likely branches and conditional traps.
//! * `dlx`: Legacy DLX integer subset with the set family and `TRAP`.

/// DLX decoder.
pub mod dlx;

/// Decoded instruction descriptor and bit extraction utilities.
pub mod instruction;

/// MIPS decoder.
pub mod mips;

/// RISC-V decoder.
pub mod riscv;

use crate::common::error::PipelineError;
use crate::config::IsaMode;
use crate::isa::instruction::Instruction;

/// Decodes `word` fetched from `pc` according to `isa`.
///
/// # Arguments
///
/// * `isa` - The active ISA mode.
/// * `word` - The raw instruction word.
/// * `pc` - Address the word was fetched from, reported on failure.
///
/// # Returns
///
/// The descriptor, or [`PipelineError::UnknownInstruction`].
pub fn decode(isa: IsaMode, word: u32, pc: u32) -> Result<Instruction, PipelineError> {
    let decoded = match isa {
        IsaMode::RiscV => riscv::decode(word),
        IsaMode::Mips => mips::decode(word),
        IsaMode::Dlx => dlx::decode(word),
    };
    decoded.ok_or(PipelineError::UnknownInstruction { word, pc })
}
