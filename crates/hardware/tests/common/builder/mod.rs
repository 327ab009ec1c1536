//! Instruction encoders, one module per ISA mode.

/// RISC-V, MIPS and DLX encoders.
pub mod instruction;

pub use instruction::{dlx, mips, riscv};
