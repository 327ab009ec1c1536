//! ALU shift operations.
//!
//! Immediate and register-amount variants share one implementation; the amount is
//! always taken from `b` and masked to 5 bits.

use crate::isa::instruction::AluFunction;

/// Mask applied to every shift amount.
const SHAMT_MASK: u32 = 0x1F;

/// Executes a shift.
///
/// # Returns
///
/// `a` shifted by `b & 31`, or `0` for non-shift functions.
pub const fn execute(function: AluFunction, a: u32, b: u32) -> u32 {
    let amount = b & SHAMT_MASK;
    match function {
        AluFunction::Sll | AluFunction::Sllv => a << amount,
        AluFunction::Srl | AluFunction::Srlv => a >> amount,
        AluFunction::Sra | AluFunction::Srav => ((a as i32) >> amount) as u32,
        _ => 0,
    }
}
