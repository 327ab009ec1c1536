//! ALU logical operations.

use crate::isa::instruction::AluFunction;

/// Executes a bitwise operation or `LUI`.
///
/// # Returns
///
/// The result, or `0` for non-logical functions.
pub const fn execute(function: AluFunction, a: u32, b: u32) -> u32 {
    match function {
        AluFunction::And => a & b,
        AluFunction::Or => a | b,
        AluFunction::Xor => a ^ b,
        AluFunction::Nor => !(a | b),
        AluFunction::Lui => b << 16,
        _ => 0,
    }
}
