//! ALU comparison operations.
//!
//! Implements the set-on-condition family and the conditional trap conditions.
//! The DLX unsigned set forms clear only the sign bit of both operands and then
//! compare as signed values.

use crate::isa::instruction::AluFunction;

const SIGN_CLEAR: u32 = 0x7FFF_FFFF;

/// Evaluates a set-on-condition function.
pub const fn set(function: AluFunction, a: u32, b: u32) -> bool {
    let (sa, sb) = (a as i32, b as i32);
    let (ma, mb) = ((a & SIGN_CLEAR) as i32, (b & SIGN_CLEAR) as i32);
    match function {
        AluFunction::Slt => sa < sb,
        AluFunction::Sltu => a < b,
        AluFunction::Seq => sa == sb,
        AluFunction::Sne => sa != sb,
        AluFunction::Sge => sa >= sb,
        AluFunction::Sgt => sa > sb,
        AluFunction::Sle => sa <= sb,
        AluFunction::Sequ => ma == mb,
        AluFunction::Sneu => ma != mb,
        AluFunction::Sgeu => ma >= mb,
        AluFunction::Sgtu => ma > mb,
        AluFunction::Sleu => ma <= mb,
        _ => false,
    }
}

/// Evaluates the condition of a conditional trap.
pub const fn trap_condition(function: AluFunction, a: u32, b: u32) -> bool {
    let (sa, sb) = (a as i32, b as i32);
    match function {
        AluFunction::Teq => a == b,
        AluFunction::Tne => a != b,
        AluFunction::Tge => sa >= sb,
        AluFunction::Tgeu => a >= b,
        AluFunction::Tlt => sa < sb,
        AluFunction::Tltu => a < b,
        _ => false,
    }
}
