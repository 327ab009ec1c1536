//! ALU arithmetic operations.
//!
//! Implements wrapping addition and subtraction, the 64-bit multiply family, the
//! divide/remainder family and the two jump-target computations. Addition and
//! subtraction never trap, including the MIPS "signed" forms.

use super::AluResult;
use crate::common::error::ExecuteError;
use crate::common::value::{DoubleWord, Word};
use crate::isa::instruction::AluFunction;

/// Region bits kept by an absolute jump.
const REGION_MASK: u32 = 0xF000_0000;

/// Executes addition, subtraction and jump-target arithmetic.
///
/// # Returns
///
/// The result modulo 2^32. Returns `0` for other functions.
pub fn add_sub(function: AluFunction, a: u32, b: u32) -> u32 {
    match function {
        AluFunction::Add | AluFunction::Addu => Word(a).wrapping_add(Word(b)).unsigned(),
        AluFunction::Sub | AluFunction::Subu => Word(a).wrapping_sub(Word(b)).unsigned(),
        AluFunction::Ba => (a & REGION_MASK) | (b << 2),
        AluFunction::Br => a.wrapping_add(b << 2),
        _ => 0,
    }
}

/// Executes the multiply family.
///
/// # Returns
///
/// `MULT`/`MULTU`: the full product in hi:lo. `MULH*`: the upper product half in lo.
pub fn multiply(function: AluFunction, a: u32, b: u32) -> AluResult {
    let product = match function {
        AluFunction::Mult | AluFunction::Mulh => {
            DoubleWord::from_signed(i64::from(a as i32) * i64::from(b as i32))
        }
        AluFunction::Multu | AluFunction::Mulhu => DoubleWord(u64::from(a) * u64::from(b)),
        AluFunction::Mulhsu => DoubleWord::from_signed(i64::from(a as i32) * i64::from(b)),
        _ => DoubleWord::default(),
    };
    match function {
        AluFunction::Mult | AluFunction::Multu => AluResult {
            lo: product.lo().unsigned(),
            hi: product.hi().unsigned(),
        },
        _ => AluResult::lo(product.hi().unsigned()),
    }
}

/// Executes the divide/remainder family.
///
/// # Returns
///
/// `DIV`/`DIVU`: quotient in lo, remainder in hi. `REM`/`REMU`: remainder in lo.
/// Fails with [`ExecuteError::DivisionByZero`] when `b` is zero.
pub fn divide(function: AluFunction, a: u32, b: u32) -> Result<AluResult, ExecuteError> {
    if b == 0 {
        return Err(ExecuteError::DivisionByZero);
    }
    let (quotient, remainder) = match function {
        AluFunction::Div | AluFunction::Rem => {
            let (sa, sb) = (a as i32, b as i32);
            (sa.wrapping_div(sb) as u32, sa.wrapping_rem(sb) as u32)
        }
        _ => (a / b, a % b),
    };
    Ok(match function {
        AluFunction::Div | AluFunction::Divu => AluResult {
            lo: quotient,
            hi: remainder,
        },
        _ => AluResult::lo(remainder),
    })
}
