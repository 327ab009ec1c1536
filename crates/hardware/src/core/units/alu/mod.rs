//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. Every operation
//! takes two 32-bit operands and yields a low and a high result word; only the
//! multiply/divide family produces a meaningful high word.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mult, Mulh*, Div, Rem and the jump-target forms
//! - [`logic`]:      And, Or, Xor, Nor, Lui
//! - [`compare`]:    The set family and the conditional traps
//! - [`shifts`]:     Sll, Srl, Sra and their register-amount variants

/// Integer arithmetic operations (add, subtract, multiply, divide, targets).
pub mod arithmetic;

/// Set-on-condition and conditional trap operations.
pub mod compare;

/// Bitwise logical operations.
pub mod logic;

/// Shift operations.
pub mod shifts;

use crate::common::error::ExecuteError;
use crate::core::arch::trap::TrapId;
use crate::isa::instruction::AluFunction;

/// Result of one ALU operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluResult {
    /// Low word: the result of every operation.
    pub lo: u32,
    /// High word: upper product half or division remainder.
    pub hi: u32,
}

impl AluResult {
    /// A result with only a low word.
    pub const fn lo(lo: u32) -> Self {
        Self { lo, hi: 0 }
    }
}

/// Integer ALU.
#[derive(Clone, Copy, Debug, Default)]
pub struct Alu;

impl Alu {
    /// Executes one ALU operation.
    ///
    /// # Arguments
    ///
    /// * `function` - The operation.
    /// * `a` - First operand.
    /// * `b` - Second operand (shift amount, trap id, jump index).
    ///
    /// # Returns
    ///
    /// The low/high result, or the fault the operation raised.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::Alu;
    /// use pipesim_core::isa::instruction::AluFunction;
    ///
    /// let r = Alu::apply(AluFunction::Add, u32::MAX, 2).unwrap();
    /// assert_eq!(r.lo, 1);
    ///
    /// let r = Alu::apply(AluFunction::Multu, 0x1_0000, 0x1_0000).unwrap();
    /// assert_eq!((r.hi, r.lo), (1, 0));
    /// ```
    pub fn apply(function: AluFunction, a: u32, b: u32) -> Result<AluResult, ExecuteError> {
        use AluFunction as F;
        match function {
            F::Add | F::Addu | F::Sub | F::Subu | F::Ba | F::Br => {
                Ok(AluResult::lo(arithmetic::add_sub(function, a, b)))
            }
            F::Mult | F::Multu | F::Mulh | F::Mulhu | F::Mulhsu => {
                Ok(arithmetic::multiply(function, a, b))
            }
            F::Div | F::Divu | F::Rem | F::Remu => arithmetic::divide(function, a, b),
            F::And | F::Or | F::Xor | F::Nor | F::Lui => Ok(AluResult::lo(logic::execute(function, a, b))),
            F::Sll | F::Srl | F::Sra | F::Sllv | F::Srlv | F::Srav => {
                Ok(AluResult::lo(shifts::execute(function, a, b)))
            }
            F::Slt
            | F::Sltu
            | F::Seq
            | F::Sne
            | F::Sge
            | F::Sgt
            | F::Sle
            | F::Sequ
            | F::Sneu
            | F::Sgeu
            | F::Sgtu
            | F::Sleu => Ok(AluResult::lo(u32::from(compare::set(function, a, b)))),
            F::Teq | F::Tge | F::Tgeu | F::Tlt | F::Tltu | F::Tne => {
                if compare::trap_condition(function, a, b) {
                    Err(ExecuteError::TrapConditionMet(function))
                } else {
                    Ok(AluResult::default())
                }
            }
            // The service itself is requested by Memory.
            F::Trap => TrapId::try_from(b).map(|_| AluResult::default()),
            F::Syscall | F::Break => Ok(AluResult::default()),
            F::None => Err(ExecuteError::UnknownAluOperation(function)),
        }
    }
}
