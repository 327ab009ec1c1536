//! ALU Tests.
//!
//! Covers wrapping arithmetic, the HI/LO producing operations, the DLX sign-clearing
//! compares, conditional traps and trap id validation.

use pipesim_core::common::ExecuteError;
use pipesim_core::core::units::alu::{Alu, AluResult};
use pipesim_core::isa::instruction::AluFunction;
use proptest::prelude::*;
use rstest::rstest;

fn apply(function: AluFunction, a: u32, b: u32) -> Result<AluResult, ExecuteError> {
    Alu::apply(function, a, b)
}

fn lo(function: AluFunction, a: u32, b: u32) -> u32 {
    apply(function, a, b).unwrap().lo
}

// ══════════════════════════════════════════════════════════
// 1. Arithmetic
// ══════════════════════════════════════════════════════════

#[test]
fn signed_add_wraps_without_trapping() {
    assert_eq!(lo(AluFunction::Add, i32::MAX as u32, 1), i32::MIN as u32);
    assert_eq!(lo(AluFunction::Sub, 0, 1), u32::MAX);
}

#[test]
fn signed_multiply_fills_hi_and_lo() {
    let r = apply(AluFunction::Mult, (-2i32) as u32, 3).unwrap();
    assert_eq!(r.lo, (-6i32) as u32);
    assert_eq!(r.hi, u32::MAX);
}

#[test]
fn mulh_family_returns_the_upper_word() {
    assert_eq!(lo(AluFunction::Mulhu, u32::MAX, u32::MAX), 0xFFFF_FFFE);
    assert_eq!(lo(AluFunction::Mulh, (-1i32) as u32, (-1i32) as u32), 0);
    assert_eq!(lo(AluFunction::Mulhsu, (-1i32) as u32, 2), u32::MAX);
}

#[test]
fn divide_puts_the_remainder_in_hi() {
    let r = apply(AluFunction::Div, (-7i32) as u32, 2).unwrap();
    assert_eq!(r.lo, (-3i32) as u32);
    assert_eq!(r.hi, (-1i32) as u32);
    assert_eq!(lo(AluFunction::Remu, 7, 4), 3);
}

#[test]
fn most_negative_over_minus_one_wraps() {
    assert_eq!(lo(AluFunction::Div, i32::MIN as u32, u32::MAX), i32::MIN as u32);
}

#[rstest]
#[case(AluFunction::Div)]
#[case(AluFunction::Divu)]
#[case(AluFunction::Rem)]
#[case(AluFunction::Remu)]
fn zero_divisor_is_reported(#[case] function: AluFunction) {
    assert_eq!(apply(function, 5, 0), Err(ExecuteError::DivisionByZero));
}

#[test]
fn jump_targets() {
    // Branch offsets count words from the next PC.
    assert_eq!(lo(AluFunction::Br, 0x104, (-2i32) as u32), 0xFC);
    // Absolute jumps keep the region of the next PC.
    assert_eq!(lo(AluFunction::Ba, 0x1000_0004, 0x40), 0x1000_0100);
}

// ══════════════════════════════════════════════════════════
// 2. Logic, shifts and compares
// ══════════════════════════════════════════════════════════

#[test]
fn logic_and_upper_immediate() {
    assert_eq!(lo(AluFunction::Nor, 0xF0F0_0000, 0x0000_F0F0), 0x0F0F_0F0F);
    assert_eq!(lo(AluFunction::Lui, 0, 0xBEEF), 0xBEEF_0000);
}

#[test]
fn shift_amount_uses_five_bits() {
    assert_eq!(lo(AluFunction::Sll, 1, 33), 2);
    assert_eq!(lo(AluFunction::Sra, 0x8000_0000, 4), 0xF800_0000);
    assert_eq!(lo(AluFunction::Srl, 0x8000_0000, 4), 0x0800_0000);
}

#[rstest]
#[case(AluFunction::Slt, (-1i32) as u32, 1, 1)]
#[case(AluFunction::Sltu, (-1i32) as u32, 1, 0)]
#[case(AluFunction::Sge, 3, 3, 1)]
#[case(AluFunction::Sne, 3, 3, 0)]
// Sign-clearing compare: 0x8000_0001 behaves as 1.
#[case(AluFunction::Sgtu, 0x8000_0001, 2, 0)]
#[case(AluFunction::Sequ, 0x8000_0001, 1, 1)]
fn set_family(#[case] function: AluFunction, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(lo(function, a, b), expected);
}

// ══════════════════════════════════════════════════════════
// 3. Traps
// ══════════════════════════════════════════════════════════

#[test]
fn conditional_trap_fires_only_when_true() {
    assert_eq!(
        apply(AluFunction::Teq, 4, 4),
        Err(ExecuteError::TrapConditionMet(AluFunction::Teq))
    );
    assert_eq!(apply(AluFunction::Tltu, 4, 4), Ok(AluResult::default()));
}

#[rstest]
#[case(0)]
#[case(5)]
fn known_trap_ids_pass_the_alu(#[case] id: u32) {
    assert_eq!(apply(AluFunction::Trap, 0x400, id), Ok(AluResult::default()));
}

#[test]
fn unknown_trap_id_is_reported() {
    assert_eq!(apply(AluFunction::Trap, 0, 99), Err(ExecuteError::UnknownTrap(99)));
}

#[test]
fn null_handler_answers_minus_one() {
    assert_eq!(lo(AluFunction::Trap, 0, 4), u32::MAX);
}

proptest! {
    #[test]
    fn add_then_sub_is_identity(a in any::<u32>(), b in any::<u32>()) {
        let sum = lo(AluFunction::Addu, a, b);
        prop_assert_eq!(lo(AluFunction::Subu, sum, b), a);
    }

    #[test]
    fn unsigned_divide_reconstructs_the_dividend(a in any::<u32>(), b in 1u32..) {
        let r = apply(AluFunction::Divu, a, b).unwrap();
        prop_assert!(r.hi < b);
        prop_assert_eq!(r.lo.wrapping_mul(b).wrapping_add(r.hi), a);
    }

    #[test]
    fn unsigned_multiply_matches_wide_product(a in any::<u32>(), b in any::<u32>()) {
        let r = apply(AluFunction::Multu, a, b).unwrap();
        let wide = u64::from(a) * u64::from(b);
        prop_assert_eq!((u64::from(r.hi) << 32) | u64::from(r.lo), wide);
    }
}
