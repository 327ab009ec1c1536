//! DLX Decoder Tests.

use pipesim_core::common::{MemWidth, Reg};
use pipesim_core::config::IsaMode;
use pipesim_core::core::units::bru::BranchCondition;
use pipesim_core::isa::decode;
use pipesim_core::isa::instruction::{AluFunction, Destination, Instruction, OpClass, Operand, SystemOp};
use pretty_assertions::assert_eq;

use crate::common::builder::dlx;

fn dx(word: u32) -> Instruction {
    decode(IsaMode::Dlx, word, 0).unwrap()
}

#[test]
fn register_form_writes_rd() {
    let inst = dx(dlx::add(3, 1, 2));
    assert_eq!(inst.alu, AluFunction::Add);
    assert_eq!(inst.src_a, Operand::Reg(Reg::Gpr(1)));
    assert_eq!(inst.src_b, Operand::Reg(Reg::Gpr(2)));
    assert_eq!(inst.dest, Destination::Reg(Reg::Gpr(3)));
    assert_eq!(dx(dlx::sgtu(3, 1, 2)).alu, AluFunction::Sgtu);
}

#[test]
fn immediate_form_writes_the_second_register_field() {
    let inst = dx(dlx::addi(4, 5, -2));
    assert_eq!(inst.class, OpClass::RegImm);
    assert_eq!(inst.imm, (-2i32) as u32);
    assert_eq!(inst.dest, Destination::Reg(Reg::Gpr(4)));
}

#[test]
fn lhi_loads_the_high_half() {
    let inst = dx(dlx::lhi(6, 0xBEEF));
    assert_eq!(inst.alu, AluFunction::Lui);
    assert_eq!(inst.imm, 0xBEEF);
}

#[test]
fn loads_and_stores() {
    let lw = dx(dlx::lw(2, 1, 4)).mem.unwrap();
    assert_eq!(lw.width, MemWidth::Word);
    let sw = dx(dlx::sw(2, 1, 4));
    assert_eq!(sw.mem.unwrap().data, Some(Reg::Gpr(2)));
    assert_eq!(sw.dest, Destination::None);
}

#[test]
fn zero_branches_test_one_register() {
    let inst = dx(dlx::beqz(7, -3));
    assert_eq!(inst.alu, AluFunction::Br);
    assert_eq!(inst.imm, (-3i32) as u32);
    let control = inst.control.unwrap();
    assert_eq!(control.condition, BranchCondition::Eq);
    assert_eq!(control.lhs, Operand::Reg(Reg::Gpr(7)));
    assert_eq!(control.rhs, Operand::Zero);
    assert_eq!(dx(dlx::bnez(7, 1)).control.unwrap().condition, BranchCondition::Ne);
}

#[test]
fn jump_offset_is_sign_extended_from_26_bits() {
    let inst = dx(dlx::j(-4));
    assert_eq!(inst.class, OpClass::Jump);
    assert_eq!(inst.imm, (-4i32) as u32);
}

#[test]
fn trap_zero_stops_and_writes_nothing() {
    let inst = dx(dlx::trap(0));
    assert_eq!(inst.system, Some(SystemOp::Trap));
    assert_eq!(inst.imm, 0);
    assert_eq!(inst.dest, Destination::None);
    assert_eq!(inst.sources().count(), 0);
    assert!(!inst.is_load_like());
}

#[test]
fn service_trap_passes_r14_and_returns_in_r1() {
    let inst = dx(dlx::trap(5));
    assert_eq!(inst.alu, AluFunction::Trap);
    assert_eq!(inst.src_a, Operand::Reg(Reg::Gpr(14)));
    assert_eq!(inst.dest, Destination::Reg(Reg::Gpr(1)));
    // The service answers in Memory, like a load.
    assert!(inst.is_load_like());
}

#[test]
fn nop_encodings() {
    assert!(dx(0).is_nop());
    assert!(dx(dlx::nop()).is_nop());
}
