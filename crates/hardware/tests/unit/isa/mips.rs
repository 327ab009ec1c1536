//! MIPS Decoder Tests.

use pipesim_core::common::Reg;
use pipesim_core::config::IsaMode;
use pipesim_core::core::units::bru::BranchCondition;
use pipesim_core::isa::decode;
use pipesim_core::isa::instruction::{AluFunction, Destination, Instruction, OpClass, Operand, SystemOp};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::mips;

fn mp(word: u32) -> Instruction {
    decode(IsaMode::Mips, word, 0).unwrap()
}

#[test]
fn addiu_writes_rt() {
    let inst = mp(mips::addiu(8, 9, -1));
    assert_eq!(inst.alu, AluFunction::Addu);
    assert_eq!(inst.src_a, Operand::Reg(Reg::Gpr(9)));
    assert_eq!(inst.imm, u32::MAX);
    assert_eq!(inst.dest, Destination::Reg(Reg::Gpr(8)));
}

#[test]
fn multiply_and_divide_write_hi_and_lo() {
    assert_eq!(mp(mips::mult(4, 5)).dest, Destination::HiLo);
    assert_eq!(mp(mips::div(4, 5)).dest, Destination::HiLo);
}

#[test]
fn hi_lo_moves_read_the_special_registers() {
    let mfhi = mp(mips::mfhi(3));
    assert_eq!(mfhi.src_a, Operand::Reg(Reg::Hi));
    assert_eq!(mfhi.dest, Destination::Reg(Reg::Gpr(3)));
    assert_eq!(mp(mips::mflo(3)).src_a, Operand::Reg(Reg::Lo));
}

#[test]
fn shift_amount_is_the_immediate() {
    let inst = mp(mips::sll(2, 3, 4));
    assert_eq!(inst.alu, AluFunction::Sll);
    assert_eq!(inst.src_a, Operand::Reg(Reg::Gpr(3)));
    assert_eq!(inst.imm, 4);
}

#[test]
fn zero_word_is_a_nop() {
    assert!(mp(0).is_nop());
}

#[rstest]
#[case(mips::beq(1, 2, 3), BranchCondition::Eq, false)]
#[case(mips::beql(1, 2, 3), BranchCondition::Eq, true)]
fn compare_branches(#[case] word: u32, #[case] condition: BranchCondition, #[case] likely: bool) {
    let inst = mp(word);
    assert_eq!(inst.class, OpClass::Branch);
    assert_eq!(inst.alu, AluFunction::Br);
    assert_eq!((inst.src_a, inst.src_b), (Operand::NextPc, Operand::Immediate));
    assert_eq!(inst.imm, 3);
    let control = inst.control.unwrap();
    assert_eq!(control.condition, condition);
    assert_eq!(control.likely, likely);
}

#[test]
fn and_link_branches_write_ra() {
    let inst = mp(mips::bgezal(4, 2));
    let control = inst.control.unwrap();
    assert!(control.link);
    assert_eq!(control.condition, BranchCondition::Ge);
    assert_eq!(inst.dest, Destination::Reg(Reg::Gpr(31)));
}

#[test]
fn jumps_use_the_region_of_the_next_pc() {
    let j = mp(mips::j(0x0040_0010));
    assert_eq!(j.alu, AluFunction::Ba);
    assert_eq!(j.imm, 0x0010_0004);
    assert_eq!(j.dest, Destination::None);

    let jal = mp(mips::jal(0x0040_0010));
    assert_eq!(jal.dest, Destination::Reg(Reg::Gpr(31)));

    assert_eq!(mp(mips::jr(31)).class, OpClass::JumpRegister);
}

#[test]
fn conditional_trap_has_no_destination() {
    let inst = mp(mips::teq(1, 2));
    assert_eq!(inst.alu, AluFunction::Teq);
    assert_eq!(inst.dest, Destination::None);
}

#[test]
fn syscall_and_break() {
    assert_eq!(mp(mips::syscall()).system, Some(SystemOp::Syscall));
    assert_eq!(mp(mips::brk()).system, Some(SystemOp::Break));
}

#[test]
fn riscv_only_opcode_is_unknown_in_mips_mode() {
    // OP_LUI in RISC-V; primary opcode 0 with an unused function code in MIPS.
    assert!(decode(IsaMode::Mips, 0x0000_0037, 0).is_err());
}
