//! RISC-V Decoder Tests.

use pipesim_core::common::error::PipelineError;
use pipesim_core::common::{MemWidth, Reg};
use pipesim_core::config::IsaMode;
use pipesim_core::core::units::bru::BranchCondition;
use pipesim_core::isa::decode;
use pipesim_core::isa::instruction::{
    AluFunction, AmoOp, Destination, MemKind, OpClass, Operand, SystemOp,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::builder::riscv;

fn rv(word: u32) -> pipesim_core::isa::instruction::Instruction {
    decode(IsaMode::RiscV, word, 0x100).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Arithmetic
// ══════════════════════════════════════════════════════════

#[test]
fn addi_sign_extends_its_immediate() {
    let inst = rv(riscv::addi(5, 6, -3));
    assert_eq!(inst.mnemonic, "addi");
    assert_eq!(inst.class, OpClass::RegImm);
    assert_eq!(inst.alu, AluFunction::Add);
    assert_eq!(inst.src_a, Operand::Reg(Reg::Gpr(6)));
    assert_eq!(inst.src_b, Operand::Immediate);
    assert_eq!(inst.imm, (-3i32) as u32);
    assert_eq!(inst.dest, Destination::Reg(Reg::Gpr(5)));
}

#[test]
fn register_forms_read_both_sources() {
    let inst = rv(riscv::sub(1, 2, 3));
    assert_eq!(inst.alu, AluFunction::Sub);
    assert_eq!(inst.sources().collect::<Vec<_>>(), vec![Reg::Gpr(2), Reg::Gpr(3)]);

    assert_eq!(rv(riscv::mul(1, 2, 3)).alu, AluFunction::Mult);
    assert_eq!(rv(riscv::div(1, 2, 3)).alu, AluFunction::Div);
}

#[test]
fn lui_places_the_upper_immediate() {
    let inst = rv(riscv::lui(7, 0x12345));
    assert_eq!(inst.class, OpClass::UpperImmediate);
    assert_eq!(inst.imm, 0x1234_5000);
    assert_eq!(inst.dest, Destination::Reg(Reg::Gpr(7)));
}

#[test]
fn zero_word_is_a_nop() {
    let inst = rv(0);
    assert!(inst.is_nop());
    assert_eq!(inst.dest, Destination::None);
}

// ══════════════════════════════════════════════════════════
// 2. Memory
// ══════════════════════════════════════════════════════════

#[test]
fn loads_carry_width_and_signedness() {
    let lw = rv(riscv::lw(1, 2, 8));
    let access = lw.mem.unwrap();
    assert_eq!(access.kind, MemKind::Load);
    assert_eq!(access.width, MemWidth::Word);
    assert!(lw.is_load_like());

    let lbu = rv(riscv::lbu(1, 2, 0)).mem.unwrap();
    assert_eq!(lbu.width, MemWidth::Byte);
    assert!(!lbu.signed);
}

#[test]
fn store_splits_its_offset_and_names_the_data_register() {
    let inst = rv(riscv::sw(9, 2, -4));
    assert_eq!(inst.class, OpClass::Store);
    assert_eq!(inst.imm, (-4i32) as u32);
    assert_eq!(inst.dest, Destination::None);
    let access = inst.mem.unwrap();
    assert_eq!(access.data, Some(Reg::Gpr(9)));
    assert!(!inst.is_load_like());
}

#[test]
fn atomics_read_modify_write_a_word() {
    let inst = rv(riscv::amoadd_w(3, 4, 5));
    assert_eq!(inst.class, OpClass::Atomic);
    assert_eq!(inst.src_a, Operand::Reg(Reg::Gpr(5)));
    let access = inst.mem.unwrap();
    assert_eq!(access.kind, MemKind::Amo(AmoOp::Add));
    assert_eq!(access.data, Some(Reg::Gpr(4)));
    assert!(inst.is_load_like());

    assert_eq!(rv(riscv::amoswap_w(3, 4, 5)).mem.unwrap().kind, MemKind::Amo(AmoOp::Swap));
}

// ══════════════════════════════════════════════════════════
// 3. Control flow and system
// ══════════════════════════════════════════════════════════

#[test]
fn branch_compares_two_registers() {
    let inst = rv(riscv::bne(1, 2, -8));
    assert_eq!(inst.class, OpClass::Branch);
    assert_eq!(inst.imm, (-8i32) as u32);
    let control = inst.control.unwrap();
    assert_eq!(control.condition, BranchCondition::Ne);
    assert_eq!(control.lhs, Operand::Reg(Reg::Gpr(1)));
    assert_eq!(control.rhs, Operand::Reg(Reg::Gpr(2)));
    assert!(!control.likely);
    assert_eq!(inst.dest, Destination::None);
}

#[test]
fn jal_links_into_rd() {
    let inst = rv(riscv::jal(1, 2048));
    assert_eq!(inst.class, OpClass::Jump);
    assert_eq!(inst.imm, 2048);
    assert!(inst.control.unwrap().link);
    assert_eq!(inst.dest, Destination::Reg(Reg::Gpr(1)));
}

#[test]
fn jalr_is_a_register_jump() {
    let inst = rv(riscv::jalr(0, 1, 0));
    assert_eq!(inst.class, OpClass::JumpRegister);
    assert_eq!(inst.src_a, Operand::Reg(Reg::Gpr(1)));
    assert!(inst.is_control());
}

#[test]
fn ecall_and_ebreak_are_system_operations() {
    assert_eq!(rv(riscv::ecall()).system, Some(SystemOp::Syscall));
    assert_eq!(rv(riscv::ebreak()).system, Some(SystemOp::Break));
}

#[test]
fn unknown_word_reports_word_and_address() {
    let word = 0xFFFF_FFFF;
    assert_eq!(
        decode(IsaMode::RiscV, word, 0x40),
        Err(PipelineError::UnknownInstruction { word, pc: 0x40 })
    );
}

proptest! {
    #[test]
    fn branch_offsets_survive_encoding(half in -2048i32..2048) {
        let offset = half * 2;
        let inst = rv(riscv::beq(1, 2, offset));
        prop_assert_eq!(inst.imm, offset as u32);
    }

    #[test]
    fn jal_offsets_survive_encoding(half in -(1i32 << 19)..(1i32 << 19)) {
        let offset = half * 2;
        prop_assert_eq!(rv(riscv::jal(0, offset)).imm, offset as u32);
    }
}
