//! RV32 Instruction Decoder.
//!
//! Decodes RV32I, the M extension, the word-sized A extension, fences and the
//! ECALL/EBREAK system instructions into [`Instruction`] descriptors. It extracts
//! register indices and function codes and sign-extends the immediate of every
//! format (I, S, B, U, J).

/// Opcode and function-code constants.
pub mod opcodes;

use self::opcodes::{funct3, funct5, funct7};
use crate::common::data::MemWidth;
use crate::common::reg::Reg;
use crate::core::units::bru::BranchCondition;
use crate::isa::instruction::{
    AluFunction, AmoOp, ControlFlow, Instruction, InstructionBits, MemAccess, MemKind, OpClass,
    Operand, SystemOp,
};

/// I-type immediate (bits 31-20), sign-extended.
const fn imm_i(word: u32) -> u32 {
    ((word as i32) >> 20) as u32
}

/// S-type immediate (bits 31-25 and 11-7), sign-extended.
const fn imm_s(word: u32) -> u32 {
    ((((word & 0xFE00_0000) as i32) >> 20) as u32) | ((word >> 7) & 0x1F)
}

/// B-type immediate, sign-extended, bit 0 always clear.
const fn imm_b(word: u32) -> u32 {
    ((((word as i32) >> 19) as u32) & 0xFFFF_F000)
        | ((word << 4) & 0x800)
        | ((word >> 20) & 0x7E0)
        | ((word >> 7) & 0x1E)
}

/// U-type immediate, already in the upper 20 bits.
const fn imm_u(word: u32) -> u32 {
    word & 0xFFFF_F000
}

/// J-type immediate, sign-extended, bit 0 always clear.
const fn imm_j(word: u32) -> u32 {
    ((((word as i32) >> 11) as u32) & 0xFFF0_0000)
        | (word & 0x000F_F000)
        | ((word >> 9) & 0x800)
        | ((word >> 20) & 0x7FE)
}

const fn reg(n: u8) -> Operand {
    Operand::Reg(Reg::Gpr(n))
}

/// Decodes one RV32 instruction word.
///
/// # Arguments
///
/// * `word` - The raw instruction. The all-zero word decodes to a NOP.
///
/// # Returns
///
/// The descriptor, or `None` if the encoding is not supported.
pub fn decode(word: u32) -> Option<Instruction> {
    if word == 0 {
        return Some(Instruction::nop(word));
    }
    let (rd, rs1, rs2) = (word.rd(), word.rs1(), word.rs2());
    let f3 = word.funct3();
    let f7 = word.funct7();

    let inst = match word.opcode() {
        opcodes::OP_LUI => Instruction::new(word, "lui", OpClass::UpperImmediate, AluFunction::Add)
            .operands(Operand::Zero, Operand::Immediate)
            .imm(imm_u(word))
            .dest_gpr(rd),

        opcodes::OP_AUIPC => {
            Instruction::new(word, "auipc", OpClass::UpperImmediate, AluFunction::Add)
                .operands(Operand::Pc, Operand::Immediate)
                .imm(imm_u(word))
                .dest_gpr(rd)
        }

        opcodes::OP_JAL => Instruction::new(word, "jal", OpClass::Jump, AluFunction::Add)
            .operands(Operand::Pc, Operand::Immediate)
            .imm(imm_j(word))
            .dest_gpr(rd)
            .control(unconditional(true)),

        opcodes::OP_JALR if f3 == funct3::F0 => {
            Instruction::new(word, "jalr", OpClass::JumpRegister, AluFunction::Add)
                .operands(reg(rs1), Operand::Immediate)
                .imm(imm_i(word))
                .dest_gpr(rd)
                .control(unconditional(true))
        }

        opcodes::OP_BRANCH => {
            let (mnemonic, condition) = match f3 {
                funct3::F0 => ("beq", BranchCondition::Eq),
                funct3::F1 => ("bne", BranchCondition::Ne),
                funct3::F4 => ("blt", BranchCondition::Lt),
                funct3::F5 => ("bge", BranchCondition::Ge),
                funct3::F6 => ("bltu", BranchCondition::Ltu),
                funct3::F7 => ("bgeu", BranchCondition::Geu),
                _ => return None,
            };
            Instruction::new(word, mnemonic, OpClass::Branch, AluFunction::Add)
                .operands(Operand::Pc, Operand::Immediate)
                .imm(imm_b(word))
                .control(ControlFlow {
                    condition,
                    lhs: reg(rs1),
                    rhs: reg(rs2),
                    likely: false,
                    link: false,
                })
        }

        opcodes::OP_LOAD => {
            let (mnemonic, width, signed) = match f3 {
                funct3::F0 => ("lb", MemWidth::Byte, true),
                funct3::F1 => ("lh", MemWidth::Half, true),
                funct3::F2 => ("lw", MemWidth::Word, true),
                funct3::F4 => ("lbu", MemWidth::Byte, false),
                funct3::F5 => ("lhu", MemWidth::Half, false),
                _ => return None,
            };
            Instruction::new(word, mnemonic, OpClass::Load, AluFunction::Add)
                .operands(reg(rs1), Operand::Immediate)
                .imm(imm_i(word))
                .dest_gpr(rd)
                .mem(MemAccess {
                    kind: MemKind::Load,
                    width,
                    signed,
                    data: None,
                })
        }

        opcodes::OP_STORE => {
            let (mnemonic, width) = match f3 {
                funct3::F0 => ("sb", MemWidth::Byte),
                funct3::F1 => ("sh", MemWidth::Half),
                funct3::F2 => ("sw", MemWidth::Word),
                _ => return None,
            };
            Instruction::new(word, mnemonic, OpClass::Store, AluFunction::Add)
                .operands(reg(rs1), Operand::Immediate)
                .imm(imm_s(word))
                .mem(MemAccess {
                    kind: MemKind::Store,
                    width,
                    signed: false,
                    data: Some(Reg::Gpr(rs2)),
                })
        }

        opcodes::OP_IMM => {
            let (mnemonic, alu, imm) = match (f3, f7) {
                (funct3::F0, _) => ("addi", AluFunction::Add, imm_i(word)),
                (funct3::F2, _) => ("slti", AluFunction::Slt, imm_i(word)),
                (funct3::F3, _) => ("sltiu", AluFunction::Sltu, imm_i(word)),
                (funct3::F4, _) => ("xori", AluFunction::Xor, imm_i(word)),
                (funct3::F6, _) => ("ori", AluFunction::Or, imm_i(word)),
                (funct3::F7, _) => ("andi", AluFunction::And, imm_i(word)),
                (funct3::F1, funct7::DEFAULT) => ("slli", AluFunction::Sll, u32::from(rs2)),
                (funct3::F5, funct7::DEFAULT) => ("srli", AluFunction::Srl, u32::from(rs2)),
                (funct3::F5, funct7::ALT) => ("srai", AluFunction::Sra, u32::from(rs2)),
                _ => return None,
            };
            Instruction::new(word, mnemonic, OpClass::RegImm, alu)
                .operands(reg(rs1), Operand::Immediate)
                .imm(imm)
                .dest_gpr(rd)
        }

        opcodes::OP_REG => {
            let (mnemonic, alu) = match (f7, f3) {
                (funct7::DEFAULT, funct3::F0) => ("add", AluFunction::Add),
                (funct7::ALT, funct3::F0) => ("sub", AluFunction::Sub),
                (funct7::DEFAULT, funct3::F1) => ("sll", AluFunction::Sll),
                (funct7::DEFAULT, funct3::F2) => ("slt", AluFunction::Slt),
                (funct7::DEFAULT, funct3::F3) => ("sltu", AluFunction::Sltu),
                (funct7::DEFAULT, funct3::F4) => ("xor", AluFunction::Xor),
                (funct7::DEFAULT, funct3::F5) => ("srl", AluFunction::Srl),
                (funct7::ALT, funct3::F5) => ("sra", AluFunction::Sra),
                (funct7::DEFAULT, funct3::F6) => ("or", AluFunction::Or),
                (funct7::DEFAULT, funct3::F7) => ("and", AluFunction::And),
                (funct7::MULDIV, funct3::F0) => ("mul", AluFunction::Mult),
                (funct7::MULDIV, funct3::F1) => ("mulh", AluFunction::Mulh),
                (funct7::MULDIV, funct3::F2) => ("mulhsu", AluFunction::Mulhsu),
                (funct7::MULDIV, funct3::F3) => ("mulhu", AluFunction::Mulhu),
                (funct7::MULDIV, funct3::F4) => ("div", AluFunction::Div),
                (funct7::MULDIV, funct3::F5) => ("divu", AluFunction::Divu),
                (funct7::MULDIV, funct3::F6) => ("rem", AluFunction::Rem),
                (funct7::MULDIV, funct3::F7) => ("remu", AluFunction::Remu),
                _ => return None,
            };
            Instruction::new(word, mnemonic, OpClass::RegReg, alu)
                .operands(reg(rs1), reg(rs2))
                .dest_gpr(rd)
        }

        opcodes::OP_AMO if f3 == funct3::F2 => decode_amo(word, rd, rs1, rs2)?,

        opcodes::OP_MISC_MEM if f3 == funct3::F0 || f3 == funct3::F1 => {
            let mnemonic = if f3 == funct3::F0 { "fence" } else { "fence.i" };
            Instruction::new(word, mnemonic, OpClass::Fence, AluFunction::None)
        }

        opcodes::OP_SYSTEM if f3 == funct3::F0 && rd == 0 && rs1 == 0 => {
            match word >> 20 {
                opcodes::SYS_ECALL => {
                    Instruction::new(word, "ecall", OpClass::System, AluFunction::Syscall)
                        .system(SystemOp::Syscall)
                }
                opcodes::SYS_EBREAK => {
                    Instruction::new(word, "ebreak", OpClass::System, AluFunction::Break)
                        .system(SystemOp::Break)
                }
                _ => return None,
            }
        }

        _ => return None,
    };
    Some(inst)
}

fn decode_amo(word: u32, rd: u8, rs1: u8, rs2: u8) -> Option<Instruction> {
    let (mnemonic, kind) = match word >> 27 {
        funct5::LR if rs2 == 0 => ("lr.w", MemKind::LoadReserved),
        funct5::SC => ("sc.w", MemKind::StoreConditional),
        funct5::AMOSWAP => ("amoswap.w", MemKind::Amo(AmoOp::Swap)),
        funct5::AMOADD => ("amoadd.w", MemKind::Amo(AmoOp::Add)),
        funct5::AMOXOR => ("amoxor.w", MemKind::Amo(AmoOp::Xor)),
        funct5::AMOAND => ("amoand.w", MemKind::Amo(AmoOp::And)),
        funct5::AMOOR => ("amoor.w", MemKind::Amo(AmoOp::Or)),
        funct5::AMOMIN => ("amomin.w", MemKind::Amo(AmoOp::Min)),
        funct5::AMOMAX => ("amomax.w", MemKind::Amo(AmoOp::Max)),
        funct5::AMOMINU => ("amominu.w", MemKind::Amo(AmoOp::Minu)),
        funct5::AMOMAXU => ("amomaxu.w", MemKind::Amo(AmoOp::Maxu)),
        _ => return None,
    };
    let data = (kind != MemKind::LoadReserved).then_some(Reg::Gpr(rs2));
    Some(
        Instruction::new(word, mnemonic, OpClass::Atomic, AluFunction::Add)
            .operands(reg(rs1), Operand::Zero)
            .dest_gpr(rd)
            .mem(MemAccess {
                kind,
                width: MemWidth::Word,
                signed: true,
                data,
            }),
    )
}

const fn unconditional(link: bool) -> ControlFlow {
    ControlFlow {
        condition: BranchCondition::Always,
        lhs: Operand::Zero,
        rhs: Operand::Zero,
        likely: false,
        link,
    }
}
