//! DLX Instruction Decoder.
//!
//! Decodes the integer DLX instruction set:
//! 1. **R-type (SPECIAL):** Arithmetic, logic, shifts, the set family (signed and the
//!    sign-clearing unsigned forms) and multiply/divide.
//! 2. **I-type:** Immediates including the set family, `LHI`, loads, stores, `BEQZ`/`BNEZ`,
//!    `JR`/`JALR`.
//! 3. **J-type:** `J`, `JAL` and `TRAP`.
//!
//! Branch and jump offsets count words and are applied with `BR` to the next PC.

/// Opcode and function-code constants.
pub mod opcodes;

use self::opcodes::{op, special};
use crate::common::constants::{DLX_TRAP_ARG, DLX_TRAP_RESULT, LINK_REGISTER};
use crate::common::data::MemWidth;
use crate::common::reg::Reg;
use crate::core::units::bru::BranchCondition;
use crate::isa::instruction::{
    AluFunction, ControlFlow, Instruction, InstructionBits, MemAccess, MemKind, OpClass, Operand,
    SystemOp,
};

const fn reg(n: u8) -> Operand {
    Operand::Reg(Reg::Gpr(n))
}

/// 26-bit J-type offset, sign-extended.
const fn offset26(word: u32) -> u32 {
    (((word << 6) as i32) >> 6) as u32
}

/// Decodes one DLX instruction word.
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
    let rs1 = word.rs_mips();
    let rd = word.rt_mips();

    let inst = match word.op_mips() {
        op::SPECIAL => decode_special(word)?,
        op::NOP => Instruction::nop(word),

        code @ (op::J | op::JAL) => {
            let link = code == op::JAL;
            let base = Instruction::new(word, if link { "jal" } else { "j" }, OpClass::Jump, AluFunction::Br)
                .operands(Operand::NextPc, Operand::Immediate)
                .imm(offset26(word))
                .control(always(link));
            if link { base.dest_gpr(LINK_REGISTER) } else { base }
        }

        code @ (op::JR | op::JALR) => {
            let link = code == op::JALR;
            let base = Instruction::new(word, if link { "jalr" } else { "jr" }, OpClass::JumpRegister, AluFunction::Add)
                .operands(reg(rs1), Operand::Zero)
                .control(always(link));
            if link { base.dest_gpr(LINK_REGISTER) } else { base }
        }

        code @ (op::BEQZ | op::BNEZ) => {
            let (mnemonic, condition) = if code == op::BEQZ {
                ("beqz", BranchCondition::Eq)
            } else {
                ("bnez", BranchCondition::Ne)
            };
            Instruction::new(word, mnemonic, OpClass::Branch, AluFunction::Br)
                .operands(Operand::NextPc, Operand::Immediate)
                .imm(word.imm16_signed())
                .control(ControlFlow {
                    condition,
                    lhs: reg(rs1),
                    rhs: Operand::Zero,
                    likely: false,
                    link: false,
                })
        }

        op::TRAP => {
            let id = word.target26();
            let base = Instruction::new(word, "trap", OpClass::System, AluFunction::Trap)
                .imm(id)
                .system(SystemOp::Trap);
            if id == 0 {
                base.operands(Operand::Zero, Operand::Immediate)
            } else {
                base.operands(reg(DLX_TRAP_ARG), Operand::Immediate)
                    .dest_gpr(DLX_TRAP_RESULT)
            }
        }

        op::LHI => Instruction::new(word, "lhi", OpClass::UpperImmediate, AluFunction::Lui)
            .operands(Operand::Zero, Operand::Immediate)
            .imm(word.imm16_unsigned())
            .dest_gpr(rd),

        code @ (op::LB | op::LH | op::LW | op::LBU | op::LHU) => {
            let (mnemonic, width, signed) = match code {
                op::LB => ("lb", MemWidth::Byte, true),
                op::LH => ("lh", MemWidth::Half, true),
                op::LW => ("lw", MemWidth::Word, true),
                op::LBU => ("lbu", MemWidth::Byte, false),
                _ => ("lhu", MemWidth::Half, false),
            };
            Instruction::new(word, mnemonic, OpClass::Load, AluFunction::Add)
                .operands(reg(rs1), Operand::Immediate)
                .imm(word.imm16_signed())
                .dest_gpr(rd)
                .mem(MemAccess {
                    kind: MemKind::Load,
                    width,
                    signed,
                    data: None,
                })
        }

        code @ (op::SB | op::SH | op::SW) => {
            let (mnemonic, width) = match code {
                op::SB => ("sb", MemWidth::Byte),
                op::SH => ("sh", MemWidth::Half),
                _ => ("sw", MemWidth::Word),
            };
            Instruction::new(word, mnemonic, OpClass::Store, AluFunction::Add)
                .operands(reg(rs1), Operand::Immediate)
                .imm(word.imm16_signed())
                .mem(MemAccess {
                    kind: MemKind::Store,
                    width,
                    signed: false,
                    data: Some(Reg::Gpr(rd)),
                })
        }

        code => {
            let (mnemonic, alu, imm) = immediate_function(code, word)?;
            Instruction::new(word, mnemonic, OpClass::RegImm, alu)
                .operands(reg(rs1), Operand::Immediate)
                .imm(imm)
                .dest_gpr(rd)
        }
    };
    Some(inst)
}

fn immediate_function(code: u32, word: u32) -> Option<(&'static str, AluFunction, u32)> {
    let signed = word.imm16_signed();
    let unsigned = word.imm16_unsigned();
    Some(match code {
        op::ADDI => ("addi", AluFunction::Add, signed),
        op::ADDUI => ("addui", AluFunction::Addu, unsigned),
        op::SUBI => ("subi", AluFunction::Sub, signed),
        op::SUBUI => ("subui", AluFunction::Subu, unsigned),
        op::ANDI => ("andi", AluFunction::And, unsigned),
        op::ORI => ("ori", AluFunction::Or, unsigned),
        op::XORI => ("xori", AluFunction::Xor, unsigned),
        op::SLLI => ("slli", AluFunction::Sll, unsigned),
        op::SRLI => ("srli", AluFunction::Srl, unsigned),
        op::SRAI => ("srai", AluFunction::Sra, unsigned),
        op::SEQI => ("seqi", AluFunction::Seq, signed),
        op::SNEI => ("snei", AluFunction::Sne, signed),
        op::SLTI => ("slti", AluFunction::Slt, signed),
        op::SGTI => ("sgti", AluFunction::Sgt, signed),
        op::SLEI => ("slei", AluFunction::Sle, signed),
        op::SGEI => ("sgei", AluFunction::Sge, signed),
        op::SEQUI => ("sequi", AluFunction::Sequ, unsigned),
        op::SNEUI => ("sneui", AluFunction::Sneu, unsigned),
        op::SLTUI => ("sltui", AluFunction::Sltu, unsigned),
        op::SGTUI => ("sgtui", AluFunction::Sgtu, unsigned),
        op::SLEUI => ("sleui", AluFunction::Sleu, unsigned),
        op::SGEUI => ("sgeui", AluFunction::Sgeu, unsigned),
        _ => return None,
    })
}

fn decode_special(word: u32) -> Option<Instruction> {
    let (rs1, rs2, rd) = (word.rs_mips(), word.rt_mips(), word.rd_mips());
    let (mnemonic, alu) = match word.funct_mips() {
        special::SLL => ("sll", AluFunction::Sll),
        special::SRL => ("srl", AluFunction::Srl),
        special::SRA => ("sra", AluFunction::Sra),
        special::ADD => ("add", AluFunction::Add),
        special::ADDU => ("addu", AluFunction::Addu),
        special::SUB => ("sub", AluFunction::Sub),
        special::SUBU => ("subu", AluFunction::Subu),
        special::AND => ("and", AluFunction::And),
        special::OR => ("or", AluFunction::Or),
        special::XOR => ("xor", AluFunction::Xor),
        special::SEQ => ("seq", AluFunction::Seq),
        special::SNE => ("sne", AluFunction::Sne),
        special::SLT => ("slt", AluFunction::Slt),
        special::SGT => ("sgt", AluFunction::Sgt),
        special::SLE => ("sle", AluFunction::Sle),
        special::SGE => ("sge", AluFunction::Sge),
        special::SEQU => ("sequ", AluFunction::Sequ),
        special::SNEU => ("sneu", AluFunction::Sneu),
        special::SLTU => ("sltu", AluFunction::Sltu),
        special::SGTU => ("sgtu", AluFunction::Sgtu),
        special::SLEU => ("sleu", AluFunction::Sleu),
        special::SGEU => ("sgeu", AluFunction::Sgeu),
        special::MULT => ("mult", AluFunction::Mult),
        special::MULTU => ("multu", AluFunction::Multu),
        special::DIV => ("div", AluFunction::Div),
        special::DIVU => ("divu", AluFunction::Divu),
        _ => return None,
    };
    Some(
        Instruction::new(word, mnemonic, OpClass::RegReg, alu)
            .operands(reg(rs1), reg(rs2))
            .dest_gpr(rd),
    )
}

const fn always(link: bool) -> ControlFlow {
    ControlFlow {
        condition: BranchCondition::Always,
        lhs: Operand::Zero,
        rhs: Operand::Zero,
        likely: false,
        link,
    }
}
