//! MIPS Instruction Decoder.
//!
//! Decodes the MIPS-I integer subset used by the legacy mode:
//! 1. **SPECIAL:** Shifts, register jumps, SYSCALL/BREAK, HI/LO moves, multiply/divide,
//!    three-register arithmetic and the conditional traps.
//! 2. **REGIMM:** Sign-test branches, their likely and and-link forms, immediate traps.
//! 3. **Primary opcodes:** J/JAL, compare branches (plus likely forms), immediates, loads
//!    and stores.
//!
//! Absolute jumps compute their target with `BA`, relative branches with `BR`.

/// Opcode and function-code constants.
pub mod opcodes;

use self::opcodes::{op, regimm, special};
use crate::common::constants::LINK_REGISTER;
use crate::common::data::MemWidth;
use crate::common::reg::Reg;
use crate::core::units::bru::BranchCondition;
use crate::isa::instruction::{
    AluFunction, ControlFlow, Destination, Instruction, InstructionBits, MemAccess, MemKind,
    OpClass, Operand, SystemOp,
};

const fn reg(n: u8) -> Operand {
    Operand::Reg(Reg::Gpr(n))
}

const fn branch(condition: BranchCondition, lhs: Operand, rhs: Operand, likely: bool) -> ControlFlow {
    ControlFlow {
        condition,
        lhs,
        rhs,
        likely,
        link: false,
    }
}

/// Decodes one MIPS instruction word.
///
/// # Arguments
///
/// * `word` - The raw instruction. The all-zero word (`sll $0, $0, 0`) decodes to a NOP.
///
/// # Returns
///
/// The descriptor, or `None` if the encoding is not supported.
pub fn decode(word: u32) -> Option<Instruction> {
    if word == 0 {
        return Some(Instruction::nop(word));
    }
    let (rs, rt) = (word.rs_mips(), word.rt_mips());

    let inst = match word.op_mips() {
        op::SPECIAL => decode_special(word)?,
        op::REGIMM => decode_regimm(word)?,

        op::J | op::JAL => {
            let link = word.op_mips() == op::JAL;
            let base = Instruction::new(word, if link { "jal" } else { "j" }, OpClass::Jump, AluFunction::Ba)
                .operands(Operand::NextPc, Operand::Immediate)
                .imm(word.target26())
                .control(ControlFlow {
                    condition: BranchCondition::Always,
                    lhs: Operand::Zero,
                    rhs: Operand::Zero,
                    likely: false,
                    link,
                });
            if link { base.dest_gpr(LINK_REGISTER) } else { base }
        }

        code @ (op::BEQ | op::BNE | op::BLEZ | op::BGTZ | op::BEQL | op::BNEL | op::BLEZL | op::BGTZL) => {
            let (mnemonic, control) = match code {
                op::BEQ => ("beq", branch(BranchCondition::Eq, reg(rs), reg(rt), false)),
                op::BNE => ("bne", branch(BranchCondition::Ne, reg(rs), reg(rt), false)),
                op::BLEZ => ("blez", branch(BranchCondition::Ge, Operand::Zero, reg(rs), false)),
                op::BGTZ => ("bgtz", branch(BranchCondition::Lt, Operand::Zero, reg(rs), false)),
                op::BEQL => ("beql", branch(BranchCondition::Eq, reg(rs), reg(rt), true)),
                op::BNEL => ("bnel", branch(BranchCondition::Ne, reg(rs), reg(rt), true)),
                op::BLEZL => ("blezl", branch(BranchCondition::Ge, Operand::Zero, reg(rs), true)),
                _ => ("bgtzl", branch(BranchCondition::Lt, Operand::Zero, reg(rs), true)),
            };
            Instruction::new(word, mnemonic, OpClass::Branch, AluFunction::Br)
                .operands(Operand::NextPc, Operand::Immediate)
                .imm(word.imm16_signed())
                .control(control)
        }

        op::LUI => Instruction::new(word, "lui", OpClass::UpperImmediate, AluFunction::Lui)
            .operands(Operand::Zero, Operand::Immediate)
            .imm(word.imm16_unsigned())
            .dest_gpr(rt),

        code @ (op::ADDI | op::ADDIU | op::SLTI | op::SLTIU | op::ANDI | op::ORI | op::XORI) => {
            let (mnemonic, alu, imm) = match code {
                op::ADDI => ("addi", AluFunction::Add, word.imm16_signed()),
                op::ADDIU => ("addiu", AluFunction::Addu, word.imm16_signed()),
                op::SLTI => ("slti", AluFunction::Slt, word.imm16_signed()),
                op::SLTIU => ("sltiu", AluFunction::Sltu, word.imm16_signed()),
                op::ANDI => ("andi", AluFunction::And, word.imm16_unsigned()),
                op::ORI => ("ori", AluFunction::Or, word.imm16_unsigned()),
                _ => ("xori", AluFunction::Xor, word.imm16_unsigned()),
            };
            Instruction::new(word, mnemonic, OpClass::RegImm, alu)
                .operands(reg(rs), Operand::Immediate)
                .imm(imm)
                .dest_gpr(rt)
        }

        code @ (op::LB | op::LH | op::LW | op::LBU | op::LHU) => {
            let (mnemonic, width, signed) = match code {
                op::LB => ("lb", MemWidth::Byte, true),
                op::LH => ("lh", MemWidth::Half, true),
                op::LW => ("lw", MemWidth::Word, true),
                op::LBU => ("lbu", MemWidth::Byte, false),
                _ => ("lhu", MemWidth::Half, false),
            };
            Instruction::new(word, mnemonic, OpClass::Load, AluFunction::Add)
                .operands(reg(rs), Operand::Immediate)
                .imm(word.imm16_signed())
                .dest_gpr(rt)
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
                .operands(reg(rs), Operand::Immediate)
                .imm(word.imm16_signed())
                .mem(MemAccess {
                    kind: MemKind::Store,
                    width,
                    signed: false,
                    data: Some(Reg::Gpr(rt)),
                })
        }

        _ => return None,
    };
    Some(inst)
}

fn decode_special(word: u32) -> Option<Instruction> {
    let (rs, rt, rd) = (word.rs_mips(), word.rt_mips(), word.rd_mips());
    let funct = word.funct_mips();

    let inst = match funct {
        special::SLL | special::SRL | special::SRA => {
            let (mnemonic, alu) = match funct {
                special::SLL => ("sll", AluFunction::Sll),
                special::SRL => ("srl", AluFunction::Srl),
                _ => ("sra", AluFunction::Sra),
            };
            Instruction::new(word, mnemonic, OpClass::RegImm, alu)
                .operands(reg(rt), Operand::Immediate)
                .imm(word.shamt_mips())
                .dest_gpr(rd)
        }

        special::SLLV | special::SRLV | special::SRAV => {
            let (mnemonic, alu) = match funct {
                special::SLLV => ("sllv", AluFunction::Sllv),
                special::SRLV => ("srlv", AluFunction::Srlv),
                _ => ("srav", AluFunction::Srav),
            };
            Instruction::new(word, mnemonic, OpClass::RegReg, alu)
                .operands(reg(rt), reg(rs))
                .dest_gpr(rd)
        }

        special::JR | special::JALR => {
            let link = funct == special::JALR;
            let base = Instruction::new(word, if link { "jalr" } else { "jr" }, OpClass::JumpRegister, AluFunction::Add)
                .operands(reg(rs), Operand::Zero)
                .control(ControlFlow {
                    condition: BranchCondition::Always,
                    lhs: Operand::Zero,
                    rhs: Operand::Zero,
                    likely: false,
                    link,
                });
            if link { base.dest_gpr(rd) } else { base }
        }

        special::SYSCALL => Instruction::new(word, "syscall", OpClass::System, AluFunction::Syscall)
            .system(SystemOp::Syscall),
        special::BREAK => {
            Instruction::new(word, "break", OpClass::System, AluFunction::Break).system(SystemOp::Break)
        }

        special::MFHI => Instruction::new(word, "mfhi", OpClass::RegReg, AluFunction::Addu)
            .operands(Operand::Reg(Reg::Hi), Operand::Zero)
            .dest_gpr(rd),
        special::MFLO => Instruction::new(word, "mflo", OpClass::RegReg, AluFunction::Addu)
            .operands(Operand::Reg(Reg::Lo), Operand::Zero)
            .dest_gpr(rd),
        special::MTHI => Instruction::new(word, "mthi", OpClass::RegReg, AluFunction::Addu)
            .operands(reg(rs), Operand::Zero)
            .dest(Destination::Reg(Reg::Hi)),
        special::MTLO => Instruction::new(word, "mtlo", OpClass::RegReg, AluFunction::Addu)
            .operands(reg(rs), Operand::Zero)
            .dest(Destination::Reg(Reg::Lo)),

        special::MULT | special::MULTU | special::DIV | special::DIVU => {
            let (mnemonic, alu) = match funct {
                special::MULT => ("mult", AluFunction::Mult),
                special::MULTU => ("multu", AluFunction::Multu),
                special::DIV => ("div", AluFunction::Div),
                _ => ("divu", AluFunction::Divu),
            };
            Instruction::new(word, mnemonic, OpClass::RegReg, alu)
                .operands(reg(rs), reg(rt))
                .dest(Destination::HiLo)
        }

        special::TGE | special::TGEU | special::TLT | special::TLTU | special::TEQ | special::TNE => {
            let (mnemonic, alu) = trap_function(funct)?;
            Instruction::new(word, mnemonic, OpClass::RegReg, alu).operands(reg(rs), reg(rt))
        }

        _ => {
            let (mnemonic, alu) = match funct {
                special::ADD => ("add", AluFunction::Add),
                special::ADDU => ("addu", AluFunction::Addu),
                special::SUB => ("sub", AluFunction::Sub),
                special::SUBU => ("subu", AluFunction::Subu),
                special::AND => ("and", AluFunction::And),
                special::OR => ("or", AluFunction::Or),
                special::XOR => ("xor", AluFunction::Xor),
                special::NOR => ("nor", AluFunction::Nor),
                special::SLT => ("slt", AluFunction::Slt),
                special::SLTU => ("sltu", AluFunction::Sltu),
                _ => return None,
            };
            Instruction::new(word, mnemonic, OpClass::RegReg, alu)
                .operands(reg(rs), reg(rt))
                .dest_gpr(rd)
        }
    };
    Some(inst)
}

fn decode_regimm(word: u32) -> Option<Instruction> {
    let rs = word.rs_mips();
    let code = u32::from(word.rt_mips());

    let (mnemonic, condition, likely, link) = match code {
        regimm::BLTZ => ("bltz", BranchCondition::Lt, false, false),
        regimm::BGEZ => ("bgez", BranchCondition::Ge, false, false),
        regimm::BLTZL => ("bltzl", BranchCondition::Lt, true, false),
        regimm::BGEZL => ("bgezl", BranchCondition::Ge, true, false),
        regimm::BLTZAL => ("bltzal", BranchCondition::Lt, false, true),
        regimm::BGEZAL => ("bgezal", BranchCondition::Ge, false, true),
        regimm::BLTZALL => ("bltzall", BranchCondition::Lt, true, true),
        regimm::BGEZALL => ("bgezall", BranchCondition::Ge, true, true),
        _ => {
            let (mnemonic, alu) = match code {
                regimm::TGEI => ("tgei", AluFunction::Tge),
                regimm::TGEIU => ("tgeiu", AluFunction::Tgeu),
                regimm::TLTI => ("tlti", AluFunction::Tlt),
                regimm::TLTIU => ("tltiu", AluFunction::Tltu),
                regimm::TEQI => ("teqi", AluFunction::Teq),
                regimm::TNEI => ("tnei", AluFunction::Tne),
                _ => return None,
            };
            return Some(
                Instruction::new(word, mnemonic, OpClass::RegImm, alu)
                    .operands(reg(rs), Operand::Immediate)
                    .imm(word.imm16_signed()),
            );
        }
    };

    let inst = Instruction::new(word, mnemonic, OpClass::Branch, AluFunction::Br)
        .operands(Operand::NextPc, Operand::Immediate)
        .imm(word.imm16_signed())
        .control(ControlFlow {
            condition,
            lhs: reg(rs),
            rhs: Operand::Zero,
            likely,
            link,
        });
    Some(if link { inst.dest_gpr(LINK_REGISTER) } else { inst })
}

const fn trap_function(funct: u32) -> Option<(&'static str, AluFunction)> {
    Some(match funct {
        special::TGE => ("tge", AluFunction::Tge),
        special::TGEU => ("tgeu", AluFunction::Tgeu),
        special::TLT => ("tlt", AluFunction::Tlt),
        special::TLTU => ("tltu", AluFunction::Tltu),
        special::TEQ => ("teq", AluFunction::Teq),
        special::TNE => ("tne", AluFunction::Tne),
        _ => return None,
    })
}
