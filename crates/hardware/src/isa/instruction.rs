//! Decoded instruction descriptor and field extraction.
//!
//! This module provides:
//! 1. **Field Extraction:** The [`InstructionBits`] trait over raw 32-bit words.
//! 2. **Descriptor:** [`Instruction`], the immutable record every decoder produces.
//! 3. **Operation Vocabulary:** ALU functions, operand selectors, destinations, memory and
//!    control-flow attributes shared by all three ISA modes.

use crate::common::constants::NOP_WORD;
use crate::common::data::MemWidth;
use crate::common::reg::Reg;
use crate::core::units::bru::BranchCondition;

/// Trait for extracting instruction fields from encoded instructions.
///
/// Field names follow the RISC-V layout; MIPS and DLX decoders use the
/// `*_mips` accessors, which share one layout between the two ISAs.
pub trait InstructionBits {
    /// Bits 0-6, the RISC-V major opcode.
    fn opcode(&self) -> u32;
    /// Bits 7-11.
    fn rd(&self) -> u8;
    /// Bits 15-19.
    fn rs1(&self) -> u8;
    /// Bits 20-24.
    fn rs2(&self) -> u8;
    /// Bits 12-14.
    fn funct3(&self) -> u32;
    /// Bits 25-31.
    fn funct7(&self) -> u32;

    /// Bits 26-31, the MIPS/DLX major opcode.
    fn op_mips(&self) -> u32;
    /// Bits 21-25.
    fn rs_mips(&self) -> u8;
    /// Bits 16-20.
    fn rt_mips(&self) -> u8;
    /// Bits 11-15.
    fn rd_mips(&self) -> u8;
    /// Bits 6-10.
    fn shamt_mips(&self) -> u32;
    /// Bits 0-5.
    fn funct_mips(&self) -> u32;
    /// Bits 0-15, sign-extended.
    fn imm16_signed(&self) -> u32;
    /// Bits 0-15, zero-extended.
    fn imm16_unsigned(&self) -> u32;
    /// Bits 0-25.
    fn target26(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn opcode(&self) -> u32 {
        self & 0x7F
    }

    #[inline(always)]
    fn rd(&self) -> u8 {
        ((self >> 7) & 0x1F) as u8
    }

    #[inline(always)]
    fn rs1(&self) -> u8 {
        ((self >> 15) & 0x1F) as u8
    }

    #[inline(always)]
    fn rs2(&self) -> u8 {
        ((self >> 20) & 0x1F) as u8
    }

    #[inline(always)]
    fn funct3(&self) -> u32 {
        (self >> 12) & 0x7
    }

    #[inline(always)]
    fn funct7(&self) -> u32 {
        (self >> 25) & 0x7F
    }

    #[inline(always)]
    fn op_mips(&self) -> u32 {
        self >> 26
    }

    #[inline(always)]
    fn rs_mips(&self) -> u8 {
        ((self >> 21) & 0x1F) as u8
    }

    #[inline(always)]
    fn rt_mips(&self) -> u8 {
        ((self >> 16) & 0x1F) as u8
    }

    #[inline(always)]
    fn rd_mips(&self) -> u8 {
        ((self >> 11) & 0x1F) as u8
    }

    #[inline(always)]
    fn shamt_mips(&self) -> u32 {
        (self >> 6) & 0x1F
    }

    #[inline(always)]
    fn funct_mips(&self) -> u32 {
        self & 0x3F
    }

    #[inline(always)]
    fn imm16_signed(&self) -> u32 {
        (*self as u16) as i16 as i32 as u32
    }

    #[inline(always)]
    fn imm16_unsigned(&self) -> u32 {
        self & 0xFFFF
    }

    #[inline(always)]
    fn target26(&self) -> u32 {
        self & 0x03FF_FFFF
    }
}

/// Coarse instruction category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpClass {
    /// Pipeline bubble or architectural no-op.
    #[default]
    Nop,
    /// Memory read into a register.
    Load,
    /// Register written to memory.
    Store,
    /// Register-register computation.
    RegReg,
    /// Register-immediate computation.
    RegImm,
    /// Conditional PC-relative branch.
    Branch,
    /// Unconditional jump to an encoded target.
    Jump,
    /// Unconditional jump to a register target.
    JumpRegister,
    /// Upper-immediate construction (`LUI`, `AUIPC`, `LHI`).
    UpperImmediate,
    /// Read-modify-write memory operation.
    Atomic,
    /// Syscall, breakpoint or trap.
    System,
    /// Memory ordering fence.
    Fence,
}

/// Operation performed by the ALU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AluFunction {
    /// No operation; rejected if it reaches the ALU on a real instruction.
    #[default]
    None,
    /// Wrapping addition.
    Add,
    /// Wrapping addition (MIPS unsigned form; identical result).
    Addu,
    /// Wrapping subtraction.
    Sub,
    /// Wrapping subtraction (MIPS unsigned form; identical result).
    Subu,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Bitwise not-or.
    Nor,
    /// Shift left logical by B.
    Sll,
    /// Shift right logical by B.
    Srl,
    /// Shift right arithmetic by B.
    Sra,
    /// Shift left logical, register amount.
    Sllv,
    /// Shift right logical, register amount.
    Srlv,
    /// Shift right arithmetic, register amount.
    Srav,
    /// Set if A < B, signed.
    Slt,
    /// Set if A < B, unsigned.
    Sltu,
    /// Set if equal.
    Seq,
    /// Set if not equal.
    Sne,
    /// Set if A >= B, signed.
    Sge,
    /// Set if A > B, signed.
    Sgt,
    /// Set if A <= B, signed.
    Sle,
    /// DLX set-if-equal on sign-cleared operands.
    Sequ,
    /// DLX set-if-not-equal on sign-cleared operands.
    Sneu,
    /// DLX set-if-greater-or-equal on sign-cleared operands.
    Sgeu,
    /// DLX set-if-greater on sign-cleared operands.
    Sgtu,
    /// DLX set-if-less-or-equal on sign-cleared operands.
    Sleu,
    /// Signed 64-bit product into HI:LO.
    Mult,
    /// Unsigned 64-bit product into HI:LO.
    Multu,
    /// Upper half of the signed product.
    Mulh,
    /// Upper half of the unsigned product.
    Mulhu,
    /// Upper half of signed A times unsigned B.
    Mulhsu,
    /// Signed quotient in LO, remainder in HI.
    Div,
    /// Unsigned quotient in LO, remainder in HI.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
    /// B shifted into the upper half-word.
    Lui,
    /// Absolute jump target: region of A with B as word index.
    Ba,
    /// Relative branch target: A plus B words.
    Br,
    /// DLX trap; id in B, argument in A.
    Trap,
    /// Trap if equal.
    Teq,
    /// Trap if greater or equal, signed.
    Tge,
    /// Trap if greater or equal, unsigned.
    Tgeu,
    /// Trap if less, signed.
    Tlt,
    /// Trap if less, unsigned.
    Tltu,
    /// Trap if not equal.
    Tne,
    /// System call; no computation.
    Syscall,
    /// Breakpoint; no computation.
    Break,
}

/// Source of an ALU or comparison operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Operand {
    /// The constant zero.
    #[default]
    Zero,
    /// A register value (forwardable).
    Reg(Reg),
    /// The decoded immediate.
    Immediate,
    /// The instruction's own address.
    Pc,
    /// The address of the next sequential instruction.
    NextPc,
}

impl Operand {
    /// The register read by this operand, if any.
    pub const fn register(self) -> Option<Reg> {
        match self {
            Self::Reg(r) => Some(r),
            _ => None,
        }
    }
}

/// Where the instruction's result is written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Destination {
    /// No register result.
    #[default]
    None,
    /// A single register.
    Reg(Reg),
    /// Both HI (ALU high result) and LO (ALU low result).
    HiLo,
}

impl Destination {
    /// Returns `true` if `reg` is written by this destination.
    pub fn writes(self, reg: Reg) -> bool {
        match self {
            Self::None => false,
            Self::Reg(r) => r == reg && !reg.is_zero(),
            Self::HiLo => matches!(reg, Reg::Hi | Reg::Lo),
        }
    }
}

/// Kind of data memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemKind {
    /// Read memory into the destination.
    Load,
    /// Write the data register to memory.
    Store,
    /// Load-reserved.
    LoadReserved,
    /// Store-conditional; always succeeds.
    StoreConditional,
    /// Read, combine with the data register, write back; old value to the destination.
    Amo(AmoOp),
}

impl MemKind {
    /// Returns `true` if the access produces a register value in the Memory stage.
    pub const fn produces_value(self) -> bool {
        !matches!(self, Self::Store)
    }
}

/// Combining operation of an atomic memory operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AmoOp {
    /// Replace.
    Swap,
    /// Wrapping add.
    Add,
    /// Bitwise xor.
    Xor,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Signed minimum.
    Min,
    /// Signed maximum.
    Max,
    /// Unsigned minimum.
    Minu,
    /// Unsigned maximum.
    Maxu,
}

/// Data memory access attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MemAccess {
    /// Access kind.
    pub kind: MemKind,
    /// Access width.
    pub width: MemWidth,
    /// Sign-extend narrow loads.
    pub signed: bool,
    /// Register supplying store data (stores, SC and AMOs).
    pub data: Option<Reg>,
}

/// Control-flow attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ControlFlow {
    /// Condition deciding whether the transfer is taken.
    pub condition: BranchCondition,
    /// Left comparison operand.
    pub lhs: Operand,
    /// Right comparison operand.
    pub rhs: Operand,
    /// Delay slots are nullified when the branch is not taken.
    pub likely: bool,
    /// The link address is written to the destination.
    pub link: bool,
}

/// System-level operation handled in Write-Back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SystemOp {
    /// Delegate to the syscall handler.
    Syscall,
    /// Stop the run.
    Break,
    /// DLX `TRAP`; id 0 stops the run.
    Trap,
}

/// A decoded instruction. Never mutated after decode.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Instruction {
    /// Raw instruction word.
    pub word: u32,
    /// Assembly mnemonic, for tracing.
    pub mnemonic: &'static str,
    /// Instruction category.
    pub class: OpClass,
    /// ALU operation.
    pub alu: AluFunction,
    /// First ALU operand.
    pub src_a: Operand,
    /// Second ALU operand.
    pub src_b: Operand,
    /// Decoded immediate, already extended/shifted as the encoding requires.
    pub imm: u32,
    /// Result destination.
    pub dest: Destination,
    /// Data memory access, if any.
    pub mem: Option<MemAccess>,
    /// Control transfer, if any.
    pub control: Option<ControlFlow>,
    /// System operation, if any.
    pub system: Option<SystemOp>,
}

impl Instruction {
    /// The canonical bubble.
    pub fn bubble() -> Self {
        Self::nop(NOP_WORD)
    }

    /// An architectural no-op for `word`.
    pub fn nop(word: u32) -> Self {
        Self {
            word,
            mnemonic: "nop",
            ..Self::default()
        }
    }

    /// Starts a descriptor for `word`.
    pub fn new(word: u32, mnemonic: &'static str, class: OpClass, alu: AluFunction) -> Self {
        Self {
            word,
            mnemonic,
            class,
            alu,
            ..Self::default()
        }
    }

    /// Sets the ALU operand selectors.
    #[must_use]
    pub const fn operands(mut self, a: Operand, b: Operand) -> Self {
        self.src_a = a;
        self.src_b = b;
        self
    }

    /// Sets the immediate.
    #[must_use]
    pub const fn imm(mut self, imm: u32) -> Self {
        self.imm = imm;
        self
    }

    /// Sets a general-purpose destination.
    #[must_use]
    pub const fn dest_gpr(mut self, reg: u8) -> Self {
        self.dest = Destination::Reg(Reg::Gpr(reg));
        self
    }

    /// Sets the destination.
    #[must_use]
    pub const fn dest(mut self, dest: Destination) -> Self {
        self.dest = dest;
        self
    }

    /// Attaches a memory access.
    #[must_use]
    pub const fn mem(mut self, access: MemAccess) -> Self {
        self.mem = Some(access);
        self
    }

    /// Attaches control-flow attributes.
    #[must_use]
    pub const fn control(mut self, control: ControlFlow) -> Self {
        self.control = Some(control);
        self
    }

    /// Attaches a system operation.
    #[must_use]
    pub const fn system(mut self, op: SystemOp) -> Self {
        self.system = Some(op);
        self
    }

    /// Returns `true` for NOPs and bubbles.
    pub fn is_nop(&self) -> bool {
        self.class == OpClass::Nop
    }

    /// Returns `true` if the Memory stage produces this instruction's register value:
    /// loads, atomics and DLX trap services.
    pub fn is_load_like(&self) -> bool {
        let service = self.system == Some(SystemOp::Trap) && self.dest != Destination::None;
        service || self.mem.is_some_and(|m| m.kind.produces_value())
    }

    /// Returns `true` for branches and jumps.
    pub const fn is_control(&self) -> bool {
        self.control.is_some()
    }

    /// Every register read by this instruction, in operand order.
    pub fn sources(&self) -> impl Iterator<Item = Reg> + '_ {
        let control = self.control.map_or([None, None], |c| [c.lhs.register(), c.rhs.register()]);
        [self.src_a.register(), self.src_b.register()]
            .into_iter()
            .chain(control)
            .chain([self.mem.and_then(|m| m.data)])
            .flatten()
    }
}
