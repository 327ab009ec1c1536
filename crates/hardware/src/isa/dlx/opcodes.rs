//! DLX Opcodes and Function Codes.

/// Primary opcodes (bits 31-26).
pub mod op {
    /// Register-register group, selected by `func`.
    pub const SPECIAL: u32 = 0x00;
    /// Jump.
    pub const J: u32 = 0x02;
    /// Jump and link.
    pub const JAL: u32 = 0x03;
    /// Branch if register is zero.
    pub const BEQZ: u32 = 0x04;
    /// Branch if register is not zero.
    pub const BNEZ: u32 = 0x05;
    /// Add immediate.
    pub const ADDI: u32 = 0x08;
    /// Add unsigned immediate.
    pub const ADDUI: u32 = 0x09;
    /// Subtract immediate.
    pub const SUBI: u32 = 0x0A;
    /// Subtract unsigned immediate.
    pub const SUBUI: u32 = 0x0B;
    /// And immediate.
    pub const ANDI: u32 = 0x0C;
    /// Or immediate.
    pub const ORI: u32 = 0x0D;
    /// Xor immediate.
    pub const XORI: u32 = 0x0E;
    /// Load high immediate.
    pub const LHI: u32 = 0x0F;
    /// Trap.
    pub const TRAP: u32 = 0x11;
    /// Jump register.
    pub const JR: u32 = 0x12;
    /// Jump and link register.
    pub const JALR: u32 = 0x13;
    /// Shift left logical immediate.
    pub const SLLI: u32 = 0x14;
    /// No operation.
    pub const NOP: u32 = 0x15;
    /// Shift right logical immediate.
    pub const SRLI: u32 = 0x16;
    /// Shift right arithmetic immediate.
    pub const SRAI: u32 = 0x17;
    /// Set if equal immediate.
    pub const SEQI: u32 = 0x18;
    /// Set if not equal immediate.
    pub const SNEI: u32 = 0x19;
    /// Set if less than immediate.
    pub const SLTI: u32 = 0x1A;
    /// Set if greater than immediate.
    pub const SGTI: u32 = 0x1B;
    /// Set if less or equal immediate.
    pub const SLEI: u32 = 0x1C;
    /// Set if greater or equal immediate.
    pub const SGEI: u32 = 0x1D;
    /// Load byte.
    pub const LB: u32 = 0x20;
    /// Load half-word.
    pub const LH: u32 = 0x21;
    /// Load word.
    pub const LW: u32 = 0x23;
    /// Load byte unsigned.
    pub const LBU: u32 = 0x24;
    /// Load half-word unsigned.
    pub const LHU: u32 = 0x25;
    /// Store byte.
    pub const SB: u32 = 0x28;
    /// Store half-word.
    pub const SH: u32 = 0x29;
    /// Store word.
    pub const SW: u32 = 0x2B;
    /// Set if equal unsigned immediate.
    pub const SEQUI: u32 = 0x30;
    /// Set if not equal unsigned immediate.
    pub const SNEUI: u32 = 0x31;
    /// Set if less than unsigned immediate.
    pub const SLTUI: u32 = 0x32;
    /// Set if greater than unsigned immediate.
    pub const SGTUI: u32 = 0x33;
    /// Set if less or equal unsigned immediate.
    pub const SLEUI: u32 = 0x34;
    /// Set if greater or equal unsigned immediate.
    pub const SGEUI: u32 = 0x35;
}

/// SPECIAL `func` values (bits 5-0).
pub mod special {
    /// Shift left logical.
    pub const SLL: u32 = 0x04;
    /// Shift right logical.
    pub const SRL: u32 = 0x06;
    /// Shift right arithmetic.
    pub const SRA: u32 = 0x07;
    /// Set if equal unsigned.
    pub const SEQU: u32 = 0x10;
    /// Set if not equal unsigned.
    pub const SNEU: u32 = 0x11;
    /// Set if less than unsigned.
    pub const SLTU: u32 = 0x12;
    /// Set if greater than unsigned.
    pub const SGTU: u32 = 0x13;
    /// Set if less or equal unsigned.
    pub const SLEU: u32 = 0x14;
    /// Set if greater or equal unsigned.
    pub const SGEU: u32 = 0x15;
    /// Multiply, low word to `rd`.
    pub const MULT: u32 = 0x18;
    /// Multiply unsigned, low word to `rd`.
    pub const MULTU: u32 = 0x19;
    /// Divide, quotient to `rd`.
    pub const DIV: u32 = 0x1A;
    /// Divide unsigned, quotient to `rd`.
    pub const DIVU: u32 = 0x1B;
    /// Add.
    pub const ADD: u32 = 0x20;
    /// Add unsigned.
    pub const ADDU: u32 = 0x21;
    /// Subtract.
    pub const SUB: u32 = 0x22;
    /// Subtract unsigned.
    pub const SUBU: u32 = 0x23;
    /// And.
    pub const AND: u32 = 0x24;
    /// Or.
    pub const OR: u32 = 0x25;
    /// Xor.
    pub const XOR: u32 = 0x26;
    /// Set if equal.
    pub const SEQ: u32 = 0x28;
    /// Set if not equal.
    pub const SNE: u32 = 0x29;
    /// Set if less than.
    pub const SLT: u32 = 0x2A;
    /// Set if greater than.
    pub const SGT: u32 = 0x2B;
    /// Set if less or equal.
    pub const SLE: u32 = 0x2C;
    /// Set if greater or equal.
    pub const SGE: u32 = 0x2D;
}
