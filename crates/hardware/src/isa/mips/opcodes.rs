//! MIPS Opcodes and Function Codes.

/// Primary opcodes (bits 31-26).
pub mod op {
    /// Register-register group, selected by `funct`.
    pub const SPECIAL: u32 = 0x00;
    /// Sign-test branch group, selected by `rt`.
    pub const REGIMM: u32 = 0x01;
    /// Jump.
    pub const J: u32 = 0x02;
    /// Jump and link.
    pub const JAL: u32 = 0x03;
    /// Branch if equal.
    pub const BEQ: u32 = 0x04;
    /// Branch if not equal.
    pub const BNE: u32 = 0x05;
    /// Branch if less than or equal to zero.
    pub const BLEZ: u32 = 0x06;
    /// Branch if greater than zero.
    pub const BGTZ: u32 = 0x07;
    /// Add immediate.
    pub const ADDI: u32 = 0x08;
    /// Add immediate unsigned.
    pub const ADDIU: u32 = 0x09;
    /// Set on less than immediate.
    pub const SLTI: u32 = 0x0A;
    /// Set on less than immediate unsigned.
    pub const SLTIU: u32 = 0x0B;
    /// And immediate.
    pub const ANDI: u32 = 0x0C;
    /// Or immediate.
    pub const ORI: u32 = 0x0D;
    /// Xor immediate.
    pub const XORI: u32 = 0x0E;
    /// Load upper immediate.
    pub const LUI: u32 = 0x0F;
    /// Branch if equal, likely.
    pub const BEQL: u32 = 0x14;
    /// Branch if not equal, likely.
    pub const BNEL: u32 = 0x15;
    /// Branch if less than or equal to zero, likely.
    pub const BLEZL: u32 = 0x16;
    /// Branch if greater than zero, likely.
    pub const BGTZL: u32 = 0x17;
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
}

/// SPECIAL `funct` values (bits 5-0).
pub mod special {
    /// Shift left logical.
    pub const SLL: u32 = 0x00;
    /// Shift right logical.
    pub const SRL: u32 = 0x02;
    /// Shift right arithmetic.
    pub const SRA: u32 = 0x03;
    /// Shift left logical variable.
    pub const SLLV: u32 = 0x04;
    /// Shift right logical variable.
    pub const SRLV: u32 = 0x06;
    /// Shift right arithmetic variable.
    pub const SRAV: u32 = 0x07;
    /// Jump register.
    pub const JR: u32 = 0x08;
    /// Jump and link register.
    pub const JALR: u32 = 0x09;
    /// System call.
    pub const SYSCALL: u32 = 0x0C;
    /// Breakpoint.
    pub const BREAK: u32 = 0x0D;
    /// Move from HI.
    pub const MFHI: u32 = 0x10;
    /// Move to HI.
    pub const MTHI: u32 = 0x11;
    /// Move from LO.
    pub const MFLO: u32 = 0x12;
    /// Move to LO.
    pub const MTLO: u32 = 0x13;
    /// Multiply.
    pub const MULT: u32 = 0x18;
    /// Multiply unsigned.
    pub const MULTU: u32 = 0x19;
    /// Divide.
    pub const DIV: u32 = 0x1A;
    /// Divide unsigned.
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
    /// Nor.
    pub const NOR: u32 = 0x27;
    /// Set on less than.
    pub const SLT: u32 = 0x2A;
    /// Set on less than unsigned.
    pub const SLTU: u32 = 0x2B;
    /// Trap if greater or equal.
    pub const TGE: u32 = 0x30;
    /// Trap if greater or equal unsigned.
    pub const TGEU: u32 = 0x31;
    /// Trap if less than.
    pub const TLT: u32 = 0x32;
    /// Trap if less than unsigned.
    pub const TLTU: u32 = 0x33;
    /// Trap if equal.
    pub const TEQ: u32 = 0x34;
    /// Trap if not equal.
    pub const TNE: u32 = 0x36;
}

/// REGIMM `rt` values (bits 20-16).
pub mod regimm {
    /// Branch if less than zero.
    pub const BLTZ: u32 = 0x00;
    /// Branch if greater or equal to zero.
    pub const BGEZ: u32 = 0x01;
    /// Branch if less than zero, likely.
    pub const BLTZL: u32 = 0x02;
    /// Branch if greater or equal to zero, likely.
    pub const BGEZL: u32 = 0x03;
    /// Trap if greater or equal immediate.
    pub const TGEI: u32 = 0x08;
    /// Trap if greater or equal immediate unsigned.
    pub const TGEIU: u32 = 0x09;
    /// Trap if less than immediate.
    pub const TLTI: u32 = 0x0A;
    /// Trap if less than immediate unsigned.
    pub const TLTIU: u32 = 0x0B;
    /// Trap if equal immediate.
    pub const TEQI: u32 = 0x0C;
    /// Trap if not equal immediate.
    pub const TNEI: u32 = 0x0E;
    /// Branch if less than zero and link.
    pub const BLTZAL: u32 = 0x10;
    /// Branch if greater or equal to zero and link.
    pub const BGEZAL: u32 = 0x11;
    /// Branch if less than zero and link, likely.
    pub const BLTZALL: u32 = 0x12;
    /// Branch if greater or equal to zero and link, likely.
    pub const BGEZALL: u32 = 0x13;
}
