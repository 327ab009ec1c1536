//! RV32 Opcodes and Function Codes.
//!
//! Major opcodes (bits 6-0) plus the `funct3`/`funct7`/`funct5` values the decoder
//! distinguishes within them.

/// Load instructions (LB, LH, LW, LBU, LHU).
pub const OP_LOAD: u32 = 0b000_0011;
/// Memory ordering instructions (FENCE, FENCE.I).
pub const OP_MISC_MEM: u32 = 0b000_1111;
/// Immediate arithmetic instructions (ADDI, ANDI, SLLI, etc.).
pub const OP_IMM: u32 = 0b001_0011;
/// Add Upper Immediate to PC.
pub const OP_AUIPC: u32 = 0b001_0111;
/// Store instructions (SB, SH, SW).
pub const OP_STORE: u32 = 0b010_0011;
/// Atomic memory operations.
pub const OP_AMO: u32 = 0b010_1111;
/// Register-register arithmetic, including the M extension.
pub const OP_REG: u32 = 0b011_0011;
/// Load Upper Immediate.
pub const OP_LUI: u32 = 0b011_0111;
/// Conditional branches.
pub const OP_BRANCH: u32 = 0b110_0011;
/// Jump and Link Register.
pub const OP_JALR: u32 = 0b110_0111;
/// Jump and Link.
pub const OP_JAL: u32 = 0b110_1111;
/// ECALL, EBREAK and CSR access.
pub const OP_SYSTEM: u32 = 0b111_0011;

/// `funct3` values.
pub mod funct3 {
    /// Load byte / store byte / BEQ / ADD.
    pub const F0: u32 = 0b000;
    /// Load half / store half / BNE / SLL.
    pub const F1: u32 = 0b001;
    /// Load word / store word / SLT / AMO word width.
    pub const F2: u32 = 0b010;
    /// SLTU.
    pub const F3: u32 = 0b011;
    /// LBU / BLT / XOR.
    pub const F4: u32 = 0b100;
    /// LHU / BGE / SRL, SRA.
    pub const F5: u32 = 0b101;
    /// BLTU / OR.
    pub const F6: u32 = 0b110;
    /// BGEU / AND.
    pub const F7: u32 = 0b111;
}

/// `funct7` values.
pub mod funct7 {
    /// Base encoding.
    pub const DEFAULT: u32 = 0b000_0000;
    /// SUB and SRA.
    pub const ALT: u32 = 0b010_0000;
    /// M extension.
    pub const MULDIV: u32 = 0b000_0001;
}

/// AMO `funct5` values (bits 31-27).
pub mod funct5 {
    /// AMOADD.W
    pub const AMOADD: u32 = 0b00000;
    /// AMOSWAP.W
    pub const AMOSWAP: u32 = 0b00001;
    /// LR.W
    pub const LR: u32 = 0b00010;
    /// SC.W
    pub const SC: u32 = 0b00011;
    /// AMOXOR.W
    pub const AMOXOR: u32 = 0b00100;
    /// AMOOR.W
    pub const AMOOR: u32 = 0b01000;
    /// AMOAND.W
    pub const AMOAND: u32 = 0b01100;
    /// AMOMIN.W
    pub const AMOMIN: u32 = 0b10000;
    /// AMOMAX.W
    pub const AMOMAX: u32 = 0b10100;
    /// AMOMINU.W
    pub const AMOMINU: u32 = 0b11000;
    /// AMOMAXU.W
    pub const AMOMAXU: u32 = 0b11100;
}

/// ECALL immediate.
pub const SYS_ECALL: u32 = 0;
/// EBREAK immediate.
pub const SYS_EBREAK: u32 = 1;
