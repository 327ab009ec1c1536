//! Instruction word encoders.
//!
//! Register arguments are plain numbers; immediates are signed and truncated to
//! their field width. Branch and jump offsets follow each ISA's own convention:
//! bytes from the instruction for RISC-V, words from the next instruction for
//! MIPS and DLX.

/// RV32IMA encoders.
pub mod riscv {
    fn r_type(funct7: u32, rs2: u32, rs1: u32, funct3: u32, rd: u32, opcode: u32) -> u32 {
        (funct7 << 25) | (rs2 << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
    }

    fn i_type(imm: i32, rs1: u32, funct3: u32, rd: u32, opcode: u32) -> u32 {
        (((imm as u32) & 0xFFF) << 20) | (rs1 << 15) | (funct3 << 12) | (rd << 7) | opcode
    }

    fn s_type(imm: i32, rs2: u32, rs1: u32, funct3: u32) -> u32 {
        let imm = imm as u32;
        (((imm >> 5) & 0x7F) << 25)
            | (rs2 << 20)
            | (rs1 << 15)
            | (funct3 << 12)
            | ((imm & 0x1F) << 7)
            | 0x23
    }

    fn b_type(offset: i32, rs2: u32, rs1: u32, funct3: u32) -> u32 {
        let imm = offset as u32;
        (((imm >> 12) & 1) << 31)
            | (((imm >> 5) & 0x3F) << 25)
            | (rs2 << 20)
            | (rs1 << 15)
            | (funct3 << 12)
            | (((imm >> 1) & 0xF) << 8)
            | (((imm >> 11) & 1) << 7)
            | 0x63
    }

    pub fn addi(rd: u32, rs1: u32, imm: i32) -> u32 {
        i_type(imm, rs1, 0, rd, 0x13)
    }

    pub fn add(rd: u32, rs1: u32, rs2: u32) -> u32 {
        r_type(0, rs2, rs1, 0, rd, 0x33)
    }

    pub fn sub(rd: u32, rs1: u32, rs2: u32) -> u32 {
        r_type(0x20, rs2, rs1, 0, rd, 0x33)
    }

    pub fn mul(rd: u32, rs1: u32, rs2: u32) -> u32 {
        r_type(1, rs2, rs1, 0, rd, 0x33)
    }

    pub fn div(rd: u32, rs1: u32, rs2: u32) -> u32 {
        r_type(1, rs2, rs1, 4, rd, 0x33)
    }

    pub fn lui(rd: u32, imm20: u32) -> u32 {
        ((imm20 & 0xF_FFFF) << 12) | (rd << 7) | 0x37
    }

    pub fn lw(rd: u32, rs1: u32, offset: i32) -> u32 {
        i_type(offset, rs1, 2, rd, 0x03)
    }

    pub fn lb(rd: u32, rs1: u32, offset: i32) -> u32 {
        i_type(offset, rs1, 0, rd, 0x03)
    }

    pub fn lbu(rd: u32, rs1: u32, offset: i32) -> u32 {
        i_type(offset, rs1, 4, rd, 0x03)
    }

    pub fn sw(rs2: u32, rs1: u32, offset: i32) -> u32 {
        s_type(offset, rs2, rs1, 2)
    }

    pub fn beq(rs1: u32, rs2: u32, offset: i32) -> u32 {
        b_type(offset, rs2, rs1, 0)
    }

    pub fn bne(rs1: u32, rs2: u32, offset: i32) -> u32 {
        b_type(offset, rs2, rs1, 1)
    }

    pub fn jal(rd: u32, offset: i32) -> u32 {
        let imm = offset as u32;
        (((imm >> 20) & 1) << 31)
            | (((imm >> 1) & 0x3FF) << 21)
            | (((imm >> 11) & 1) << 20)
            | (((imm >> 12) & 0xFF) << 12)
            | (rd << 7)
            | 0x6F
    }

    pub fn jalr(rd: u32, rs1: u32, offset: i32) -> u32 {
        i_type(offset, rs1, 0, rd, 0x67)
    }

    pub fn amoadd_w(rd: u32, rs2: u32, rs1: u32) -> u32 {
        r_type(0, rs2, rs1, 2, rd, 0x2F)
    }

    pub fn amoswap_w(rd: u32, rs2: u32, rs1: u32) -> u32 {
        r_type(0b00001 << 2, rs2, rs1, 2, rd, 0x2F)
    }

    pub const fn ecall() -> u32 {
        0x0000_0073
    }

    pub const fn ebreak() -> u32 {
        0x0010_0073
    }
}

/// MIPS-I encoders.
pub mod mips {
    fn i_type(op: u32, rs: u32, rt: u32, imm: i32) -> u32 {
        (op << 26) | (rs << 21) | (rt << 16) | ((imm as u32) & 0xFFFF)
    }

    fn special(rs: u32, rt: u32, rd: u32, shamt: u32, funct: u32) -> u32 {
        (rs << 21) | (rt << 16) | (rd << 11) | (shamt << 6) | funct
    }

    pub fn addiu(rt: u32, rs: u32, imm: i32) -> u32 {
        i_type(0x09, rs, rt, imm)
    }

    pub fn addu(rd: u32, rs: u32, rt: u32) -> u32 {
        special(rs, rt, rd, 0, 0x21)
    }

    pub fn lui(rt: u32, imm: u32) -> u32 {
        i_type(0x0F, 0, rt, imm as i32)
    }

    pub fn lw(rt: u32, base: u32, offset: i32) -> u32 {
        i_type(0x23, base, rt, offset)
    }

    pub fn sw(rt: u32, base: u32, offset: i32) -> u32 {
        i_type(0x2B, base, rt, offset)
    }

    pub fn beq(rs: u32, rt: u32, offset: i32) -> u32 {
        i_type(0x04, rs, rt, offset)
    }

    pub fn beql(rs: u32, rt: u32, offset: i32) -> u32 {
        i_type(0x14, rs, rt, offset)
    }

    pub fn bgezal(rs: u32, offset: i32) -> u32 {
        i_type(0x01, rs, 0x11, offset)
    }

    pub fn j(target: u32) -> u32 {
        (0x02 << 26) | ((target >> 2) & 0x03FF_FFFF)
    }

    pub fn jal(target: u32) -> u32 {
        (0x03 << 26) | ((target >> 2) & 0x03FF_FFFF)
    }

    pub fn jr(rs: u32) -> u32 {
        special(rs, 0, 0, 0, 0x08)
    }

    pub fn mult(rs: u32, rt: u32) -> u32 {
        special(rs, rt, 0, 0, 0x18)
    }

    pub fn div(rs: u32, rt: u32) -> u32 {
        special(rs, rt, 0, 0, 0x1A)
    }

    pub fn mfhi(rd: u32) -> u32 {
        special(0, 0, rd, 0, 0x10)
    }

    pub fn mflo(rd: u32) -> u32 {
        special(0, 0, rd, 0, 0x12)
    }

    pub fn sll(rd: u32, rt: u32, shamt: u32) -> u32 {
        special(0, rt, rd, shamt, 0x00)
    }

    pub fn teq(rs: u32, rt: u32) -> u32 {
        special(rs, rt, 0, 0, 0x34)
    }

    pub const fn syscall() -> u32 {
        0x0000_000C
    }

    pub const fn brk() -> u32 {
        0x0000_000D
    }
}

/// DLX encoders.
pub mod dlx {
    fn i_type(op: u32, rs1: u32, rd: u32, imm: i32) -> u32 {
        (op << 26) | (rs1 << 21) | (rd << 16) | ((imm as u32) & 0xFFFF)
    }

    fn r_type(rs1: u32, rs2: u32, rd: u32, funct: u32) -> u32 {
        (rs1 << 21) | (rs2 << 16) | (rd << 11) | funct
    }

    pub fn addi(rd: u32, rs1: u32, imm: i32) -> u32 {
        i_type(0x08, rs1, rd, imm)
    }

    pub fn add(rd: u32, rs1: u32, rs2: u32) -> u32 {
        r_type(rs1, rs2, rd, 0x20)
    }

    pub fn sub(rd: u32, rs1: u32, rs2: u32) -> u32 {
        r_type(rs1, rs2, rd, 0x22)
    }

    pub fn sgtu(rd: u32, rs1: u32, rs2: u32) -> u32 {
        r_type(rs1, rs2, rd, 0x13)
    }

    pub fn lhi(rd: u32, imm: u32) -> u32 {
        i_type(0x0F, 0, rd, imm as i32)
    }

    pub fn lw(rd: u32, rs1: u32, offset: i32) -> u32 {
        i_type(0x23, rs1, rd, offset)
    }

    pub fn sw(rd: u32, rs1: u32, offset: i32) -> u32 {
        i_type(0x2B, rs1, rd, offset)
    }

    pub fn beqz(rs1: u32, offset: i32) -> u32 {
        i_type(0x04, rs1, 0, offset)
    }

    pub fn bnez(rs1: u32, offset: i32) -> u32 {
        i_type(0x05, rs1, 0, offset)
    }

    pub fn j(offset: i32) -> u32 {
        (0x02 << 26) | ((offset as u32) & 0x03FF_FFFF)
    }

    pub fn jal(offset: i32) -> u32 {
        (0x03 << 26) | ((offset as u32) & 0x03FF_FFFF)
    }

    pub fn trap(id: u32) -> u32 {
        (0x11 << 26) | (id & 0x03FF_FFFF)
    }

    pub const fn nop() -> u32 {
        0x15 << 26
    }
}
