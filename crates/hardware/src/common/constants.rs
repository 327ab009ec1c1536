//! Global Simulator Constants.
//!
//! This module defines constants used across the simulator. It includes:
//! 1. **Instruction Constants:** Instruction size and the canonical NOP word.
//! 2. **Register Constants:** Register counts and ABI register numbers per ISA mode.
//! 3. **Pipeline Constants:** Forwarding window and supported delay-slot range.

/// Size of every instruction word in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// The all-zero word, decoded as a NOP in every ISA mode.
pub const NOP_WORD: u32 = 0;

/// Number of general-purpose registers.
pub const GPR_COUNT: usize = 32;

/// Sequence number carried by bubbles; real instructions start at 1.
pub const BUBBLE_SEQ: u64 = 0;

/// Number of recently decoded destinations consulted by the uninitialized-register check.
pub const FORWARDING_WINDOW: usize = 3;

/// Smallest supported number of branch delay slots.
pub const MIN_BRANCH_DELAY_SLOTS: u32 = 2;

/// Largest supported number of branch delay slots.
pub const MAX_BRANCH_DELAY_SLOTS: u32 = 3;

/// RISC-V `a0`, syscall argument 0 and result register.
pub const RISCV_A0: u8 = 10;

/// RISC-V `a7`, syscall number register.
pub const RISCV_A7: u8 = 17;

/// MIPS `$v0`, syscall number and result register.
pub const MIPS_V0: u8 = 2;

/// MIPS `$a0`, syscall argument 0.
pub const MIPS_A0: u8 = 4;

/// MIPS/DLX link register for `JAL`-type instructions.
pub const LINK_REGISTER: u8 = 31;

/// DLX register holding the trap argument pointer.
pub const DLX_TRAP_ARG: u8 = 14;

/// DLX register receiving trap results.
pub const DLX_TRAP_RESULT: u8 = 1;
