//! System Call Handoff.
//!
//! Write-Back delegates `SYSCALL`/`ECALL` to an external collaborator. This module defines:
//! 1. **Request:** The syscall number, ABI argument access with initialization checks, and
//!    the memory hierarchy for buffer access.
//! 2. **Handler Trait:** The seam Write-Back calls through.
//! 3. **Default Handler:** Console services for RISC-V (Linux numbering) and MIPS (SPIM
//!    numbering), with output captured in a buffer.

use crate::common::constants::{MIPS_A0, MIPS_V0, RISCV_A0, RISCV_A7};
use crate::common::data::MemWidth;
use crate::common::error::SyscallError;
use crate::common::reg::Reg;
use crate::config::IsaMode;
use crate::core::arch::gpr::RegisterSet;
use crate::core::units::memory::MemoryHierarchy;

/// Upper bound on a NUL-terminated string read by a syscall.
const MAX_STRING: u32 = 4096;

/// Register receiving the syscall number for `isa`.
pub const fn number_register(isa: IsaMode) -> Reg {
    match isa {
        IsaMode::Mips => Reg::Gpr(MIPS_V0),
        IsaMode::RiscV | IsaMode::Dlx => Reg::Gpr(RISCV_A7),
    }
}

/// Register receiving the syscall result for `isa`.
pub const fn result_register(isa: IsaMode) -> Reg {
    match isa {
        IsaMode::Mips => Reg::Gpr(MIPS_V0),
        IsaMode::RiscV | IsaMode::Dlx => Reg::Gpr(RISCV_A0),
    }
}

/// Register holding argument `index` (0-3) for `isa`.
pub const fn argument_register(isa: IsaMode, index: u8) -> Reg {
    match isa {
        IsaMode::Mips => Reg::Gpr(MIPS_A0 + index),
        IsaMode::RiscV | IsaMode::Dlx => Reg::Gpr(RISCV_A0 + index),
    }
}

/// One system call as seen by a handler.
#[derive(Debug)]
pub struct SyscallRequest<'a> {
    /// Active ISA mode; decides the numbering and ABI.
    pub isa: IsaMode,
    /// Syscall number.
    pub number: u32,
    /// Address of the syscall instruction.
    pub pc: u32,
    regs: &'a RegisterSet,
    /// Memory, for buffer arguments.
    pub memory: &'a mut MemoryHierarchy,
}

impl<'a> SyscallRequest<'a> {
    /// Builds a request, reading the syscall number register.
    pub fn new(
        isa: IsaMode,
        pc: u32,
        regs: &'a RegisterSet,
        memory: &'a mut MemoryHierarchy,
    ) -> Result<Self, SyscallError> {
        let reg = number_register(isa);
        if !regs.is_initialized(reg) {
            return Err(SyscallError::UninitializedRegister(reg));
        }
        Ok(Self {
            isa,
            number: regs.read(reg),
            pc,
            regs,
            memory,
        })
    }

    /// Reads argument `index` (0-3).
    ///
    /// # Returns
    ///
    /// The argument value, or `UninitializedRegister` if the ABI register was never written.
    pub const fn arg(&self, index: u8) -> Result<u32, SyscallError> {
        let reg = argument_register(self.isa, index);
        if self.regs.is_initialized(reg) {
            Ok(self.regs.read(reg))
        } else {
            Err(SyscallError::UninitializedRegister(reg))
        }
    }

    /// Reads a NUL-terminated string starting at `addr` through the data cache.
    pub fn read_string(&mut self, addr: u32) -> Result<Vec<u8>, SyscallError> {
        let mut bytes = Vec::new();
        for offset in 0..MAX_STRING {
            let byte = self.memory.load(addr.wrapping_add(offset), MemWidth::Byte)? as u8;
            if byte == 0 {
                break;
            }
            bytes.push(byte);
        }
        Ok(bytes)
    }

    /// Reads `len` bytes starting at `addr` through the data cache.
    pub fn read_bytes(&mut self, addr: u32, len: u32) -> Result<Vec<u8>, SyscallError> {
        (0..len)
            .map(|offset| {
                self.memory
                    .load(addr.wrapping_add(offset), MemWidth::Byte)
                    .map(|b| b as u8)
                    .map_err(SyscallError::from)
            })
            .collect()
    }
}

/// What Write-Back does after a syscall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SyscallOutcome {
    /// Value written to the ABI result register.
    pub result: Option<u32>,
    /// Stop the run with this exit code.
    pub exit: Option<u32>,
}

/// Collaborator servicing system calls.
pub trait SyscallHandler {
    /// Services one system call.
    fn do_syscall(&mut self, request: &mut SyscallRequest<'_>) -> Result<SyscallOutcome, SyscallError>;

    /// Console output produced so far, if the handler captures any.
    fn console_output(&self) -> &[u8] {
        &[]
    }
}

/// Console services with captured output.
#[derive(Clone, Debug, Default)]
pub struct ConsoleSyscalls {
    output: Vec<u8>,
}

impl ConsoleSyscalls {
    /// Creates a handler with an empty output buffer.
    pub const fn new() -> Self {
        Self { output: Vec::new() }
    }

    fn riscv(&mut self, request: &mut SyscallRequest<'_>) -> Result<SyscallOutcome, SyscallError> {
        match request.number {
            // exit
            93 => Ok(SyscallOutcome {
                result: None,
                exit: Some(request.arg(0)?),
            }),
            // write(fd, buf, len)
            64 => {
                let (buf, len) = (request.arg(1)?, request.arg(2)?);
                let bytes = request.read_bytes(buf, len)?;
                self.output.extend_from_slice(&bytes);
                Ok(SyscallOutcome {
                    result: Some(len),
                    exit: None,
                })
            }
            other => Err(SyscallError::Unsupported(other)),
        }
    }

    fn spim(&mut self, request: &mut SyscallRequest<'_>) -> Result<SyscallOutcome, SyscallError> {
        match request.number {
            1 => {
                let value = request.arg(0)? as i32;
                self.output.extend_from_slice(value.to_string().as_bytes());
            }
            4 => {
                let addr = request.arg(0)?;
                let bytes = request.read_string(addr)?;
                self.output.extend_from_slice(&bytes);
            }
            10 => {
                return Ok(SyscallOutcome {
                    result: None,
                    exit: Some(0),
                });
            }
            11 => self.output.push(request.arg(0)? as u8),
            17 => {
                return Ok(SyscallOutcome {
                    result: None,
                    exit: Some(request.arg(0)?),
                });
            }
            other => return Err(SyscallError::Unsupported(other)),
        }
        Ok(SyscallOutcome::default())
    }
}

impl SyscallHandler for ConsoleSyscalls {
    fn do_syscall(&mut self, request: &mut SyscallRequest<'_>) -> Result<SyscallOutcome, SyscallError> {
        tracing::debug!(number = request.number, pc = request.pc, "syscall");
        match request.isa {
            IsaMode::Mips => self.spim(request),
            IsaMode::RiscV | IsaMode::Dlx => self.riscv(request),
        }
    }

    fn console_output(&self) -> &[u8] {
        &self.output
    }
}
