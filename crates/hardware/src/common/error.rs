//! Error definitions and classification.
//!
//! This module defines every error the simulator can surface. It provides:
//! 1. **Stage Errors:** Typed errors raised by the ALU, caches, memory and syscall layer.
//! 2. **Run-Level Errors:** [`PipelineError`], the error returned by a simulation step.
//! 3. **Classification:** [`ErrorClass`], deciding whether an error halts the run.
//! 4. **Setup Errors:** Configuration and image loading failures.

use thiserror::Error;

use super::data::{AccessType, MemWidth};
use super::reg::Reg;
use crate::isa::instruction::AluFunction;

/// How an error affects the run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// Internal invariant or hard hardware fault; the run stops.
    Fatal,
    /// A check whose severity is configurable; surfaced only when configured to stop.
    Policy,
    /// A fault of the simulated program; reported, the caller decides.
    Architectural,
    /// Legacy conditional trap; the run stops.
    LegacyTrap,
}

/// Errors raised by the ALU while executing an instruction.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExecuteError {
    /// Integer division or remainder with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// A non-bubble instruction reached the ALU without a supported operation.
    #[error("unknown ALU operation {0:?}")]
    UnknownAluOperation(AluFunction),

    /// A `TRAP` id outside the known range.
    #[error("unknown trap id {0}")]
    UnknownTrap(u32),

    /// The trap handler rejected the request.
    #[error("trap {id} failed: {message}")]
    TrapHandler {
        /// Trap id.
        id: u32,
        /// Handler-provided reason.
        message: String,
    },

    /// A conditional trap instruction found its condition true.
    #[error("trap condition met for {0:?}")]
    TrapConditionMet(AluFunction),
}

/// Errors raised by a cache.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Access not aligned to its natural width.
    #[error("misaligned {width} access at {addr:#010x}")]
    Misaligned {
        /// Faulting address.
        addr: u32,
        /// Access width.
        width: MemWidth,
    },

    /// Data was read from a line that is not valid.
    #[error("read from invalid cache line at {addr:#010x}")]
    InvalidLine {
        /// Faulting address.
        addr: u32,
    },
}

/// Errors raised by the memory hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Access beyond the end of main memory.
    #[error("{width} access at {addr:#010x} is outside main memory")]
    OutOfBounds {
        /// Faulting address.
        addr: u32,
        /// Access width.
        width: MemWidth,
    },

    /// An access width that cannot be loaded into or stored from a register.
    #[error("{0} access does not match the 32-bit register width")]
    WidthMismatch(MemWidth),

    /// Cache-level fault.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Errors raised while servicing a system call.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SyscallError {
    /// The handler read an argument register that was never written.
    #[error("syscall read uninitialized register {0}")]
    UninitializedRegister(Reg),

    /// The syscall number is not handled.
    #[error("unsupported syscall {0}")]
    Unsupported(u32),

    /// The handler failed to access memory.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}

/// Errors surfaced by a simulation step.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// A latch did not hold exactly its configured number of records.
    #[error("latch {latch} holds {found} records, expected {expected}")]
    LatchCardinality {
        /// Latch name.
        latch: &'static str,
        /// Configured depth.
        expected: usize,
        /// Observed depth.
        found: usize,
    },

    /// A word that no decoder recognizes.
    #[error("unknown instruction {word:#010x} at {pc:#010x}")]
    UnknownInstruction {
        /// Raw instruction word.
        word: u32,
        /// Address of the instruction.
        pc: u32,
    },

    /// A source register was read before ever being written.
    #[error("register {reg} read uninitialized at {pc:#010x}")]
    UninitializedRegister {
        /// The register.
        reg: Reg,
        /// Address of the reading instruction.
        pc: u32,
    },

    /// An access outside every reserved memory segment.
    #[error("{access} at {addr:#010x} is outside reserved memory (pc {pc:#010x})")]
    OutOfReservation {
        /// Accessed address.
        addr: u32,
        /// Kind of access.
        access: AccessType,
        /// Address of the accessing instruction.
        pc: u32,
    },

    /// A memory or cache fault.
    #[error("memory fault at {pc:#010x}: {source}")]
    Memory {
        /// Address of the faulting instruction.
        pc: u32,
        /// Underlying fault.
        #[source]
        source: MemoryError,
    },

    /// An ALU or trap fault.
    #[error("execute fault at {pc:#010x}: {source}")]
    Execute {
        /// Address of the faulting instruction.
        pc: u32,
        /// Underlying fault.
        #[source]
        source: ExecuteError,
    },

    /// A system call fault.
    #[error("syscall fault at {pc:#010x}: {source}")]
    Syscall {
        /// Address of the syscall instruction.
        pc: u32,
        /// Underlying fault.
        #[source]
        source: SyscallError,
    },
}

impl PipelineError {
    /// Classifies the error.
    ///
    /// # Returns
    ///
    /// The [`ErrorClass`] that decides whether the run stops.
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::LatchCardinality { .. } | Self::UnknownInstruction { .. } | Self::Memory { .. } => {
                ErrorClass::Fatal
            }
            Self::UninitializedRegister { .. } | Self::OutOfReservation { .. } => ErrorClass::Policy,
            Self::Execute {
                source: ExecuteError::TrapConditionMet(_),
                ..
            } => ErrorClass::LegacyTrap,
            Self::Execute { .. } | Self::Syscall { .. } => ErrorClass::Architectural,
        }
    }

    /// Returns `true` if the run cannot continue after this error.
    pub const fn halts(&self) -> bool {
        !matches!(self.class(), ErrorClass::Architectural)
    }
}

/// Errors raised while building a simulator.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Delay slot count outside the supported range.
    #[error("branch delay slots must be 2 or 3, got {0}")]
    InvalidDelaySlots(u32),

    /// A BTB with no entries.
    #[error("BTB size must be non-zero")]
    EmptyBtb,

    /// Inconsistent cache geometry.
    #[error("{cache} cache: {reason}")]
    InvalidCacheGeometry {
        /// Which cache.
        cache: &'static str,
        /// What is wrong.
        reason: String,
    },

    /// Main memory of size zero or not word-sized.
    #[error("memory size {0} must be a non-zero multiple of 8")]
    InvalidMemorySize(usize),

    /// A register index outside `1..=31`.
    #[error("initial value for invalid register {0}")]
    InvalidRegister(u8),

    /// An image segment that does not fit in main memory.
    #[error("segment at {addr:#010x} of {len} bytes does not fit in memory")]
    SegmentOutOfBounds {
        /// Segment base.
        addr: u32,
        /// Segment length.
        len: usize,
    },

    /// Malformed JSON configuration.
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors raised while loading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File system failure.
    #[error("failed to read image: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed object file.
    #[error("failed to parse ELF: {0}")]
    Elf(#[from] object::Error),

    /// ELF that is not a 32-bit executable image.
    #[error("unsupported ELF: {0}")]
    Unsupported(&'static str),

    /// Address arithmetic overflowed the 32-bit address space.
    #[error("segment at {addr:#x} does not fit the 32-bit address space")]
    AddressOverflow {
        /// Segment base.
        addr: u64,
    },
}
