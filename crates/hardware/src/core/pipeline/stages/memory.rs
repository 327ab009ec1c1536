//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the pipeline. It handles:
//! 1. **Latency:** Holds the pipeline while a data access waits on the data cache or
//!    main memory.
//! 2. **Reservation Check:** Flags accesses outside every loaded segment.
//! 3. **Data Path:** Loads with sign or zero extension, stores, load-reserved,
//!    store-conditional and atomic read-modify-write operations.
//! 4. **Commit Point:** Raises the errors carried from earlier stages and requests DLX
//!    trap services. Records reaching Memory can no longer be squashed.

use crate::common::data::{AccessType, MemWidth};
use crate::common::error::{MemoryError, PipelineError};
use crate::common::value::{Byte, HalfWord};
use crate::config::Severity;
use crate::core::Cpu;
use crate::core::arch::trap::TrapHandler;
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::pipeline::stages::StageOutput;
use crate::core::pipeline::traits::LatchRecord;
use crate::core::units::memory::MemoryHierarchy;
use crate::isa::instruction::{AmoOp, MemAccess, MemKind};

/// Remaining wait of the data access at the front of EX/MEM.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryWait {
    pending: Option<(u64, u32)>,
}

impl MemoryWait {
    /// Decides, at the start of a cycle, whether the access in `entry` is still waiting.
    ///
    /// The delay is sampled from the memory hierarchy the first cycle an instruction is
    /// seen and counted down afterwards.
    ///
    /// # Returns
    ///
    /// `true` if the pipeline must hold this cycle.
    pub fn must_wait(&mut self, entry: &ExMemEntry, memory: &MemoryHierarchy) -> bool {
        if entry.is_bubble() || entry.inst.mem.is_none() {
            self.pending = None;
            return false;
        }
        let remaining = match self.pending {
            Some((seq, remaining)) if seq == entry.seq => remaining,
            _ => memory.data_delay(entry.result.lo),
        };
        if remaining > 0 {
            self.pending = Some((entry.seq, remaining - 1));
            true
        } else {
            self.pending = Some((entry.seq, 0));
            false
        }
    }

    /// Forgets any pending access.
    pub const fn reset(&mut self) {
        self.pending = None;
    }
}

fn amo(op: AmoOp, old: u32, operand: u32) -> u32 {
    match op {
        AmoOp::Swap => operand,
        AmoOp::Add => old.wrapping_add(operand),
        AmoOp::Xor => old ^ operand,
        AmoOp::And => old & operand,
        AmoOp::Or => old | operand,
        AmoOp::Min => (old as i32).min(operand as i32) as u32,
        AmoOp::Max => (old as i32).max(operand as i32) as u32,
        AmoOp::Minu => old.min(operand),
        AmoOp::Maxu => old.max(operand),
    }
}

fn extend(raw: u32, access: MemAccess) -> u32 {
    match (access.width, access.signed) {
        (MemWidth::Byte, true) => Byte::new(raw as u8).sign_extend().unsigned(),
        (MemWidth::Byte, false) => Byte::new(raw as u8).zero_extend().unsigned(),
        (MemWidth::Half, true) => HalfWord::new(raw as u16).sign_extend().unsigned(),
        (MemWidth::Half, false) => HalfWord::new(raw as u16).zero_extend().unsigned(),
        _ => raw,
    }
}

fn perform(
    access: MemAccess,
    addr: u32,
    data: u32,
    memory: &mut MemoryHierarchy,
) -> Result<u32, MemoryError> {
    match access.kind {
        MemKind::Load | MemKind::LoadReserved => {
            let raw = memory.load(addr, access.width)?;
            Ok(extend(raw, access))
        }
        MemKind::Store | MemKind::StoreConditional => {
            memory.store(addr, access.width, data)?;
            Ok(0)
        }
        MemKind::Amo(op) => {
            let old = memory.load(addr, MemWidth::Word)?;
            memory.store(addr, MemWidth::Word, amo(op, old, data))?;
            Ok(old)
        }
    }
}

/// Executes the memory access stage.
///
/// # Arguments
///
/// * `cpu` - The CPU; only the memory hierarchy and configuration are used.
/// * `input` - The EX/MEM record, already a bubble if it was squashed this cycle.
/// * `traps` - Handler for DLX trap services.
///
/// # Returns
///
/// The MEM/WB record, or a bubble and the error for faulting instructions.
pub fn mem_stage(cpu: &mut Cpu, input: &ExMemEntry, traps: &mut dyn TrapHandler) -> StageOutput<MemWbEntry> {
    if input.is_bubble() {
        return StageOutput::bubble();
    }
    if let Some(fault) = &input.fault {
        return StageOutput::fault(fault.clone());
    }

    let mut next = MemWbEntry {
        seq: input.seq,
        pc: input.pc,
        inst: input.inst.clone(),
        value: input.value(),
        hi: input.result.hi,
    };
    if let Some((id, arg)) = input.service {
        match traps.trap(id, arg) {
            Ok(value) => next.value = value,
            Err(source) => return StageOutput::fault(PipelineError::Execute { pc: input.pc, source }),
        }
    }
    let Some(access) = input.inst.mem else {
        return StageOutput::ok(next);
    };

    let addr = input.result.lo;
    if !cpu.memory.is_reserved(addr, access.width) {
        let kind = match access.kind {
            MemKind::Load | MemKind::LoadReserved => AccessType::Read,
            _ => AccessType::Write,
        };
        let error = PipelineError::OutOfReservation {
            addr,
            access: kind,
            pc: input.pc,
        };
        match cpu.config.pipeline.memory_reservation {
            Severity::Warn => tracing::warn!(%error),
            Severity::Error => return StageOutput::fault(error),
        }
    }

    match perform(access, addr, input.store_data, &mut cpu.memory) {
        Ok(value) => {
            tracing::trace!(
                seq = input.seq,
                pc = format_args!("{:#010x}", input.pc),
                addr = format_args!("{addr:#010x}"),
                value = format_args!("{value:#010x}"),
                "MEM"
            );
            if access.kind.produces_value() {
                next.value = value;
            }
            StageOutput::ok(next)
        }
        Err(source) => StageOutput::fault(PipelineError::Memory {
            pc: input.pc,
            source,
        }),
    }
}
