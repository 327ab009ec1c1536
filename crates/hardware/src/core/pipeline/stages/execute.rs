//! Execute (EX) Stage.
//!
//! This module implements the third stage of the pipeline. It performs:
//! 1. **Operand Resolution:** Selects register, immediate and PC operands, forwarding
//!    in-flight results when forwarding is enabled.
//! 2. **ALU:** Computes the result, the effective address or the transfer target.
//! 3. **Control Resolution:** Evaluates the branch condition and reports the outcome to
//!    the predictor and to Fetch.
//!
//! ALU errors and DLX trap services are not acted on here. Both ride in the EX/MEM
//! record until Memory, which a squashed instruction never reaches.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::PipelineError;
use crate::config::IsaMode;
use crate::core::Cpu;
use crate::core::arch::trap::TrapId;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{BranchOutcome, ExMemEntry, IdExEntry};
use crate::core::pipeline::traits::LatchRecord;
use crate::core::units::alu::{Alu, AluResult};
use crate::isa::instruction::{AluFunction, OpClass, Operand};

/// Everything Execute produced this cycle.
#[derive(Clone, Debug)]
pub struct ExecuteOutput {
    /// Record for EX/MEM.
    pub next: ExMemEntry,
    /// Resolved control transfer, or a bubble.
    pub outcome: BranchOutcome,
}

impl ExecuteOutput {
    fn pass(next: ExMemEntry) -> Self {
        Self {
            next,
            outcome: BranchOutcome::bubble(),
        }
    }
}

/// Executes the instruction execute stage.
///
/// # Arguments
///
/// * `cpu` - The CPU; Execute reads the register file and the committed MEM/WB and
///   bypass records.
/// * `input` - The ID/EX record, already a bubble if it was squashed this cycle.
/// * `ex_mem` - The committed EX/MEM record, a bubble if it was squashed this cycle.
///
/// # Returns
///
/// The EX/MEM record and, for control transfers, the resolved outcome.
pub fn execute_stage(cpu: &Cpu, input: &IdExEntry, ex_mem: &ExMemEntry) -> ExecuteOutput {
    if input.is_bubble() {
        return ExecuteOutput::pass(ExMemEntry::bubble());
    }
    if let Some(fault) = &input.fault {
        return ExecuteOutput::pass(ExMemEntry::faulted(input.seq, input.pc, fault.clone()));
    }

    let inst = &input.inst;
    let pc = input.pc;
    let mem_wb = cpu.latches.mem_wb.current();
    let bypass = cpu.latches.bypass.current();
    let forwarding = cpu.config.pipeline.forwarding;

    let resolve = |operand: Operand, decoded: u32| -> u32 {
        match operand {
            Operand::Zero => 0,
            Operand::Immediate => inst.imm,
            Operand::Pc => pc,
            Operand::NextPc => pc.wrapping_add(INSTRUCTION_SIZE),
            Operand::Reg(reg) if reg.is_zero() => 0,
            Operand::Reg(reg) if forwarding => {
                hazards::forward(reg, ex_mem, &mem_wb, &bypass).unwrap_or_else(|| cpu.regs.read(reg))
            }
            Operand::Reg(_) => decoded,
        }
    };

    let a = resolve(inst.src_a, input.values.a);
    let b = resolve(inst.src_b, input.values.b);
    let result = match inst.class {
        OpClass::Nop | OpClass::Fence => AluResult::default(),
        _ => match Alu::apply(inst.alu, a, b) {
            Ok(result) => result,
            Err(source) => {
                let fault = PipelineError::Execute { pc, source };
                return ExecuteOutput::pass(ExMemEntry::faulted(input.seq, pc, fault));
            }
        },
    };
    let service = match inst.alu {
        AluFunction::Trap => TrapId::try_from(b).ok().filter(|&id| id != TrapId::Stop).map(|id| (id, a)),
        _ => None,
    };
    let store_data = inst
        .mem
        .and_then(|m| m.data)
        .map_or(0, |reg| resolve(Operand::Reg(reg), input.values.data));

    let slots = cpu.config.architectural_delay_slots();
    let fallthrough = pc.wrapping_add(INSTRUCTION_SIZE * (slots + 1));
    let mut link = None;
    let mut outcome = BranchOutcome::bubble();
    if let Some(control) = inst.control {
        let lhs = resolve(control.lhs, input.values.lhs);
        let rhs = resolve(control.rhs, input.values.rhs);
        let taken = control.condition.evaluate(lhs as i32, rhs as i32);
        let mut target = result.lo;
        if cpu.config.general.isa == IsaMode::RiscV && inst.class == OpClass::JumpRegister {
            target &= !1;
        }
        outcome = BranchOutcome {
            seq: input.seq,
            pc,
            key: pc.wrapping_add(INSTRUCTION_SIZE * slots),
            target,
            resume: if taken { target } else { fallthrough },
            taken,
            likely: control.likely,
        };
        if control.link {
            link = Some(fallthrough);
        }
        tracing::trace!(
            seq = input.seq,
            pc = format_args!("{pc:#010x}"),
            target = format_args!("{target:#010x}"),
            taken,
            "branch resolved"
        );
    }

    tracing::trace!(
        seq = input.seq,
        pc = format_args!("{pc:#010x}"),
        mnemonic = inst.mnemonic,
        lo = format_args!("{:#010x}", result.lo),
        "EX"
    );

    ExecuteOutput {
        next: ExMemEntry {
            seq: input.seq,
            pc,
            inst: inst.clone(),
            result,
            link,
            store_data,
            service,
            fault: None,
        },
        outcome,
    }
}
