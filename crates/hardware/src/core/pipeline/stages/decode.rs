//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the pipeline. It performs:
//! 1. **Decoding:** Turns the fetched word into an [`Instruction`] for the active ISA.
//! 2. **Initialization Check:** Flags source registers that were never written, unless
//!    a recently decoded instruction is about to produce them (forwarding only) or the
//!    check is inside the grace window after a control transfer.
//! 3. **Operand Read:** Reads every register operand from the register file.

use crate::common::error::PipelineError;
use crate::config::Severity;
use crate::core::Cpu;
use crate::core::arch::gpr::RegisterSet;
use crate::core::pipeline::hazards::DestinationRing;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry, OperandValues};
use crate::core::pipeline::traits::LatchRecord;
use crate::isa;
use crate::isa::instruction::{Destination, Instruction, Operand};

/// State kept by Decode across cycles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeState {
    ring: DestinationRing,
    grace: u32,
}

impl DecodeState {
    /// Forgets in-flight destinations and any open grace window.
    pub fn reset(&mut self) {
        self.ring.clear();
        self.grace = 0;
    }
}

fn read(regs: &RegisterSet, operand: Operand) -> u32 {
    operand.register().map_or(0, |r| regs.read(r))
}

fn operand_values(inst: &Instruction, regs: &RegisterSet) -> OperandValues {
    let (lhs, rhs) = inst
        .control
        .map_or((0, 0), |c| (read(regs, c.lhs), read(regs, c.rhs)));
    OperandValues {
        a: read(regs, inst.src_a),
        b: read(regs, inst.src_b),
        lhs,
        rhs,
        data: inst
            .mem
            .and_then(|m| m.data)
            .map_or(0, |r| regs.read(r)),
    }
}

/// Executes the instruction decode stage.
///
/// # Arguments
///
/// * `cpu` - The CPU; Decode reads the register file and updates its own state.
/// * `input` - The IF/ID record, already a bubble if it was squashed this cycle.
///
/// # Returns
///
/// The ID/EX record. Fetch errors, unknown words and (when configured to stop)
/// uninitialized reads travel in the record's `fault`.
pub fn decode_stage(cpu: &mut Cpu, input: &IfIdEntry) -> IdExEntry {
    if input.is_bubble() {
        cpu.decode.ring.push(Destination::None);
        return IdExEntry::bubble();
    }

    let decoded = match &input.fault {
        Some(fault) => Err(fault.clone()),
        None => isa::decode(cpu.config.general.isa, input.word, input.pc),
    };
    let inst = match decoded {
        Ok(inst) => inst,
        Err(error) => {
            cpu.decode.ring.push(Destination::None);
            return IdExEntry::faulted(input.seq, input.pc, error);
        }
    };

    let pipeline = &cpu.config.pipeline;
    let in_grace = cpu.decode.grace > 0;
    if in_grace {
        cpu.decode.grace -= 1;
    } else {
        for reg in inst.sources() {
            if cpu.regs.is_initialized(reg) || (pipeline.forwarding && cpu.decode.ring.contains(reg)) {
                continue;
            }
            let error = PipelineError::UninitializedRegister { reg, pc: input.pc };
            match pipeline.uninitialized_register {
                Severity::Warn => tracing::warn!(%error),
                Severity::Error => {
                    cpu.decode.ring.push(Destination::None);
                    return IdExEntry::faulted(input.seq, input.pc, error);
                }
            }
        }
    }
    if inst.is_control() && !pipeline.ignore_branch_delay_slots {
        cpu.decode.grace = pipeline.grace_window();
    }
    cpu.decode.ring.push(inst.dest);

    tracing::trace!(
        seq = input.seq,
        pc = format_args!("{:#010x}", input.pc),
        mnemonic = inst.mnemonic,
        "ID"
    );

    let values = operand_values(&inst, &cpu.regs);
    IdExEntry {
        seq: input.seq,
        pc: input.pc,
        inst,
        values,
        fault: None,
    }
}
