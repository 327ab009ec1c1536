//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It:
//! 1. **Commits:** Writes the result to its destination register, or to HI and LO.
//! 2. **System Operations:** Stops the run on breakpoints and `TRAP 0`, and hands
//!    system calls to the syscall handler.
//! 3. **Interrupts:** Tells the cycle driver to halt or to flush and restart fetching.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::PipelineError;
use crate::common::reg::Reg;
use crate::core::Cpu;
use crate::core::arch::syscall::{self, SyscallHandler, SyscallRequest};
use crate::core::pipeline::latches::MemWbEntry;
use crate::core::pipeline::signals::{HaltReason, Interrupt};
use crate::core::pipeline::traits::LatchRecord;
use crate::isa::instruction::{Destination, SystemOp};

/// Everything Write-Back produced this cycle.
#[derive(Clone, Debug, Default)]
pub struct WritebackOutput {
    /// An instruction was retired.
    pub retired: bool,
    /// Request to halt or restart the pipeline.
    pub interrupt: Option<Interrupt>,
    /// Error raised by a system call.
    pub exception: Option<PipelineError>,
}

/// Executes the writeback stage.
///
/// # Arguments
///
/// * `cpu` - The CPU; the register file is written and syscalls may access memory.
/// * `input` - The committed MEM/WB record.
/// * `syscalls` - Handler for system calls.
///
/// # Returns
///
/// Whether an instruction retired and any interrupt or syscall error.
pub fn wb_stage(cpu: &mut Cpu, input: &MemWbEntry, syscalls: &mut dyn SyscallHandler) -> WritebackOutput {
    if input.is_bubble() {
        return WritebackOutput::default();
    }

    let inst = &input.inst;
    match inst.dest {
        Destination::None => {}
        Destination::Reg(reg) => cpu.regs.write(reg, input.value),
        Destination::HiLo => {
            cpu.regs.write(Reg::Hi, input.hi);
            cpu.regs.write(Reg::Lo, input.value);
        }
    }
    tracing::trace!(
        seq = input.seq,
        pc = format_args!("{:#010x}", input.pc),
        mnemonic = inst.mnemonic,
        value = format_args!("{:#010x}", input.value),
        "WB"
    );

    let mut output = WritebackOutput {
        retired: true,
        ..WritebackOutput::default()
    };
    let resume = Interrupt::Resume {
        pc: input.pc.wrapping_add(INSTRUCTION_SIZE),
    };

    match inst.system {
        Some(SystemOp::Break) => output.interrupt = Some(Interrupt::Halt(HaltReason::Break)),
        Some(SystemOp::Trap) if inst.imm == 0 => {
            output.interrupt = Some(Interrupt::Halt(HaltReason::TrapStop));
        }
        Some(SystemOp::Syscall) => {
            cpu.stats.syscalls += 1;
            let isa = cpu.config.general.isa;
            let serviced = SyscallRequest::new(isa, input.pc, &cpu.regs, &mut cpu.memory)
                .and_then(|mut request| syscalls.do_syscall(&mut request));
            match serviced {
                Ok(outcome) => {
                    if let Some(value) = outcome.result {
                        cpu.regs.write(syscall::result_register(isa), value);
                    }
                    output.interrupt = Some(match outcome.exit {
                        Some(code) => Interrupt::Halt(HaltReason::SyscallExit(code)),
                        None => resume,
                    });
                }
                Err(source) => {
                    output.exception = Some(PipelineError::Syscall {
                        pc: input.pc,
                        source,
                    });
                    output.interrupt = Some(resume);
                }
            }
        }
        Some(SystemOp::Trap) | None => {}
    }
    output
}
