//! Main Execution Loop.
//!
//! This module implements the clock cycle of the CPU. Each call to [`Cpu::tick`]:
//! 1. **Checks:** Verifies every latch holds exactly its configured number of records.
//! 2. **Hazards:** Decides whether a data access or a load-use hazard holds the pipeline.
//! 3. **Stages:** Runs Fetch, Writeback, Decode, Execute, Branch Prediction and Memory,
//!    each reading only the records committed at the end of the previous cycle.
//! 4. **Commit:** Advances every latch at once, applies squashes and interrupts, and
//!    reports the error raised this cycle.

use super::Cpu;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::PipelineError;
use crate::core::arch::syscall::SyscallHandler;
use crate::core::arch::trap::TrapHandler;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::pipeline::signals::{FlushRequest, HaltReason, Interrupt};
use crate::core::pipeline::stages::fetch::{self, FetchOutput};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, predict_stage, wb_stage,
};
use crate::core::pipeline::traits::LatchRecord;

/// Outcome of one committed cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// The run stopped this cycle.
    pub halt: Option<HaltReason>,
    /// The highest-priority error raised this cycle.
    pub exception: Option<PipelineError>,
}

/// How the pipeline moves this cycle.
enum Flow {
    /// A data access is still waiting; only Writeback runs.
    MemoryWait,
    /// A bubble is inserted between Execute and Memory.
    LoadUse,
    /// Every stage runs; Fetch already has.
    Advance(FetchOutput),
}

fn unless_squashed<T: LatchRecord>(record: T, flush: &FlushRequest) -> T {
    if !record.is_bubble() && flush.contains(record.seq()) {
        T::bubble()
    } else {
        record
    }
}

impl Cpu {
    /// Simulates one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `syscalls` - Handler for system calls reaching Writeback.
    /// * `traps` - Handler for DLX trap services reaching Memory.
    ///
    /// # Returns
    ///
    /// The halt reason, if the run stopped, and the error surfaced this cycle.
    /// Errors of Fetch, Decode and Execute surface when their instruction reaches
    /// Memory, so errors surface in program order and squashed instructions raise none.
    /// A Writeback error wins over a Memory error of the same cycle.
    pub fn tick(&mut self, syscalls: &mut dyn SyscallHandler, traps: &mut dyn TrapHandler) -> CycleReport {
        if let Err(error) = self.latches.check() {
            return self.report(None, Some(error));
        }
        self.previous_pcs = self.stage_pcs();
        self.stats.cycles += 1;

        let id_ex = self.latches.id_ex.current();
        let ex_mem = self.latches.ex_mem.current();
        let mem_wb = self.latches.mem_wb.current();

        let pipeline = &self.config.pipeline;
        let flow = if self.mem_wait.must_wait(&ex_mem, &self.memory) {
            Flow::MemoryWait
        } else if pipeline.forwarding
            && pipeline.load_stall_bubble
            && hazards::need_stall_load_use(&id_ex, &ex_mem)
        {
            Flow::LoadUse
        } else {
            Flow::Advance(fetch_stage(self))
        };

        let wb = wb_stage(self, &mem_wb, syscalls);
        if wb.retired {
            self.stats.instructions_retired += 1;
        }
        if let Some(interrupt) = wb.interrupt {
            let resume = match interrupt {
                Interrupt::Resume { pc } => pc,
                Interrupt::Halt(_) => mem_wb.pc.wrapping_add(INSTRUCTION_SIZE),
            };
            self.stats.interrupts += 1;
            self.latches.flush();
            self.fetch.restart(resume);
            self.decode.reset();
            self.mem_wait.reset();
            tracing::debug!(?interrupt, pc = format_args!("{:#010x}", mem_wb.pc), "pipeline interrupted");
            let halt = match interrupt {
                Interrupt::Halt(reason) => Some(reason),
                Interrupt::Resume { .. } => None,
            };
            return self.report(halt, wb.exception);
        }

        match flow {
            Flow::MemoryWait => {
                self.stats.stalls_mem += 1;
                self.latches.mem_wb.advance(MemWbEntry::bubble());
                self.latches.bypass.advance(mem_wb);
                self.report(None, wb.exception)
            }
            Flow::LoadUse => {
                self.stats.stalls_load_use += 1;
                // Fetch is held, so a squash it has yet to apply is honored here.
                let ex_mem = if !ex_mem.is_bubble() && fetch::pending_squash(self).contains(&ex_mem.seq) {
                    self.stats.squashed += 1;
                    ExMemEntry::bubble()
                } else {
                    ex_mem
                };
                let memory = mem_stage(self, &ex_mem, traps);
                self.latches.ex_mem.advance(ExMemEntry::bubble());
                self.latches.mem_wb.advance(memory.next);
                self.latches.bypass.advance(mem_wb);
                self.report(None, wb.exception.or(memory.exception))
            }
            Flow::Advance(fetch) => {
                let flush = &fetch.flush;
                let if_id = unless_squashed(self.latches.if_id.current(), flush);
                let id_ex = unless_squashed(id_ex, flush);
                let ex_mem = unless_squashed(ex_mem, flush);
                let resolution = unless_squashed(self.latches.resolution.current(), flush);

                let decode = decode_stage(self, &if_id);
                let execute = execute_stage(self, &id_ex, &ex_mem);
                let prediction = predict_stage(self, &resolution);
                let memory = mem_stage(self, &ex_mem, traps);

                if fetch.stalled {
                    self.stats.fetch_bubbles += 1;
                }
                if !flush.is_empty() {
                    self.stats.flushes += 1;
                    self.stats.squashed += flush.squashed.len() as u64;
                }

                let latches = &mut self.latches;
                latches.if_id.advance(fetch.fetched);
                latches.id_ex.advance(decode);
                latches.ex_mem.advance(execute.next);
                latches.mem_wb.advance(memory.next);
                latches.bypass.advance(mem_wb);
                latches.lookup.advance(fetch.lookup);
                latches.prediction.advance(prediction);
                latches.resolution.advance(execute.outcome);
                latches.feedback.advance(execute.outcome);
                let _ = latches.squash(&flush.squashed);

                self.report(None, wb.exception.or(memory.exception))
            }
        }
    }

    fn report(&mut self, halt: Option<HaltReason>, exception: Option<PipelineError>) -> CycleReport {
        if let Some(error) = &exception {
            self.stats.exceptions += 1;
            tracing::debug!(%error, cycle = self.stats.cycles, "error surfaced");
        }
        CycleReport { halt, exception }
    }
}
