//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the records carried between the five stages and the
//! branch-prediction unit, and the fixed-depth latch that holds them:
//! 1. **Instruction Flow:** IF/ID, ID/EX, EX/MEM and MEM/WB entries.
//! 2. **Side Paths:** The Fetch lookup and prediction exchanged with the predictor, the
//!    resolved branch outcome fed to the predictor and back to Fetch, and the write-back
//!    bypass used for forwarding.
//! 3. **Latch Protocol:** Every latch holds exactly its configured number of records; a
//!    commit pops the oldest record and pushes the newly computed one.
//!
//! An instruction that faults in Fetch, Decode or Execute keeps flowing with its error
//! in `fault` and an empty instruction. Memory raises the error, so a squash that
//! catches the record first drops it.

use std::collections::VecDeque;

use crate::common::constants::BUBBLE_SEQ;
use crate::common::error::PipelineError;
use crate::core::arch::trap::TrapId;
use crate::core::pipeline::signals::FlushRequest;
use crate::core::pipeline::traits::{LatchRecord, PipelineLatch};
use crate::core::units::alu::AluResult;
use crate::isa::instruction::Instruction;

/// Entry in the IF/ID pipeline latch (Fetch to Decode stage).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IfIdEntry {
    /// Fetch sequence number.
    pub seq: u64,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Raw instruction word.
    pub word: u32,
    /// Error raised by the fetch.
    pub fault: Option<PipelineError>,
}

/// Register values read by Decode for each operand selector.
///
/// Non-register selectors leave their slot at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperandValues {
    /// ALU operand A.
    pub a: u32,
    /// ALU operand B.
    pub b: u32,
    /// Left comparison operand.
    pub lhs: u32,
    /// Right comparison operand.
    pub rhs: u32,
    /// Store data.
    pub data: u32,
}

/// Entry in the ID/EX pipeline latch (Decode to Execute stage).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdExEntry {
    /// Fetch sequence number.
    pub seq: u64,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Register values read at decode time.
    pub values: OperandValues,
    /// Error raised by Fetch or Decode.
    pub fault: Option<PipelineError>,
}

impl IdExEntry {
    /// A record that carries `fault` in place of an instruction.
    pub fn faulted(seq: u64, pc: u32, fault: PipelineError) -> Self {
        Self {
            seq,
            pc,
            fault: Some(fault),
            ..Self::default()
        }
    }
}

/// Entry in the EX/MEM pipeline latch (Execute to Memory stage).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExMemEntry {
    /// Fetch sequence number.
    pub seq: u64,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction.
    pub inst: Instruction,
    /// ALU result; `lo` is the effective address of memory operations.
    pub result: AluResult,
    /// Link address written instead of the ALU result by linking transfers.
    pub link: Option<u32>,
    /// Data to be stored (stores, SC and AMOs).
    pub store_data: u32,
    /// DLX trap service requested in Memory, with its argument.
    pub service: Option<(TrapId, u32)>,
    /// Error raised by an earlier stage.
    pub fault: Option<PipelineError>,
}

impl ExMemEntry {
    /// A record that carries `fault` in place of an instruction.
    pub fn faulted(seq: u64, pc: u32, fault: PipelineError) -> Self {
        Self {
            seq,
            pc,
            fault: Some(fault),
            ..Self::default()
        }
    }

    /// The value this instruction writes to its destination register.
    pub fn value(&self) -> u32 {
        self.link.unwrap_or(self.result.lo)
    }
}

/// Entry in the MEM/WB pipeline latch (Memory to Writeback stage), also the
/// write-back bypass record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemWbEntry {
    /// Fetch sequence number.
    pub seq: u64,
    /// Program counter of the instruction.
    pub pc: u32,
    /// Decoded instruction.
    pub inst: Instruction,
    /// Register result: load data, link address or ALU low word.
    pub value: u32,
    /// ALU high word, written to HI by HI:LO producers.
    pub hi: u32,
}

/// A resolved control transfer, sent from Execute to the predictor and to Fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchOutcome {
    /// Fetch sequence number of the transfer.
    pub seq: u64,
    /// Address of the transfer.
    pub pc: u32,
    /// BTB key: the last address of the architectural delay window.
    pub key: u32,
    /// Computed target.
    pub target: u32,
    /// First address after the delay window on the actual path.
    pub resume: u32,
    /// Whether the transfer is taken.
    pub taken: bool,
    /// Delay slots are nullified when not taken.
    pub likely: bool,
}

/// The address Fetch will fetch next, sent to the predictor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchLookup {
    /// Sequence number the fetched instruction will receive.
    pub seq: u64,
    /// Address to be fetched.
    pub pc: u32,
}

/// The predictor's answer for a lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Prediction {
    /// Sequence number from the lookup.
    pub seq: u64,
    /// Looked-up address.
    pub pc: u32,
    /// Predicted-taken target, if any.
    pub target: Option<u32>,
}

macro_rules! latch_record {
    ($($entry:ty),* $(,)?) => {
        $(
            impl LatchRecord for $entry {
                fn bubble() -> Self {
                    Self::default()
                }

                fn seq(&self) -> u64 {
                    self.seq
                }
            }
        )*
    };
}

latch_record!(
    IfIdEntry,
    IdExEntry,
    ExMemEntry,
    MemWbEntry,
    BranchOutcome,
    FetchLookup,
    Prediction,
);

/// A fixed-depth queue of records between two pipeline components.
#[derive(Clone, Debug)]
pub struct Latch<T> {
    name: &'static str,
    depth: usize,
    records: VecDeque<T>,
}

impl<T: LatchRecord> Latch<T> {
    /// Creates a latch filled with bubbles.
    ///
    /// # Arguments
    ///
    /// * `name` - Latch name, reported on cardinality violations.
    /// * `depth` - Number of records held.
    pub fn new(name: &'static str, depth: usize) -> Self {
        Self {
            name,
            depth,
            records: std::iter::repeat_with(T::bubble).take(depth).collect(),
        }
    }

    /// The oldest record: the one the consuming stage reads this cycle.
    pub fn front(&self) -> Option<&T> {
        self.records.front()
    }

    /// A copy of the oldest record, or a bubble.
    pub fn current(&self) -> T {
        self.front().cloned().unwrap_or_else(T::bubble)
    }

    /// All records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &T> + '_ {
        self.records.iter()
    }

    /// Commits a cycle: drops the oldest record and appends `next`.
    pub fn advance(&mut self, next: T) {
        if self.depth == 0 {
            return;
        }
        let _ = self.records.pop_front();
        self.records.push_back(next);
    }
}

impl<T: LatchRecord> PipelineLatch for Latch<T> {
    fn flush(&mut self) {
        self.records.iter_mut().for_each(|r| *r = T::bubble());
    }

    fn squash(&mut self, seqs: &[u64]) -> usize {
        let mut squashed = 0;
        for record in &mut self.records {
            if !record.is_bubble() && seqs.contains(&record.seq()) {
                *record = T::bubble();
                squashed += 1;
            }
        }
        squashed
    }

    fn is_idle(&self) -> bool {
        self.records.iter().all(LatchRecord::is_bubble)
    }

    fn check(&self) -> Result<(), PipelineError> {
        if self.records.len() == self.depth {
            Ok(())
        } else {
            Err(PipelineError::LatchCardinality {
                latch: self.name,
                expected: self.depth,
                found: self.records.len(),
            })
        }
    }
}

/// The nine latches of the pipeline.
#[derive(Clone, Debug)]
pub struct PipelineLatches {
    /// Fetch to Decode.
    pub if_id: Latch<IfIdEntry>,
    /// Decode to Execute.
    pub id_ex: Latch<IdExEntry>,
    /// Execute to Memory.
    pub ex_mem: Latch<ExMemEntry>,
    /// Memory to Write-Back.
    pub mem_wb: Latch<MemWbEntry>,
    /// Fetch to the predictor.
    pub lookup: Latch<FetchLookup>,
    /// Predictor to Fetch.
    pub prediction: Latch<Prediction>,
    /// Execute to the predictor.
    pub resolution: Latch<BranchOutcome>,
    /// Write-Back to Execute (forwarding).
    pub bypass: Latch<MemWbEntry>,
    /// Execute to Fetch; `branch_delay_slots - 1` deep.
    pub feedback: Latch<BranchOutcome>,
}

impl PipelineLatches {
    /// Creates all latches filled with bubbles.
    ///
    /// # Arguments
    ///
    /// * `feedback_depth` - Depth of the Execute-to-Fetch latch.
    pub fn new(feedback_depth: usize) -> Self {
        Self {
            if_id: Latch::new("IF/ID", 1),
            id_ex: Latch::new("ID/EX", 1),
            ex_mem: Latch::new("EX/MEM", 1),
            mem_wb: Latch::new("MEM/WB", 1),
            lookup: Latch::new("Fetch->BP", 1),
            prediction: Latch::new("BP->Fetch", 1),
            resolution: Latch::new("Execute->BP", 1),
            bypass: Latch::new("WB bypass", 1),
            feedback: Latch::new("Execute->Fetch", feedback_depth),
        }
    }

    fn all(&self) -> [&dyn PipelineLatch; 9] {
        [
            &self.if_id,
            &self.id_ex,
            &self.ex_mem,
            &self.mem_wb,
            &self.lookup,
            &self.prediction,
            &self.resolution,
            &self.bypass,
            &self.feedback,
        ]
    }

    fn all_mut(&mut self) -> [&mut dyn PipelineLatch; 9] {
        [
            &mut self.if_id,
            &mut self.id_ex,
            &mut self.ex_mem,
            &mut self.mem_wb,
            &mut self.lookup,
            &mut self.prediction,
            &mut self.resolution,
            &mut self.bypass,
            &mut self.feedback,
        ]
    }

    /// Verifies the cardinality of every latch.
    pub fn check(&self) -> Result<(), PipelineError> {
        self.all().iter().try_for_each(|l| l.check())
    }

    /// Replaces every record in every latch with a bubble.
    pub fn flush(&mut self) {
        for latch in self.all_mut() {
            latch.flush();
        }
    }

    /// Squashes the given instructions wherever they are still queued.
    ///
    /// # Returns
    ///
    /// The number of instruction records removed from the four stage latches.
    pub fn squash(&mut self, seqs: &[u64]) -> usize {
        if seqs.is_empty() {
            return 0;
        }
        let squashed = self.if_id.squash(seqs)
            + self.id_ex.squash(seqs)
            + self.ex_mem.squash(seqs)
            + self.mem_wb.squash(seqs);
        let _ = self.resolution.squash(seqs) + self.feedback.squash(seqs);
        squashed
    }

    /// Returns `true` if no latch holds an instruction.
    pub fn is_idle(&self) -> bool {
        self.all().iter().all(|l| l.is_idle())
    }

    /// Sequence number and address of each instruction in IF/ID, ID/EX and EX/MEM,
    /// oldest first.
    pub fn in_flight(&self) -> Vec<(u64, u32)> {
        let mut flight: Vec<(u64, u32)> = [
            self.ex_mem.front().map(|e| (e.seq, e.pc)),
            self.id_ex.front().map(|e| (e.seq, e.pc)),
            self.if_id.front().map(|e| (e.seq, e.pc)),
        ]
        .into_iter()
        .flatten()
        .filter(|&(seq, _)| seq != BUBBLE_SEQ)
        .collect();
        flight.sort_unstable_by_key(|&(seq, _)| seq);
        flight
    }

    /// Builds the flush request for `squashed`, noting which stage latches hold them.
    pub fn flush_request(&self, squashed: Vec<u64>) -> FlushRequest {
        let holds = |seq: Option<u64>| seq.is_some_and(|s| squashed.contains(&s));
        FlushRequest {
            decode: holds(self.if_id.front().map(LatchRecord::seq)),
            execute: holds(self.id_ex.front().map(LatchRecord::seq)),
            memory: holds(self.ex_mem.front().map(LatchRecord::seq)),
            squashed,
        }
    }
}
