//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the pipeline. Each cycle it:
//! 1. **Applies Feedback:** Compares the resolved outcome of a control transfer with the
//!    instructions fetched after it, nullifying delay slots of untaken likely branches and
//!    squashing wrong-path instructions beyond the delay window.
//! 2. **Applies Predictions:** Redirects to the predicted target when the predictor
//!    answered for exactly the instruction fetched last cycle.
//! 3. **Fetches:** Reads the word at the PC through the instruction cache, stalling on a
//!    miss, and hands it to Decode.
//! 4. **Lookups:** Sends the next fetch address to the predictor.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::data::{AccessType, MemWidth};
use crate::common::error::PipelineError;
use crate::config::Severity;
use crate::core::Cpu;
use crate::core::pipeline::latches::{BranchOutcome, FetchLookup, IfIdEntry};
use crate::core::pipeline::signals::FlushRequest;
use crate::core::pipeline::traits::LatchRecord;

/// A redirect that waits for the rest of the delay window to be fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DeferredRedirect {
    remaining: u32,
    target: u32,
}

/// Program counter and bookkeeping owned by Fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchState {
    /// Address of the next instruction to fetch.
    pub pc: u32,
    next_seq: u64,
    last_fetched: Option<(u64, u32)>,
    pending: Option<(u32, u32)>,
    redirect: Option<DeferredRedirect>,
}

impl FetchState {
    /// Creates the state for a run starting at `pc`.
    pub const fn new(pc: u32) -> Self {
        Self {
            pc,
            next_seq: 1,
            last_fetched: None,
            pending: None,
            redirect: None,
        }
    }

    /// Drops every in-progress fetch and resumes at `pc`. Sequence numbers keep counting.
    pub const fn restart(&mut self, pc: u32) {
        self.pc = pc;
        self.last_fetched = None;
        self.pending = None;
        self.redirect = None;
    }

    fn redirect_to(&mut self, target: u32) {
        self.pc = target;
        self.pending = None;
        self.last_fetched = None;
    }
}

/// Everything Fetch produced this cycle.
#[derive(Clone, Debug)]
pub struct FetchOutput {
    /// Record for IF/ID.
    pub fetched: IfIdEntry,
    /// Record for the lookup latch.
    pub lookup: FetchLookup,
    /// Instructions squashed by the feedback this cycle.
    pub flush: FlushRequest,
    /// The fetch waited on the instruction cache.
    pub stalled: bool,
}

/// Instructions in IF/ID, ID/EX and EX/MEM fetched after `feedback`'s transfer.
fn younger_than(cpu: &Cpu, feedback: &BranchOutcome) -> Vec<(u64, u32)> {
    cpu.latches
        .in_flight()
        .into_iter()
        .filter(|&(seq, _)| seq > feedback.seq)
        .collect()
}

/// Sequence numbers a resolved transfer removes: its delay window when an untaken
/// likely branch nullifies it, and everything past the window unless the first
/// instruction there is already on the actual path.
fn squash_set(feedback: &BranchOutcome, younger: &[(u64, u32)], slots: usize) -> Vec<u64> {
    let window = younger.len().min(slots);
    let mut squashed = Vec::new();
    if feedback.likely && !feedback.taken {
        squashed.extend(younger[..window].iter().map(|&(seq, _)| seq));
    }
    let rest = &younger[window..];
    if rest.first().is_some_and(|&(_, pc)| pc != feedback.resume) {
        squashed.extend(rest.iter().map(|&(seq, _)| seq));
    }
    squashed
}

/// Instructions the committed feedback record will squash the next time Fetch runs.
///
/// Used while Fetch is held, so that a stage consuming an instruction early does not
/// act on one that is already known to be on the wrong path.
pub fn pending_squash(cpu: &Cpu) -> Vec<u64> {
    let feedback = cpu.latches.feedback.current();
    if feedback.is_bubble() {
        return Vec::new();
    }
    let slots = cpu.config.architectural_delay_slots() as usize;
    squash_set(&feedback, &younger_than(cpu, &feedback), slots)
}

/// Executes the instruction fetch stage.
///
/// Reads the feedback and prediction latches as committed last cycle and the
/// instructions currently waiting in IF/ID, ID/EX and EX/MEM.
///
/// # Arguments
///
/// * `cpu` - The CPU; only Fetch's own state, the memory hierarchy and the
///   committed latches are touched.
///
/// # Returns
///
/// The fetched record, carrying any fetch error, the lookup and the squash request.
pub fn fetch_stage(cpu: &mut Cpu) -> FetchOutput {
    let slots = cpu.config.architectural_delay_slots() as usize;
    let mut squashed = Vec::new();
    let mut redirected = false;

    let feedback = cpu.latches.feedback.current();
    if !feedback.is_bubble() {
        let younger = younger_than(cpu, &feedback);
        squashed = squash_set(&feedback, &younger, slots);
        let nullify = feedback.likely && !feedback.taken;

        if younger.len() < slots {
            if nullify {
                cpu.fetch.redirect_to(feedback.resume);
                redirected = true;
            } else {
                cpu.fetch.redirect = Some(DeferredRedirect {
                    remaining: (slots - younger.len()) as u32,
                    target: feedback.resume,
                });
            }
        } else {
            let rest = &younger[slots..];
            match rest.first() {
                Some(&(_, pc)) if pc == feedback.resume => {}
                Some(_) => {
                    cpu.fetch.redirect_to(feedback.resume);
                    redirected = true;
                }
                None => {
                    if cpu.fetch.pc != feedback.resume {
                        cpu.fetch.redirect_to(feedback.resume);
                        redirected = true;
                    }
                    cpu.fetch.last_fetched = None;
                }
            }
        }
        if !squashed.is_empty() || redirected {
            tracing::debug!(
                seq = feedback.seq,
                pc = format_args!("{:#010x}", feedback.pc),
                resume = format_args!("{:#010x}", feedback.resume),
                taken = feedback.taken,
                squashed = squashed.len(),
                "control transfer resolved"
            );
        }
    }

    let last = cpu.fetch.last_fetched.take();
    if !redirected && cpu.fetch.redirect.is_none() {
        let prediction = cpu.latches.prediction.current();
        if let (Some(target), Some((seq, pc))) = (prediction.target, last) {
            if !prediction.is_bubble() && prediction.seq == seq && prediction.pc == pc {
                tracing::trace!(
                    pc = format_args!("{pc:#010x}"),
                    target = format_args!("{target:#010x}"),
                    "predicted taken"
                );
                cpu.fetch.redirect_to(target);
            }
        }
    }

    let flush = cpu.latches.flush_request(squashed);
    let pc = cpu.fetch.pc;

    let remaining = match cpu.fetch.pending {
        Some((pending_pc, remaining)) if pending_pc == pc => remaining,
        _ => cpu.memory.fetch_delay(pc),
    };
    if remaining > 0 {
        cpu.fetch.pending = Some((pc, remaining - 1));
        return FetchOutput {
            fetched: IfIdEntry::bubble(),
            lookup: FetchLookup {
                seq: cpu.fetch.next_seq,
                pc,
            },
            flush,
            stalled: true,
        };
    }
    cpu.fetch.pending = None;

    let mut fault = None;
    if pc >= cpu.memory.data_start() && !cpu.memory.is_reserved(pc, MemWidth::Word) {
        let error = PipelineError::OutOfReservation {
            addr: pc,
            access: AccessType::Fetch,
            pc,
        };
        match cpu.config.pipeline.memory_reservation {
            Severity::Warn => tracing::warn!(%error),
            Severity::Error => fault = Some(error),
        }
    }
    let word = if fault.is_some() {
        0
    } else {
        match cpu.memory.fetch(pc) {
            Ok(word) => word,
            Err(source) => {
                fault = Some(PipelineError::Memory { pc, source });
                0
            }
        }
    };

    let seq = cpu.fetch.next_seq;
    cpu.fetch.next_seq += 1;
    cpu.fetch.last_fetched = Some((seq, pc));
    cpu.fetch.pc = pc.wrapping_add(INSTRUCTION_SIZE);
    tracing::trace!(seq, pc = format_args!("{pc:#010x}"), word = format_args!("{word:#010x}"), "IF");

    if let Some(redirect) = cpu.fetch.redirect.as_mut() {
        redirect.remaining -= 1;
        if redirect.remaining == 0 {
            let target = redirect.target;
            cpu.fetch.redirect = None;
            cpu.fetch.redirect_to(target);
        }
    }

    FetchOutput {
        fetched: IfIdEntry { seq, pc, word, fault },
        lookup: FetchLookup {
            seq: cpu.fetch.next_seq,
            pc: cpu.fetch.pc,
        },
        flush,
        stalled: false,
    }
}
