//! Branch Prediction (BP) Step.
//!
//! Runs once per cycle between Execute and Memory. It:
//! 1. **Trains:** Feeds the outcome Execute resolved last cycle into the BTB.
//! 2. **Predicts:** Looks up the address Fetch announced last cycle and answers with a
//!    target when the BTB predicts taken.

use crate::core::Cpu;
use crate::core::pipeline::latches::{BranchOutcome, Prediction};
use crate::core::pipeline::traits::LatchRecord;
use crate::core::units::bru::Lookup;

/// Executes the branch prediction step.
///
/// # Arguments
///
/// * `cpu` - The CPU; the predictor is trained and queried, the lookup latch is read.
/// * `resolution` - The committed Execute-to-predictor record, a bubble if it was
///   squashed this cycle.
///
/// # Returns
///
/// The record for the predictor-to-Fetch latch.
pub fn predict_stage(cpu: &mut Cpu, resolution: &BranchOutcome) -> Prediction {
    if !resolution.is_bubble() {
        cpu.bpu.update(resolution.key, resolution.pc, resolution.target, resolution.taken);
    }

    let lookup = cpu.latches.lookup.current();
    if lookup.is_bubble() {
        return Prediction::bubble();
    }
    let target = match cpu.bpu.lookup(lookup.pc) {
        Lookup::HitPredictTaken(target) => Some(target),
        Lookup::Miss | Lookup::HitPredictNotTaken => None,
    };
    Prediction {
        seq: lookup.seq,
        pc: lookup.pc,
        target,
    }
}
