//! Branch prediction unit (BRU).
//!
//! This module contains the branch condition evaluator used by Execute and the
//! prediction unit run alongside Fetch. The unit performs the following:
//! 1. **Lookup:** Finds the BTB entry for the address Fetch is fetching and asks the
//!    configured direction predictor whether its target should redirect the next fetch.
//! 2. **Update:** Creates or overwrites entries for resolved transfers and advances their
//!    predictor state.
//! 3. **Accounting:** Counts lookups, hits and prediction accuracy.

pub use self::condition::BranchCondition;

/// Branch Target Buffer.
pub mod btb;

/// Branch outcome evaluator.
pub mod condition;

/// Direction predictor state machines.
pub mod predictor;

use self::btb::Btb;
use self::predictor::{DirectionPredictor, PredictorWrapper};
use crate::config::{PredictorConfig, PredictorState};

/// Result of a BTB lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// No entry for the address.
    Miss,
    /// Entry found and predicted taken; redirect to the target.
    HitPredictTaken(u32),
    /// Entry found but predicted not taken.
    HitPredictNotTaken,
}

/// Branch prediction counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BranchStats {
    /// Lookups performed.
    pub lookups: u64,
    /// Lookups that found an entry.
    pub hits: u64,
    /// Resolutions whose entry predicted the actual direction.
    pub correct: u64,
    /// Resolutions whose entry predicted the wrong direction.
    pub incorrect: u64,
}

impl BranchStats {
    /// Fraction of resolved hits that were predicted correctly.
    pub fn accuracy(&self) -> f64 {
        let total = self.correct + self.incorrect;
        if total == 0 {
            0.0
        } else {
            self.correct as f64 / total as f64
        }
    }
}

/// BTB plus a direction predictor.
#[derive(Clone, Debug)]
pub struct BranchPredictionUnit {
    btb: Btb,
    predictor: PredictorWrapper,
    initial_state: PredictorState,
    reset_on_overwrite: bool,
    stats: BranchStats,
}

impl BranchPredictionUnit {
    /// Creates an empty unit.
    ///
    /// # Arguments
    ///
    /// * `config` - Predictor kind, initial state, BTB size and overwrite behaviour.
    pub fn new(config: &PredictorConfig) -> Self {
        let predictor = PredictorWrapper::new(config.kind);
        Self {
            btb: Btb::new(config.btb_size),
            initial_state: predictor.initial(config.initial_state),
            predictor,
            reset_on_overwrite: config.reset_on_overwrite,
            stats: BranchStats::default(),
        }
    }

    /// Predicts the transfer keyed at `pc`.
    ///
    /// # Arguments
    ///
    /// * `pc` - The BTB key: the last address of a transfer's delay window.
    ///
    /// # Returns
    ///
    /// Whether an entry exists and, if so, whether to redirect to its target.
    pub fn lookup(&mut self, pc: u32) -> Lookup {
        self.stats.lookups += 1;
        let Some(entry) = self.btb.lookup(pc) else {
            return Lookup::Miss;
        };
        self.stats.hits += 1;
        if self.predictor.predict(entry.state, entry.source, entry.target) {
            Lookup::HitPredictTaken(entry.target)
        } else {
            Lookup::HitPredictNotTaken
        }
    }

    /// Trains the unit with a resolved transfer.
    ///
    /// # Arguments
    ///
    /// * `key` - The BTB key of the transfer.
    /// * `pc` - Address of the transfer instruction.
    /// * `target` - The resolved target address.
    /// * `taken` - The resolved direction.
    pub fn update(&mut self, key: u32, pc: u32, target: u32, taken: bool) {
        let predictor = self.predictor;
        let (initial, reset) = (self.initial_state, self.reset_on_overwrite);
        let slot = self.btb.slot_mut(key);

        if slot.valid && slot.tag == key {
            let predicted = predictor.predict(slot.state, slot.source, slot.target);
            if predicted == taken {
                self.stats.correct += 1;
            } else {
                self.stats.incorrect += 1;
            }
        } else {
            if !slot.valid || reset {
                slot.state = initial;
            }
            tracing::debug!(
                key = format_args!("{key:#010x}"),
                evicted = slot.valid.then(|| format!("{:#010x}", slot.tag)),
                "btb entry created"
            );
            slot.tag = key;
            slot.valid = true;
        }

        slot.source = pc;
        slot.target = target;
        slot.state = predictor.next(slot.state, taken);
        tracing::debug!(
            key = format_args!("{key:#010x}"),
            target = format_args!("{target:#010x}"),
            taken,
            state = ?slot.state,
            "predictor updated"
        );
    }

    /// Prediction counters.
    pub const fn stats(&self) -> &BranchStats {
        &self.stats
    }

    /// The underlying BTB.
    pub const fn btb(&self) -> &Btb {
        &self.btb
    }
}
