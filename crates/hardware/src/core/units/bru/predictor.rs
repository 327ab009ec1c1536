//! Direction Predictors.
//!
//! Each predictor decides, for a BTB hit, whether the stored target should redirect
//! Fetch, and how the entry's state evolves once the branch resolves. The state itself
//! lives in the BTB entry; predictors are stateless transition tables.

use crate::config::{PredictorKind, PredictorState};

/// Trait for direction prediction algorithms.
pub trait DirectionPredictor {
    /// Predicts the direction of a transfer whose BTB entry holds `state` and `target`.
    ///
    /// # Arguments
    ///
    /// * `state` - The entry's predictor state.
    /// * `pc` - The BTB key the entry was found under.
    /// * `target` - The stored target.
    fn predict(&self, state: PredictorState, pc: u32, target: u32) -> bool;

    /// Returns the state after observing an outcome.
    fn next(&self, state: PredictorState, taken: bool) -> PredictorState;
}

/// Never redirects.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysNotTaken;

impl DirectionPredictor for AlwaysNotTaken {
    fn predict(&self, _state: PredictorState, _pc: u32, _target: u32) -> bool {
        false
    }

    fn next(&self, state: PredictorState, _taken: bool) -> PredictorState {
        state
    }
}

/// Redirects whenever a target is known.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysTaken;

impl DirectionPredictor for AlwaysTaken {
    fn predict(&self, _state: PredictorState, _pc: u32, _target: u32) -> bool {
        true
    }

    fn next(&self, state: PredictorState, _taken: bool) -> PredictorState {
        state
    }
}

/// Backward-taken, forward-not-taken (loop heuristic).
#[derive(Clone, Copy, Debug, Default)]
pub struct BackwardTaken;

impl DirectionPredictor for BackwardTaken {
    fn predict(&self, _state: PredictorState, pc: u32, target: u32) -> bool {
        target < pc
    }

    fn next(&self, state: PredictorState, _taken: bool) -> PredictorState {
        state
    }
}

/// Last outcome predicts the next one. Only the strong states are used.
#[derive(Clone, Copy, Debug, Default)]
pub struct OneBit;

impl DirectionPredictor for OneBit {
    fn predict(&self, state: PredictorState, _pc: u32, _target: u32) -> bool {
        is_taken(state)
    }

    fn next(&self, _state: PredictorState, taken: bool) -> PredictorState {
        if taken {
            PredictorState::StronglyTaken
        } else {
            PredictorState::StronglyNotTaken
        }
    }
}

/// Two-bit saturating counter.
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoBitSaturating;

impl DirectionPredictor for TwoBitSaturating {
    fn predict(&self, state: PredictorState, _pc: u32, _target: u32) -> bool {
        is_taken(state)
    }

    fn next(&self, state: PredictorState, taken: bool) -> PredictorState {
        use PredictorState as S;
        match (state, taken) {
            (S::StronglyNotTaken, true) => S::WeaklyNotTaken,
            (S::WeaklyNotTaken, true) => S::WeaklyTaken,
            (S::WeaklyTaken | S::StronglyTaken, true) => S::StronglyTaken,
            (S::StronglyTaken, false) => S::WeaklyTaken,
            (S::WeaklyTaken, false) => S::WeaklyNotTaken,
            (S::WeaklyNotTaken | S::StronglyNotTaken, false) => S::StronglyNotTaken,
        }
    }
}

/// Two-bit counter with hysteresis: a miss in a weak state jumps to the opposite strong state.
#[derive(Clone, Copy, Debug, Default)]
pub struct TwoBitHysteresis;

impl DirectionPredictor for TwoBitHysteresis {
    fn predict(&self, state: PredictorState, _pc: u32, _target: u32) -> bool {
        is_taken(state)
    }

    fn next(&self, state: PredictorState, taken: bool) -> PredictorState {
        use PredictorState as S;
        match (state, taken) {
            (S::StronglyTaken | S::WeaklyTaken, true) => S::StronglyTaken,
            (S::StronglyNotTaken | S::WeaklyNotTaken, false) => S::StronglyNotTaken,
            (S::StronglyTaken, false) => S::WeaklyTaken,
            (S::StronglyNotTaken, true) => S::WeaklyNotTaken,
            (S::WeaklyTaken, false) => S::StronglyNotTaken,
            (S::WeaklyNotTaken, true) => S::StronglyTaken,
        }
    }
}

const fn is_taken(state: PredictorState) -> bool {
    matches!(state, PredictorState::WeaklyTaken | PredictorState::StronglyTaken)
}

/// Enum wrapper for static dispatch of direction predictors.
#[derive(Clone, Copy, Debug)]
pub enum PredictorWrapper {
    /// Static not-taken.
    AlwaysNotTaken(AlwaysNotTaken),
    /// Static taken.
    AlwaysTaken(AlwaysTaken),
    /// Static backward-taken.
    BackwardTaken(BackwardTaken),
    /// One-bit history.
    OneBit(OneBit),
    /// Two-bit saturating counter.
    TwoBitSaturating(TwoBitSaturating),
    /// Two-bit counter with hysteresis.
    TwoBitHysteresis(TwoBitHysteresis),
}

impl PredictorWrapper {
    /// Creates the predictor selected by `kind`.
    pub const fn new(kind: PredictorKind) -> Self {
        match kind {
            PredictorKind::AlwaysNotTaken => Self::AlwaysNotTaken(AlwaysNotTaken),
            PredictorKind::AlwaysTaken => Self::AlwaysTaken(AlwaysTaken),
            PredictorKind::BackwardTaken => Self::BackwardTaken(BackwardTaken),
            PredictorKind::OneBit => Self::OneBit(OneBit),
            PredictorKind::TwoBitSaturating => Self::TwoBitSaturating(TwoBitSaturating),
            PredictorKind::TwoBitHysteresis => Self::TwoBitHysteresis(TwoBitHysteresis),
        }
    }

    /// State a new entry starts in. One-bit predictors round to the nearest strong state.
    pub const fn initial(&self, configured: PredictorState) -> PredictorState {
        match self {
            Self::OneBit(_) => {
                if is_taken(configured) {
                    PredictorState::StronglyTaken
                } else {
                    PredictorState::StronglyNotTaken
                }
            }
            _ => configured,
        }
    }
}

impl DirectionPredictor for PredictorWrapper {
    #[inline(always)]
    fn predict(&self, state: PredictorState, pc: u32, target: u32) -> bool {
        match self {
            Self::AlwaysNotTaken(p) => p.predict(state, pc, target),
            Self::AlwaysTaken(p) => p.predict(state, pc, target),
            Self::BackwardTaken(p) => p.predict(state, pc, target),
            Self::OneBit(p) => p.predict(state, pc, target),
            Self::TwoBitSaturating(p) => p.predict(state, pc, target),
            Self::TwoBitHysteresis(p) => p.predict(state, pc, target),
        }
    }

    #[inline(always)]
    fn next(&self, state: PredictorState, taken: bool) -> PredictorState {
        match self {
            Self::AlwaysNotTaken(p) => p.next(state, taken),
            Self::AlwaysTaken(p) => p.next(state, taken),
            Self::BackwardTaken(p) => p.next(state, taken),
            Self::OneBit(p) => p.next(state, taken),
            Self::TwoBitSaturating(p) => p.next(state, taken),
            Self::TwoBitHysteresis(p) => p.next(state, taken),
        }
    }
}
