//! Branch Prediction Unit Tests.
//!
//! Exercises the BTB and each direction predictor directly through `lookup` and
//! `update`, without a pipeline.

use pipesim_core::config::{PredictorConfig, PredictorKind, PredictorState};
use pipesim_core::core::units::bru::btb::Btb;
use pipesim_core::core::units::bru::{BranchPredictionUnit, Lookup};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

const PC: u32 = 0x40;
const BACK: u32 = 0x10;
const FORWARD: u32 = 0x80;

fn unit(kind: PredictorKind) -> BranchPredictionUnit {
    BranchPredictionUnit::new(&PredictorConfig {
        kind,
        ..PredictorConfig::default()
    })
}

fn predicts_taken(bpu: &mut BranchPredictionUnit, pc: u32) -> bool {
    matches!(bpu.lookup(pc), Lookup::HitPredictTaken(_))
}

// ══════════════════════════════════════════════════════════
// 1. BTB
// ══════════════════════════════════════════════════════════

#[test]
fn empty_btb_misses() {
    let mut bpu = unit(PredictorKind::TwoBitSaturating);
    assert_eq!(bpu.lookup(PC), Lookup::Miss);
    assert_eq!(bpu.stats().lookups, 1);
    assert_eq!(bpu.stats().hits, 0);
}

#[test]
fn first_resolution_creates_the_entry_without_scoring() {
    let mut bpu = unit(PredictorKind::TwoBitSaturating);
    bpu.update(PC, PC, BACK, true);
    assert_eq!(bpu.stats().correct + bpu.stats().incorrect, 0);
    // Weakly-not-taken moved one step towards taken.
    assert_eq!(bpu.lookup(PC), Lookup::HitPredictTaken(BACK));
    assert_eq!(bpu.stats().hits, 1);
}

#[test]
fn target_follows_the_latest_resolution() {
    let mut bpu = unit(PredictorKind::AlwaysTaken);
    bpu.update(PC, PC, BACK, true);
    bpu.update(PC, PC, FORWARD, true);
    assert_eq!(bpu.lookup(PC), Lookup::HitPredictTaken(FORWARD));
}

#[test]
fn index_is_word_address_modulo_size() {
    let btb = Btb::new(6);
    assert_eq!(btb.size(), 6);
    assert_eq!(btb.index(0x18), 0);
    assert_eq!(btb.index(0x1C), 1);
}

#[rstest]
#[case(false, true)]
#[case(true, false)]
fn aliasing_entry_inherits_or_resets_state(#[case] reset_on_overwrite: bool, #[case] taken_after: bool) {
    let mut bpu = BranchPredictionUnit::new(&PredictorConfig {
        btb_size: 4,
        reset_on_overwrite,
        ..PredictorConfig::default()
    });
    // 0x00 and 0x10 share slot 0.
    bpu.update(0x00, 0x00, BACK, true);
    bpu.update(0x00, 0x00, BACK, true);
    bpu.update(0x10, 0x10, FORWARD, false);

    assert_eq!(bpu.lookup(0x00), Lookup::Miss);
    assert_eq!(predicts_taken(&mut bpu, 0x10), taken_after);
}

// ══════════════════════════════════════════════════════════
// 2. Direction predictors
// ══════════════════════════════════════════════════════════

#[test]
fn one_bit_follows_the_last_outcome() {
    let mut bpu = unit(PredictorKind::OneBit);
    bpu.update(PC, PC, BACK, true);
    assert!(predicts_taken(&mut bpu, PC));
    bpu.update(PC, PC, BACK, false);
    assert!(!predicts_taken(&mut bpu, PC));
}

#[test]
fn two_bit_tolerates_one_wrong_outcome() {
    let mut bpu = unit(PredictorKind::TwoBitSaturating);
    bpu.update(PC, PC, BACK, true);
    bpu.update(PC, PC, BACK, true);
    bpu.update(PC, PC, BACK, false);
    assert!(predicts_taken(&mut bpu, PC));
    bpu.update(PC, PC, BACK, false);
    assert!(!predicts_taken(&mut bpu, PC));
}

#[test]
fn hysteresis_flips_from_a_weak_state() {
    let mut bpu = BranchPredictionUnit::new(&PredictorConfig {
        kind: PredictorKind::TwoBitHysteresis,
        initial_state: PredictorState::WeaklyTaken,
        ..PredictorConfig::default()
    });
    // Creation trains the weak state straight to the opposite strong one.
    bpu.update(PC, PC, BACK, false);
    assert!(!predicts_taken(&mut bpu, PC));
    bpu.update(PC, PC, BACK, true);
    assert!(!predicts_taken(&mut bpu, PC));
}

#[test]
fn static_predictors_ignore_history() {
    let mut never = unit(PredictorKind::AlwaysNotTaken);
    let mut always = unit(PredictorKind::AlwaysTaken);
    for _ in 0..3 {
        never.update(PC, PC, BACK, true);
        always.update(PC, PC, BACK, false);
    }
    assert_eq!(never.lookup(PC), Lookup::HitPredictNotTaken);
    assert_eq!(always.lookup(PC), Lookup::HitPredictTaken(BACK));
}

#[test]
fn backward_taken_uses_target_direction() {
    let mut bpu = unit(PredictorKind::BackwardTaken);
    bpu.update(PC, PC, BACK, false);
    bpu.update(0x44, 0x44, FORWARD, true);
    assert!(predicts_taken(&mut bpu, PC));
    assert!(!predicts_taken(&mut bpu, 0x44));
}

#[test]
fn backward_taken_compares_against_the_transfer_not_the_key() {
    // Two delay slots: the branch at 0x40 is keyed at 0x48.
    let mut bpu = unit(PredictorKind::BackwardTaken);
    bpu.update(0x48, PC, 0x44, true);
    assert_eq!(bpu.lookup(0x48), Lookup::HitPredictNotTaken);

    bpu.update(0x48, PC, 0x3C, true);
    assert_eq!(bpu.lookup(0x48), Lookup::HitPredictTaken(0x3C));
}

// ══════════════════════════════════════════════════════════
// 3. Accounting
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(PredictorKind::TwoBitSaturating, 3, 1)]
#[case(PredictorKind::OneBit, 3, 1)]
#[case(PredictorKind::AlwaysTaken, 3, 1)]
#[case(PredictorKind::AlwaysNotTaken, 1, 3)]
fn loop_exit_scoring(#[case] kind: PredictorKind, #[case] correct: u64, #[case] incorrect: u64) {
    let mut bpu = unit(kind);
    for taken in [true, true, true, true, false] {
        bpu.update(PC, PC, BACK, taken);
    }
    assert_eq!(bpu.stats().correct, correct);
    assert_eq!(bpu.stats().incorrect, incorrect);
    let expected = correct as f64 / (correct + incorrect) as f64;
    assert!((bpu.stats().accuracy() - expected).abs() < 1e-9);
}

#[test]
fn accuracy_without_resolutions_is_zero() {
    assert!(unit(PredictorKind::OneBit).stats().accuracy().abs() < f64::EPSILON);
}

proptest! {
    #[test]
    fn two_repeated_outcomes_fix_the_two_bit_prediction(
        history in proptest::collection::vec(any::<bool>(), 0..16),
        last in any::<bool>(),
    ) {
        let mut bpu = unit(PredictorKind::TwoBitSaturating);
        for taken in history {
            bpu.update(PC, PC, BACK, taken);
        }
        bpu.update(PC, PC, BACK, last);
        bpu.update(PC, PC, BACK, last);
        prop_assert_eq!(predicts_taken(&mut bpu, PC), last);
    }
}
