//! Statistics Tests.
//!
//! Verifies the derived CPI, the text report and the counters of a straight-line run.

use pipesim_core::stats::SimStats;
use pretty_assertions::assert_eq;

use crate::common::builder::riscv;
use crate::common::harness::TestContext;

#[test]
fn cpi_is_zero_before_anything_retires() {
    let stats = SimStats {
        cycles: 10,
        ..SimStats::default()
    };
    assert!(stats.cpi().abs() < f64::EPSILON);
}

#[test]
fn cpi_divides_cycles_by_retired() {
    let stats = SimStats {
        cycles: 12,
        instructions_retired: 8,
        ..SimStats::default()
    };
    assert!((stats.cpi() - 1.5).abs() < f64::EPSILON);
}

#[test]
fn report_lists_every_counter() {
    let stats = SimStats {
        cycles: 9,
        instructions_retired: 3,
        stalls_load_use: 1,
        ..SimStats::default()
    };
    let text = stats.to_string();
    assert!(text.contains("cycles               9"));
    assert!(text.contains("CPI                  3.000"));
    assert!(text.contains("load-use stalls      1"));
    assert_eq!(text.lines().count(), 11);
}

#[test]
fn straight_line_program_fills_the_pipeline_once() {
    let sim = TestContext::new(&[
        riscv::addi(1, 0, 5),
        riscv::addi(2, 0, 7),
        riscv::add(3, 1, 2),
        riscv::ebreak(),
    ])
    .run();

    let stats = *sim.stats();
    // Four instructions plus four cycles to drain the last one through the pipeline.
    assert_eq!(stats.cycles, 8);
    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.stalls_load_use, 0);
    assert_eq!(stats.stalls_mem, 0);
    assert_eq!(stats.squashed, 0);
    assert_eq!(stats.interrupts, 1);
    assert_eq!(stats.exceptions, 0);
}
