//! Hardware unit and pipeline tests.

/// Cycle-level behaviour of the five-stage pipeline.
pub mod pipeline;

/// ALU, branch prediction and caches in isolation.
pub mod units;
