//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline and the branch-prediction unit's per-cycle step. It includes:
//! 1. **Fetch:** Applies resolved outcomes and predictions, then fetches at the PC.
//! 2. **Decode:** Decodes instructions and reads operands.
//! 3. **Execute:** Performs ALU operations and resolves control transfers.
//! 4. **Branch Prediction:** Trains the BTB and answers Fetch's lookup.
//! 5. **Memory:** Handles data load, store and atomic operations.
//! 6. **Writeback:** Commits results to the register file and handles system operations.
//!
//! Every stage reads the records committed at the end of the previous cycle and returns
//! the record it produces for the next one; the cycle driver commits them all at once.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Branch prediction step.
pub mod predict;

/// Writeback stage implementation.
pub mod writeback;

use crate::common::error::PipelineError;
use crate::core::pipeline::traits::LatchRecord;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Branch prediction entry point (BP step).
pub use predict::predict_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;

/// Record produced by a stage plus the error it raised, if any.
#[derive(Clone, Debug)]
pub struct StageOutput<T> {
    /// Record for the stage's output latch.
    pub next: T,
    /// Error raised this cycle.
    pub exception: Option<PipelineError>,
}

impl<T: LatchRecord> StageOutput<T> {
    /// A clean result.
    pub const fn ok(next: T) -> Self {
        Self {
            next,
            exception: None,
        }
    }

    /// A bubble carrying `error`.
    pub fn fault(error: PipelineError) -> Self {
        Self {
            next: T::bubble(),
            exception: Some(error),
        }
    }

    /// A bubble.
    pub fn bubble() -> Self {
        Self::ok(T::bubble())
    }
}
