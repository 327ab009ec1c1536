//! Pipeline Record and Latch Interfaces.
//!
//! This module defines the common traits for pipeline components. It provides:
//! 1. **Record Interface:** Every latch record can be a bubble and carries the fetch
//!    sequence number of the instruction it belongs to.
//! 2. **Pipeline Latch Interface:** Provides methods for flushing and status checking.

use crate::common::constants::BUBBLE_SEQ;
use crate::common::error::PipelineError;

/// A record carried by a latch.
pub trait LatchRecord: Clone {
    /// The canonical bubble record.
    fn bubble() -> Self;

    /// Fetch sequence number of the instruction; [`BUBBLE_SEQ`] for bubbles.
    fn seq(&self) -> u64;

    /// Returns `true` if the record carries no instruction.
    fn is_bubble(&self) -> bool {
        self.seq() == BUBBLE_SEQ
    }
}

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold the state of instructions as they move between stages. They support
/// flushing, precise squashing and status checks.
pub trait PipelineLatch {
    /// Replaces every record with a bubble.
    ///
    /// Called when Write-Back interrupts the pipeline.
    fn flush(&mut self);

    /// Replaces the records of the given instructions with bubbles.
    ///
    /// # Returns
    ///
    /// The number of records squashed.
    fn squash(&mut self, seqs: &[u64]) -> usize;

    /// Checks if the latch holds only bubbles.
    fn is_idle(&self) -> bool;

    /// Verifies the latch holds exactly its configured number of records.
    fn check(&self) -> Result<(), PipelineError>;
}
