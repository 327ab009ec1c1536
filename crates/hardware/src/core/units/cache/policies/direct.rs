//! Direct-Mapped Placement.
//!
//! Every set holds one line, so there is nothing to track.

use super::ReplacementPolicy;

/// Direct-mapped policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectMapped;

impl ReplacementPolicy for DirectMapped {
    fn on_fill(&mut self, _set: usize, _way: usize) {}

    fn on_access(&mut self, _set: usize, _way: usize) {}

    fn victim(&self, _set: usize) -> usize {
        0
    }
}
