//! First-In, First-Out (FIFO) Replacement Policy.
//!
//! This policy evicts the line that was filled earliest, regardless of how recently
//! it was accessed. Each set keeps its ways in fill order; hits do not reorder them.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `on_fill()`: O(W) where W is the number of ways
//!   - `on_access()`: O(1)
//!   - `victim()`: O(1)
//! - **Space Complexity:** O(S × W) where S is the number of sets

use super::ReplacementPolicy;

/// FIFO Policy state.
#[derive(Clone, Debug)]
pub struct FifoPolicy {
    /// Fill order per set; index 0 is the oldest line.
    order: Vec<Vec<usize>>,
}

impl FifoPolicy {
    /// Creates a new FIFO policy instance.
    ///
    /// # Arguments
    ///
    /// * `sets` - The number of sets in the cache.
    /// * `ways` - The associativity (number of ways) of the cache.
    pub fn new(sets: usize, ways: usize) -> Self {
        Self {
            order: vec![(0..ways).collect(); sets],
        }
    }
}

impl ReplacementPolicy for FifoPolicy {
    /// Moves the filled way to the young end of the queue.
    fn on_fill(&mut self, set: usize, way: usize) {
        let queue = &mut self.order[set];
        queue.retain(|&w| w != way);
        queue.push(way);
    }

    fn on_access(&mut self, _set: usize, _way: usize) {}

    /// Returns the oldest way of the set.
    fn victim(&self, set: usize) -> usize {
        self.order[set].first().copied().unwrap_or(0)
    }
}
