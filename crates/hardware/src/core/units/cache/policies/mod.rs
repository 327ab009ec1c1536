//! Cache Replacement Policies.
//!
//! Implements the algorithms for selecting victim lines in a set.
//!
//! # Policies
//!
//! - `DirectMapped`: One way per set; way 0 is always the victim.
//! - `Fifo`: First-In, First-Out by fill order.
//! - `Lru`: Least Recently Used.

/// Direct-mapped (single candidate) policy.
pub mod direct;

/// First-In, First-Out replacement policy.
pub mod fifo;

/// Least Recently Used replacement policy.
pub mod lru;

use std::fmt;

pub use direct::DirectMapped;
pub use fifo::FifoPolicy;
pub use lru::LruPolicy;

/// Trait for cache replacement policies.
///
/// The cache fills invalid ways before asking for a victim, so `victim` is only
/// consulted for full sets.
pub trait ReplacementPolicy: fmt::Debug {
    /// Records that `way` of `set` was filled with a new line.
    fn on_fill(&mut self, set: usize, way: usize);

    /// Records a hit on `way` of `set`.
    fn on_access(&mut self, set: usize, way: usize);

    /// Selects the way to evict from a full set.
    ///
    /// # Arguments
    ///
    /// * `set` - The cache set index.
    ///
    /// # Returns
    ///
    /// The index of the way to evict.
    fn victim(&self, set: usize) -> usize;
}
