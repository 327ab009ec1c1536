//! Simulation front end and program loading.
//!
//! Provides the [`Simulator`] that owns a CPU and its collaborators, and the loaders
//! that turn program files into memory images.

/// Raw binary and ELF loading.
pub mod loader;

/// Simulator ownership, stepping and inspection.
pub mod simulator;

pub use loader::{MemoryImage, Segment, SegmentKind};
pub use simulator::Simulator;
