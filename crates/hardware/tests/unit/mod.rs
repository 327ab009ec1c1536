//! # Unit Components
//!
//! Tests grouped the way the library is: configuration, statistics, the ISA
//! decoders, the hardware units, the pipeline and the simulator front end.



/// Hardware units and pipeline behaviour.
pub mod core;

/// Loader, simulator lifecycle and system calls.
pub mod sim;

/// Pipeline counters.
pub mod stats;
