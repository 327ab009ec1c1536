//! Cycle-accurate 5-stage pipeline simulator library.
//!
//! This crate implements an in-order RISC-V pipeline with legacy MIPS and DLX modes:
//! 1. **Core:** Fetch, decode, execute, memory and writeback stages joined by fixed-depth
//!    latches, with forwarding, load-use stalls and delay-slot handling.
//! 2. **Prediction:** A BTB with configurable direction predictors fed by Execute.
//! 3. **Memory:** Main memory behind set-associative instruction and data caches.
//! 4. **ISA:** Table-driven decoders for RV32IM(A), MIPS-I and DLX.
//! 5. **Simulation:** Image loading, configuration and statistics.

/// Common types and constants (registers, values, access types, errors).
pub mod common;
/// Simulator configuration (defaults, enums, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, arch state, execution units).
pub mod core;
/// Instruction set decoders.
pub mod isa;
/// Simulator and program loaders.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Main CPU type; holds the pipeline, memory hierarchy, predictor and stats.
pub use crate::core::Cpu;
/// Why a run stopped.
pub use crate::core::pipeline::signals::HaltReason;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::Simulator;
