//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Hazards:** Load-use detection and operand forwarding.
//! 2. **Latches:** Fixed-depth inter-stage buffers, including the predictor side paths.
//! 3. **Signals:** Flush requests, interrupts and halt reasons.
//! 4. **Stages:** Fetch, Decode, Execute, Branch Prediction, Memory and Writeback.
//! 5. **Traits:** Common interfaces for latch records and latches.

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches.
pub mod latches;

/// Signals raised by stages towards the cycle driver.
pub mod signals;

/// Pipeline stage implementations.
pub mod stages;

/// Traits for latch records and latches.
pub mod traits;
