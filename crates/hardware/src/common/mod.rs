//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides fundamental building blocks shared by every stage and unit:
//! 1. **Bit Values:** Fixed-width value types with signed/unsigned views.
//! 2. **Constants:** Instruction sizes, bubble markers and ABI register numbers.
//! 3. **Memory Access:** Access classification and access widths.
//! 4. **Error Handling:** Error enums for every stage plus the run-level taxonomy.
//! 5. **Register Identifiers:** GPR and HI/LO naming shared by decode and forwarding.

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access type and width definitions.
pub mod data;

/// Error types and their classification.
pub mod error;

/// Register identifiers.
pub mod reg;

/// Fixed-width bit value types.
pub mod value;

pub use data::{AccessType, MemWidth};
pub use error::{
    CacheError, ConfigError, ErrorClass, ExecuteError, LoadError, MemoryError, PipelineError,
    SyscallError,
};
pub use reg::Reg;
pub use value::{Byte, DoubleWord, HalfWord, Word};
