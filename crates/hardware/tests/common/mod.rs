//! Shared test infrastructure.

/// Instruction word encoders.
pub mod builder;

/// Simulator setup and run helpers.
pub mod harness;

/// Collaborator mocks.
pub mod mocks;
