//! Collaborator mocks.

/// Recording syscall handler.
pub mod syscalls;

/// `mockall` trap handler.
pub mod traps;
