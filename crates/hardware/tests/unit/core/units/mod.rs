pub mod alu;
pub mod bru;
pub mod cache;
pub mod memory;
