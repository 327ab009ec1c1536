//! Register identifiers.
//!
//! Decode, forwarding and write-back all name registers through [`Reg`]: one of the 32
//! general-purpose registers or one of the MIPS multiply/divide result registers.

use std::fmt;

/// An architectural register name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Reg {
    /// General-purpose register `0..=31`. Register 0 is hard-wired to zero.
    Gpr(u8),
    /// High half of a multiply result / division remainder.
    Hi,
    /// Low half of a multiply result / division quotient.
    Lo,
}

impl Reg {
    /// Returns `true` for the hard-wired zero register.
    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Gpr(0))
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpr(n) => write!(f, "r{n}"),
            Self::Hi => f.write_str("HI"),
            Self::Lo => f.write_str("LO"),
        }
    }
}
