//! Register Set.
//!
//! This module implements the architectural register state of the pipeline. It performs
//! the following:
//! 1. **Storage:** Maintains 32 general-purpose registers plus HI and LO.
//! 2. **Invariant Enforcement:** Register 0 is hard-wired to zero and always initialized.
//! 3. **Initialization Tracking:** Records which registers have ever been written.

use std::fmt;

use crate::common::constants::GPR_COUNT;
use crate::common::reg::Reg;
use crate::config::InitialRegister;

const HI_INDEX: usize = GPR_COUNT;
const LO_INDEX: usize = GPR_COUNT + 1;
const REGISTER_COUNT: usize = GPR_COUNT + 2;

/// General-purpose registers plus HI/LO, each with an initialized flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterSet {
    values: [u32; REGISTER_COUNT],
    initialized: [bool; REGISTER_COUNT],
}

impl Default for RegisterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterSet {
    /// Creates a register set in which only register 0 is initialized.
    pub fn new() -> Self {
        let mut initialized = [false; REGISTER_COUNT];
        initialized[0] = true;
        Self {
            values: [0; REGISTER_COUNT],
            initialized,
        }
    }

    /// Creates a register set with the given registers pre-initialized.
    ///
    /// # Arguments
    ///
    /// * `initial` - Register values applied after construction.
    pub fn with_initial(initial: &[InitialRegister]) -> Self {
        let mut regs = Self::new();
        for r in initial {
            regs.write(Reg::Gpr(r.reg), r.value);
        }
        regs
    }

    const fn index(reg: Reg) -> usize {
        match reg {
            Reg::Gpr(n) => (n as usize) % GPR_COUNT,
            Reg::Hi => HI_INDEX,
            Reg::Lo => LO_INDEX,
        }
    }

    /// Reads a register without checking initialization.
    ///
    /// # Returns
    ///
    /// The stored value; register 0 always reads 0.
    pub const fn read(&self, reg: Reg) -> u32 {
        self.values[Self::index(reg)]
    }

    /// Returns `true` if `reg` has been written (register 0 always is).
    pub const fn is_initialized(&self, reg: Reg) -> bool {
        self.initialized[Self::index(reg)]
    }

    /// Writes a register and marks it initialized. Writes to register 0 are ignored.
    pub const fn write(&mut self, reg: Reg, value: u32) {
        if reg.is_zero() {
            return;
        }
        let idx = Self::index(reg);
        self.values[idx] = value;
        self.initialized[idx] = true;
    }
}

impl fmt::Display for RegisterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..GPR_COUNT).step_by(4) {
            for j in i..i + 4 {
                let mark = if self.initialized[j] { ' ' } else { '?' };
                write!(f, "r{j:<2}={:#010x}{mark} ", self.values[j])?;
            }
            writeln!(f)?;
        }
        writeln!(
            f,
            "HI ={:#010x}  LO ={:#010x}",
            self.values[HI_INDEX], self.values[LO_INDEX]
        )
    }
}
