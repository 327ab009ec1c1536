//! Simulator: owns the CPU, the loaded image and the external collaborators.
//!
//! This is the entry point of the library. It performs the following:
//! 1. **Construction:** Validates the configuration and loads the image into memory.
//! 2. **Stepping:** Advances one cycle at a time, turning halting errors, halt requests
//!    and the cycle budget into a finished state.
//! 3. **Inspection:** Exposes registers, memory, stage addresses and counters.

use crate::common::error::{ConfigError, PipelineError};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::gpr::RegisterSet;
use crate::core::arch::syscall::{ConsoleSyscalls, SyscallHandler};
use crate::core::arch::trap::{NullTrapHandler, TrapHandler};
use crate::core::cpu::StagePcs;
use crate::core::pipeline::signals::HaltReason;
use crate::core::units::bru::BranchPredictionUnit;
use crate::core::units::memory::MemoryHierarchy;
use crate::sim::loader::MemoryImage;
use crate::stats::SimStats;

/// Top-level simulator.
pub struct Simulator {
    cpu: Cpu,
    image: MemoryImage,
    syscalls: Box<dyn SyscallHandler>,
    traps: Box<dyn TrapHandler>,
    halt: Option<HaltReason>,
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("pc", &self.cpu.fetch.pc)
            .field("cycle", &self.cpu.stats.cycles)
            .field("halt", &self.halt)
            .finish_non_exhaustive()
    }
}

fn build_cpu(config: Config, image: &MemoryImage) -> Result<Cpu, ConfigError> {
    let mut memory = MemoryHierarchy::new(&config);
    for segment in &image.segments {
        memory.load_segment(segment.addr, &segment.bytes)?;
    }
    Ok(Cpu::new(config, memory, image.entry_pc))
}

impl Simulator {
    /// Creates a simulator for `image`.
    ///
    /// # Arguments
    ///
    /// * `config` - Configuration; validated here.
    /// * `image` - Program segments and entry point.
    ///
    /// # Returns
    ///
    /// The simulator, with [`ConsoleSyscalls`] and [`NullTrapHandler`] installed, or
    /// the configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::{Config, HaltReason, Simulator};
    /// use pipesim_core::common::Reg;
    /// use pipesim_core::sim::loader::MemoryImage;
    ///
    /// // addi x1, x0, 5 ; addi x2, x0, 7 ; add x3, x1, x2 ; ebreak
    /// let words = [0x0050_0093, 0x0070_0113, 0x0020_81B3, 0x0010_0073];
    /// let mut sim = Simulator::new(Config::default(), MemoryImage::from_words(0, &words)).unwrap();
    /// assert_eq!(sim.run().unwrap(), HaltReason::Break);
    /// assert_eq!(sim.registers().read(Reg::Gpr(3)), 12);
    /// ```
    pub fn new(config: Config, image: MemoryImage) -> Result<Self, ConfigError> {
        config.validate()?;
        let cpu = build_cpu(config, &image)?;
        Ok(Self {
            cpu,
            image,
            syscalls: Box::new(ConsoleSyscalls::new()),
            traps: Box::new(NullTrapHandler),
            halt: None,
        })
    }

    /// Replaces the syscall handler.
    #[must_use]
    pub fn with_syscall_handler(mut self, handler: impl SyscallHandler + 'static) -> Self {
        self.syscalls = Box::new(handler);
        self
    }

    /// Replaces the DLX trap handler.
    #[must_use]
    pub fn with_trap_handler(mut self, handler: impl TrapHandler + 'static) -> Self {
        self.traps = Box::new(handler);
        self
    }

    /// Rebuilds the CPU and memory from the stored configuration and image.
    ///
    /// Handlers are kept.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.cpu = build_cpu(self.cpu.config.clone(), &self.image)?;
        self.halt = None;
        Ok(())
    }

    /// Advances one clock cycle. Does nothing once finished.
    ///
    /// # Returns
    ///
    /// The highest-priority error raised this cycle. Errors other than architectural
    /// faults also finish the run with [`HaltReason::Fault`].
    pub fn step(&mut self) -> Result<(), PipelineError> {
        if self.halt.is_some() {
            return Ok(());
        }
        let report = self.cpu.tick(self.syscalls.as_mut(), self.traps.as_mut());
        if let Some(reason) = report.halt {
            self.finish(reason);
        }
        let budget = self.cpu.config.general.cycles;
        if self.halt.is_none() && budget != 0 && self.cpu.stats.cycles >= budget {
            self.finish(HaltReason::CycleBudget);
        }
        match report.exception {
            Some(error) => {
                if error.halts() {
                    self.finish(HaltReason::Fault);
                }
                Err(error)
            }
            None => Ok(()),
        }
    }

    /// Steps until the run finishes or an error is raised.
    ///
    /// An architectural fault returns early without finishing the run; calling
    /// `run` again continues after it.
    pub fn run(&mut self) -> Result<HaltReason, PipelineError> {
        loop {
            self.step()?;
            if let Some(reason) = self.halt {
                return Ok(reason);
            }
        }
    }

    fn finish(&mut self, reason: HaltReason) {
        if self.halt.is_none() {
            tracing::debug!(%reason, cycle = self.cpu.stats.cycles, "run finished");
            self.halt = Some(reason);
        }
    }

    /// Returns `true` once the run has stopped.
    pub const fn is_finished(&self) -> bool {
        self.halt.is_some()
    }

    /// Why the run stopped, if it has.
    pub const fn halt_reason(&self) -> Option<HaltReason> {
        self.halt
    }

    /// Register file.
    pub const fn registers(&self) -> &RegisterSet {
        &self.cpu.regs
    }

    /// Main memory and caches.
    pub const fn memory(&self) -> &MemoryHierarchy {
        &self.cpu.memory
    }

    /// Address Fetch will fetch next.
    pub const fn pc(&self) -> u32 {
        self.cpu.fetch.pc
    }

    /// Cycles simulated so far.
    pub const fn cycle(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Stage addresses now and before the last cycle, as `(current, previous)`.
    pub fn stage_pcs(&self) -> (StagePcs, StagePcs) {
        (self.cpu.stage_pcs(), self.cpu.previous_pcs)
    }

    /// Pipeline counters.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Branch prediction unit and its counters.
    pub const fn branch_predictor(&self) -> &BranchPredictionUnit {
        &self.cpu.bpu
    }

    /// The active configuration.
    pub const fn config(&self) -> &Config {
        &self.cpu.config
    }

    /// Console output captured by the syscall handler.
    pub fn console_output(&self) -> &[u8] {
        self.syscalls.console_output()
    }
}
