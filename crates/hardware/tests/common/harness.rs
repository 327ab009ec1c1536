//! Test harness.
//!
//! Builds a simulator around a word-encoded program and runs it with a cycle guard,
//! so a timing bug shows up as a failed assertion rather than a hung test.

use pipesim_core::common::Reg;
use pipesim_core::common::error::PipelineError;
use pipesim_core::config::{Config, IsaMode};
use pipesim_core::core::arch::{SyscallHandler, TrapHandler};
use pipesim_core::sim::loader::MemoryImage;
use pipesim_core::{HaltReason, Simulator};

/// Start of the data segment used by the tests.
pub const DATA: u32 = 0x0001_0000;

/// Upper bound on cycles for any test program.
const GUARD: u64 = 10_000;

/// Installs a test-writer subscriber once; `RUST_LOG` selects the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// A program plus the configuration it runs under.
pub struct TestContext {
    pub config: Config,
    pub image: MemoryImage,
}

impl TestContext {
    /// A RISC-V program at address 0 with default settings.
    pub fn new(words: &[u32]) -> Self {
        init_tracing();
        let mut config = Config::default();
        config.general.cycles = GUARD;
        Self {
            config,
            image: MemoryImage::from_words(0, words),
        }
    }

    pub fn isa(mut self, isa: IsaMode) -> Self {
        self.config.general.isa = isa;
        self
    }

    /// Honors architectural delay slots with `slots` configured.
    pub fn delay_slots(mut self, slots: u32) -> Self {
        self.config.pipeline.ignore_branch_delay_slots = false;
        self.config.pipeline.branch_delay_slots = slots;
        self
    }

    pub fn forwarding(mut self, enabled: bool) -> Self {
        self.config.pipeline.forwarding = enabled;
        self
    }

    pub fn data(mut self, words: &[u32]) -> Self {
        self.image = self.image.with_data_words(DATA, words);
        self
    }

    pub fn configure(mut self, f: impl FnOnce(&mut Config)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn build(self) -> Simulator {
        Simulator::new(self.config, self.image).unwrap()
    }

    pub fn build_with(self, syscalls: impl SyscallHandler + 'static) -> Simulator {
        self.build().with_syscall_handler(syscalls)
    }

    pub fn build_with_traps(self, traps: impl TrapHandler + 'static) -> Simulator {
        self.build().with_trap_handler(traps)
    }

    /// Runs to completion, panicking on any error or on the cycle guard.
    pub fn run(self) -> Simulator {
        let mut sim = self.build();
        let reason = sim.run().unwrap();
        assert_ne!(reason, HaltReason::CycleBudget, "program did not halt");
        sim
    }

    /// Runs until the first error is surfaced.
    pub fn run_err(self) -> (Simulator, PipelineError) {
        let mut sim = self.build();
        let error = sim.run().unwrap_err();
        (sim, error)
    }
}

/// Reads general-purpose register `n`.
pub fn gpr(sim: &Simulator, n: u8) -> u32 {
    sim.registers().read(Reg::Gpr(n))
}

/// Returns `true` if general-purpose register `n` was ever written.
pub fn written(sim: &Simulator, n: u8) -> bool {
    sim.registers().is_initialized(Reg::Gpr(n))
}
