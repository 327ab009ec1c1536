//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures and enums used to parameterize
//! the simulator. It provides:
//! 1. **Defaults:** Baseline pipeline, predictor, cache and memory constants.
//! 2. **Structures:** Hierarchical config for general, pipeline, predictor, cache and memory.
//! 3. **Enums:** ISA mode, check severity, predictor kind, replacement and write policies.
//! 4. **Derived Values:** Architectural delay slots and feedback latch depth.
//!
//! Configuration is supplied as JSON (`Config::from_json`) or built with `Config::default()`.

use serde::Deserialize;

use crate::common::constants::{GPR_COUNT, MAX_BRANCH_DELAY_SLOTS, MIN_BRANCH_DELAY_SLOTS};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Cycle budget of a run.
    pub const CYCLES: u64 = 100_000;

    /// Branch delay slots modelled by the feedback path.
    pub const BRANCH_DELAY_SLOTS: u32 = 2;

    /// Branch Target Buffer entry count.
    pub const BTB_SIZE: usize = 64;

    /// Cache line size in bytes.
    pub const CACHE_LINE: usize = 16;

    /// Number of cache lines.
    pub const CACHE_LINES: usize = 64;

    /// Cache associativity (1 way = direct-mapped).
    pub const CACHE_WAYS: usize = 1;

    /// Extra cycles of a cache hit.
    pub const CACHE_HIT_LATENCY: u32 = 0;

    /// Extra cycles of a cache miss.
    pub const CACHE_MISS_PENALTY: u32 = 10;

    /// Main memory size (1 MiB).
    pub const MEMORY_SIZE: usize = 0x0010_0000;

    /// First address of the data segment range.
    pub const DATA_START: u32 = 0x0001_0000;
}

/// Instruction set decoded by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum IsaMode {
    /// RV32IM with the word-sized A extension.
    #[default]
    #[serde(alias = "RISCV", alias = "riscv", alias = "RISC-V")]
    RiscV,
    /// MIPS-I integer subset with likely branches and conditional traps.
    #[serde(alias = "MIPS", alias = "mips")]
    Mips,
    /// Hennessy & Patterson DLX.
    #[serde(alias = "DLX", alias = "dlx")]
    Dlx,
}

/// What to do when a configurable check fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Severity {
    /// Log a warning and continue.
    #[default]
    Warn,
    /// Surface an error and stop the run.
    Error,
}

/// Branch prediction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorKind {
    /// Never redirect.
    AlwaysNotTaken,
    /// Redirect whenever a target is known.
    AlwaysTaken,
    /// Predict taken for backward targets (loops).
    BackwardTaken,
    /// One bit of history per entry.
    OneBit,
    /// Two-bit saturating counter.
    #[default]
    TwoBitSaturating,
    /// Two-bit counter that jumps to the opposite strong state from a weak one.
    TwoBitHysteresis,
}

/// Four-state predictor state. One-bit predictors use only the strong states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PredictorState {
    /// Strongly not taken.
    StronglyNotTaken,
    /// Weakly not taken.
    #[default]
    WeaklyNotTaken,
    /// Weakly taken.
    WeaklyTaken,
    /// Strongly taken.
    StronglyTaken,
}

/// Cache replacement policy algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReplacementPolicy {
    /// One way per set; the only candidate is the victim.
    #[default]
    #[serde(alias = "DirectMapped", alias = "Direct")]
    DirectMapped,
    /// Evicts the line filled earliest.
    #[serde(alias = "Fifo")]
    Fifo,
    /// Evicts the line used least recently.
    #[serde(alias = "Lru")]
    Lru,
}

/// Cache write policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum WritePolicy {
    /// Every write also updates main memory.
    WriteThrough,
    /// Writes mark the line dirty; memory is updated on eviction.
    #[default]
    WriteBack,
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// ```
/// use pipesim_core::config::{Config, IsaMode, PredictorKind, ReplacementPolicy};
///
/// let json = r#"{
///     "general": { "isa": "Mips", "cycles": 500 },
///     "pipeline": { "forwarding": false, "branch_delay_slots": 3 },
///     "branch_predictor": { "kind": "OneBit", "btb_size": 16 },
///     "cache": {
///         "data": { "enabled": true, "lines": 8, "ways": 2, "policy": "Lru" }
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.isa, IsaMode::Mips);
/// assert_eq!(config.pipeline.branch_delay_slots, 3);
/// assert_eq!(config.branch_predictor.kind, PredictorKind::OneBit);
/// assert_eq!(config.cache.data.policy, ReplacementPolicy::Lru);
/// assert!(!config.cache.instruction.enabled);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Pipeline hazard and delay-slot behaviour.
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Branch predictor and BTB.
    #[serde(default)]
    pub branch_predictor: PredictorConfig,
    /// Instruction and data caches.
    #[serde(default)]
    pub cache: CacheHierarchyConfig,
    /// Main memory.
    #[serde(default)]
    pub memory: MemoryConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Arguments
    ///
    /// * `json` - The configuration document. Missing fields take their defaults.
    ///
    /// # Returns
    ///
    /// The validated configuration, or the parse/validation error.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges and cache geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let slots = self.pipeline.branch_delay_slots;
        if !(MIN_BRANCH_DELAY_SLOTS..=MAX_BRANCH_DELAY_SLOTS).contains(&slots) {
            return Err(ConfigError::InvalidDelaySlots(slots));
        }
        if self.branch_predictor.btb_size == 0 {
            return Err(ConfigError::EmptyBtb);
        }
        if self.memory.size == 0 || self.memory.size % 8 != 0 || self.memory.size as u64 > 1 << 32 {
            return Err(ConfigError::InvalidMemorySize(self.memory.size));
        }
        self.cache.instruction.validate("instruction", self.memory.size)?;
        self.cache.data.validate("data", self.memory.size)?;
        if let Some(bad) = self
            .general
            .initial_registers
            .iter()
            .find(|r| r.reg == 0 || r.reg as usize >= GPR_COUNT)
        {
            return Err(ConfigError::InvalidRegister(bad.reg));
        }
        Ok(())
    }

    /// Number of delay slots the ISA commits to executing after a control transfer.
    ///
    /// # Returns
    ///
    /// 0 when delay slots are ignored, 1 for MIPS, otherwise the configured count.
    pub const fn architectural_delay_slots(&self) -> u32 {
        if self.pipeline.ignore_branch_delay_slots {
            0
        } else if matches!(self.general.isa, IsaMode::Mips) {
            1
        } else {
            self.pipeline.branch_delay_slots
        }
    }

    /// Depth of the Execute-to-Fetch feedback latch.
    pub const fn feedback_depth(&self) -> usize {
        self.pipeline.branch_delay_slots.saturating_sub(1) as usize
    }
}

/// An initial register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct InitialRegister {
    /// Register number (1-31).
    pub reg: u8,
    /// Initial value.
    pub value: u32,
}

/// General simulation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Decoded instruction set.
    #[serde(default)]
    pub isa: IsaMode,

    /// Cycles to run before the simulator reports itself finished (0 = unlimited).
    #[serde(default = "GeneralConfig::default_cycles")]
    pub cycles: u64,

    /// Registers that start initialized.
    #[serde(default)]
    pub initial_registers: Vec<InitialRegister>,
}

impl GeneralConfig {
    fn default_cycles() -> u64 {
        defaults::CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            isa: IsaMode::default(),
            cycles: defaults::CYCLES,
            initial_registers: Vec::new(),
        }
    }
}

/// Pipeline hazard handling and delay-slot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Forward results from EX/MEM, MEM/WB and the write-back bypass into Execute.
    #[serde(default = "PipelineConfig::default_true")]
    pub forwarding: bool,

    /// Insert one bubble when a load result is needed by the next instruction.
    #[serde(default = "PipelineConfig::default_true", alias = "use_load_stall_bubble")]
    pub load_stall_bubble: bool,

    /// Treat control transfers as taking effect immediately (no architectural delay slots).
    #[serde(default = "PipelineConfig::default_true")]
    pub ignore_branch_delay_slots: bool,

    /// Cycles between fetching a branch and Fetch seeing its outcome, minus one (2 or 3).
    #[serde(default = "PipelineConfig::default_branch_delay_slots")]
    pub branch_delay_slots: u32,

    /// Severity of reading a never-written register.
    #[serde(default)]
    pub uninitialized_register: Severity,

    /// Severity of accessing memory outside the reserved segments.
    #[serde(default)]
    pub memory_reservation: Severity,

    /// Decodes after a control transfer during which the uninitialized check is skipped.
    /// Defaults to the delay slot count.
    #[serde(default)]
    pub uninitialized_grace: Option<u32>,
}

impl PipelineConfig {
    const fn default_true() -> bool {
        true
    }

    fn default_branch_delay_slots() -> u32 {
        defaults::BRANCH_DELAY_SLOTS
    }

    /// Effective grace window of the uninitialized-register check.
    pub fn grace_window(&self) -> u32 {
        self.uninitialized_grace.unwrap_or(self.branch_delay_slots)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            forwarding: true,
            load_stall_bubble: true,
            ignore_branch_delay_slots: true,
            branch_delay_slots: defaults::BRANCH_DELAY_SLOTS,
            uninitialized_register: Severity::Warn,
            memory_reservation: Severity::Warn,
            uninitialized_grace: None,
        }
    }
}

/// Branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Prediction algorithm.
    #[serde(default)]
    pub kind: PredictorKind,

    /// State given to newly created entries.
    #[serde(default)]
    pub initial_state: PredictorState,

    /// Number of BTB entries.
    #[serde(default = "PredictorConfig::default_btb_size")]
    pub btb_size: usize,

    /// Reset the state of an entry whose tag is overwritten by a different branch.
    #[serde(default)]
    pub reset_on_overwrite: bool,
}

impl PredictorConfig {
    fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            kind: PredictorKind::default(),
            initial_state: PredictorState::default(),
            btb_size: defaults::BTB_SIZE,
            reset_on_overwrite: false,
        }
    }
}

/// Instruction and data cache configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheHierarchyConfig {
    /// Instruction cache, consulted by Fetch.
    #[serde(default)]
    pub instruction: CacheConfig,
    /// Data cache, consulted by Memory.
    #[serde(default)]
    pub data: CacheConfig,
}

/// Configuration of one cache.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Whether the cache is present. Disabled caches pass accesses to main memory.
    #[serde(default)]
    pub enabled: bool,

    /// Line size in bytes (power of two, at least 8).
    #[serde(default = "CacheConfig::default_line_bytes")]
    pub line_bytes: usize,

    /// Total number of lines.
    #[serde(default = "CacheConfig::default_lines")]
    pub lines: usize,

    /// Associativity.
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Victim selection.
    #[serde(default)]
    pub policy: ReplacementPolicy,

    /// Write handling.
    #[serde(default)]
    pub write_policy: WritePolicy,

    /// Extra cycles of a hit.
    #[serde(default = "CacheConfig::default_hit_latency")]
    pub hit_latency: u32,

    /// Extra cycles of a miss; paid again when a dirty victim is written back.
    #[serde(default = "CacheConfig::default_miss_penalty")]
    pub miss_penalty: u32,
}

impl CacheConfig {
    fn default_line_bytes() -> usize {
        defaults::CACHE_LINE
    }

    fn default_lines() -> usize {
        defaults::CACHE_LINES
    }

    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    fn default_hit_latency() -> u32 {
        defaults::CACHE_HIT_LATENCY
    }

    fn default_miss_penalty() -> u32 {
        defaults::CACHE_MISS_PENALTY
    }

    /// Number of ways actually used (direct-mapped forces one).
    pub const fn effective_ways(&self) -> usize {
        match self.policy {
            ReplacementPolicy::DirectMapped => 1,
            ReplacementPolicy::Fifo | ReplacementPolicy::Lru => self.ways,
        }
    }

    fn validate(&self, cache: &'static str, memory_size: usize) -> Result<(), ConfigError> {
        let fail = |reason: &str| ConfigError::InvalidCacheGeometry {
            cache,
            reason: reason.to_owned(),
        };
        if !self.line_bytes.is_power_of_two() || self.line_bytes < 8 {
            return Err(fail("line size must be a power of two of at least 8 bytes"));
        }
        let ways = self.effective_ways();
        if self.lines == 0 || ways == 0 {
            return Err(fail("line and way counts must be non-zero"));
        }
        if self.lines % ways != 0 {
            return Err(fail("line count must be a multiple of the way count"));
        }
        // A line fill reads whole lines from main memory.
        if self.enabled && memory_size % self.line_bytes != 0 {
            return Err(fail("memory size must be a multiple of the line size"));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            line_bytes: defaults::CACHE_LINE,
            lines: defaults::CACHE_LINES,
            ways: defaults::CACHE_WAYS,
            policy: ReplacementPolicy::default(),
            write_policy: WritePolicy::default(),
            hit_latency: defaults::CACHE_HIT_LATENCY,
            miss_penalty: defaults::CACHE_MISS_PENALTY,
        }
    }
}

/// Main memory configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryConfig {
    /// Size in bytes.
    #[serde(default = "MemoryConfig::default_size")]
    pub size: usize,

    /// Start of the data address range; fetches from unreserved addresses at or above it are flagged.
    #[serde(default = "MemoryConfig::default_data_start")]
    pub data_start: u32,

    /// Extra cycles of an access that bypasses a disabled cache.
    #[serde(default)]
    pub latency: u32,
}

impl MemoryConfig {
    fn default_size() -> usize {
        defaults::MEMORY_SIZE
    }

    fn default_data_start() -> u32 {
        defaults::DATA_START
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            size: defaults::MEMORY_SIZE,
            data_start: defaults::DATA_START,
            latency: 0,
        }
    }
}
