//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, which serves as the container for the
//! entire processor state. It coordinates the following:
//! 1. **State Management:** Maintains the register set and Fetch's program counter.
//! 2. **Pipeline Control:** Owns the nine latches and the per-stage state that survives
//!    from one cycle to the next.
//! 3. **Memory Hierarchy:** Main memory with its instruction and data caches.
//! 4. **Prediction:** The BTB-based branch prediction unit.

/// Cycle driver.
pub mod execution;

use crate::config::Config;
use crate::core::arch::gpr::RegisterSet;
use crate::core::pipeline::latches::PipelineLatches;
use crate::core::pipeline::stages::decode::DecodeState;
use crate::core::pipeline::stages::fetch::FetchState;
use crate::core::pipeline::stages::memory::MemoryWait;
use crate::core::pipeline::traits::LatchRecord;
use crate::core::units::bru::BranchPredictionUnit;
use crate::core::units::memory::MemoryHierarchy;
use crate::stats::SimStats;

/// Address of the instruction waiting in front of each stage; `None` for bubbles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StagePcs {
    /// Next fetch address.
    pub fetch: u32,
    /// IF/ID.
    pub decode: Option<u32>,
    /// ID/EX.
    pub execute: Option<u32>,
    /// EX/MEM.
    pub memory: Option<u32>,
    /// MEM/WB.
    pub writeback: Option<u32>,
}

/// Main CPU structure containing all processor state and components.
///
/// The CPU moves instructions through the five-stage pipeline, owns the memory
/// hierarchy and the branch predictor, and tracks performance statistics.
#[derive(Debug)]
pub struct Cpu {
    /// Validated configuration.
    pub config: Config,
    /// General-purpose registers plus HI/LO.
    pub regs: RegisterSet,
    /// Main memory and caches.
    pub memory: MemoryHierarchy,
    /// Branch Predictor Unit.
    pub bpu: BranchPredictionUnit,
    /// All inter-stage latches.
    pub latches: PipelineLatches,
    /// Fetch program counter and bookkeeping.
    pub fetch: FetchState,
    /// Decode's in-flight destination ring and grace window.
    pub decode: DecodeState,
    /// Countdown of the data access in front of Memory.
    pub mem_wait: MemoryWait,
    /// Performance statistics.
    pub stats: SimStats,
    /// Stage addresses before the last committed cycle.
    pub previous_pcs: StagePcs,
}

impl Cpu {
    /// Creates a CPU with empty latches, about to fetch from `entry_pc`.
    ///
    /// # Arguments
    ///
    /// * `config` - Validated configuration.
    /// * `memory` - Memory hierarchy with the program already loaded.
    /// * `entry_pc` - First fetch address.
    pub fn new(config: Config, memory: MemoryHierarchy, entry_pc: u32) -> Self {
        let cpu = Self {
            regs: RegisterSet::with_initial(&config.general.initial_registers),
            memory,
            bpu: BranchPredictionUnit::new(&config.branch_predictor),
            latches: PipelineLatches::new(config.feedback_depth()),
            fetch: FetchState::new(entry_pc),
            decode: DecodeState::default(),
            mem_wait: MemoryWait::default(),
            stats: SimStats::default(),
            previous_pcs: StagePcs::default(),
            config,
        };
        Self {
            previous_pcs: cpu.stage_pcs(),
            ..cpu
        }
    }

    /// Address of the instruction in front of each stage, as committed.
    pub fn stage_pcs(&self) -> StagePcs {
        fn pc_of<T: LatchRecord>(record: Option<&T>, pc: impl Fn(&T) -> u32) -> Option<u32> {
            record.filter(|r| !r.is_bubble()).map(pc)
        }
        StagePcs {
            fetch: self.fetch.pc,
            decode: pc_of(self.latches.if_id.front(), |r| r.pc),
            execute: pc_of(self.latches.id_ex.front(), |r| r.pc),
            memory: pc_of(self.latches.ex_mem.front(), |r| r.pc),
            writeback: pc_of(self.latches.mem_wb.front(), |r| r.pc),
        }
    }
}
