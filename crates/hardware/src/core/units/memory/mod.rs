//! Memory Hierarchy.
//!
//! Main memory fronted by an instruction cache (used by Fetch) and a data cache (used by
//! Memory and by syscall handlers). A disabled cache passes accesses straight to main
//! memory and charges the uncached latency instead.

/// Flat main memory.
pub mod ram;

use self::ram::MainMemory;
use crate::common::data::MemWidth;
use crate::common::error::{CacheError, ConfigError, MemoryError};
use crate::config::Config;
use crate::core::units::cache::Cache;

/// Main memory plus instruction and data caches.
#[derive(Debug)]
pub struct MemoryHierarchy {
    ram: MainMemory,
    icache: Cache,
    dcache: Cache,
    latency: u32,
}

impl MemoryHierarchy {
    /// Creates the hierarchy described by `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            ram: MainMemory::new(&config.memory),
            icache: Cache::new(&config.cache.instruction),
            dcache: Cache::new(&config.cache.data),
            latency: config.memory.latency,
        }
    }

    /// Copies a segment into main memory and reserves it.
    pub fn load_segment(&mut self, addr: u32, bytes: &[u8]) -> Result<(), ConfigError> {
        self.ram.load_segment(addr, bytes)
    }

    /// Main memory.
    pub const fn ram(&self) -> &MainMemory {
        &self.ram
    }

    /// Instruction cache.
    pub const fn icache(&self) -> &Cache {
        &self.icache
    }

    /// Data cache.
    pub const fn dcache(&self) -> &Cache {
        &self.dcache
    }

    /// Cycles the fetch of `pc` will wait.
    pub fn fetch_delay(&self, pc: u32) -> u32 {
        if self.icache.enabled {
            self.icache.get_request_delay(pc)
        } else {
            self.latency
        }
    }

    /// Fetches the instruction word at `pc`.
    pub fn fetch(&mut self, pc: u32) -> Result<u32, MemoryError> {
        if self.icache.enabled {
            self.icache.read_u32(pc, &mut self.ram)
        } else {
            check_alignment(pc, MemWidth::Word)?;
            self.ram.read(pc, MemWidth::Word).map(|w| w as u32)
        }
    }

    /// Cycles a data access to `addr` will wait.
    pub fn data_delay(&self, addr: u32) -> u32 {
        if self.dcache.enabled {
            self.dcache.get_request_delay(addr)
        } else {
            self.latency
        }
    }

    /// Loads `width` bytes at `addr`, zero-extended to a register word.
    ///
    /// # Returns
    ///
    /// The raw value, `WidthMismatch` for double-word accesses, or the cache/memory fault.
    pub fn load(&mut self, addr: u32, width: MemWidth) -> Result<u32, MemoryError> {
        let value = match width {
            MemWidth::Double => return Err(MemoryError::WidthMismatch(width)),
            MemWidth::Byte if self.dcache.enabled => u32::from(self.dcache.read_u8(addr, &mut self.ram)?),
            MemWidth::Half if self.dcache.enabled => u32::from(self.dcache.read_u16(addr, &mut self.ram)?),
            MemWidth::Word if self.dcache.enabled => self.dcache.read_u32(addr, &mut self.ram)?,
            _ => {
                check_alignment(addr, width)?;
                self.ram.read(addr, width)? as u32
            }
        };
        Ok(value)
    }

    /// Stores the low `width` bytes of `value` at `addr`.
    pub fn store(&mut self, addr: u32, width: MemWidth, value: u32) -> Result<(), MemoryError> {
        match width {
            MemWidth::Double => Err(MemoryError::WidthMismatch(width)),
            MemWidth::Byte if self.dcache.enabled => self.dcache.write_u8(addr, value as u8, &mut self.ram),
            MemWidth::Half if self.dcache.enabled => self.dcache.write_u16(addr, value as u16, &mut self.ram),
            MemWidth::Word if self.dcache.enabled => self.dcache.write_u32(addr, value, &mut self.ram),
            _ => {
                check_alignment(addr, width)?;
                self.ram.write(addr, width, u64::from(value))
            }
        }
    }

    /// Returns `true` if the access lies inside a loaded segment.
    pub fn is_reserved(&self, addr: u32, width: MemWidth) -> bool {
        self.ram.is_reserved(addr, width)
    }

    /// Start of the data address range.
    pub const fn data_start(&self) -> u32 {
        self.ram.data_start()
    }

    /// Writes every dirty data-cache line back to main memory.
    ///
    /// # Returns
    ///
    /// The number of lines written back.
    pub fn flush_data_cache(&mut self) -> Result<u64, MemoryError> {
        if self.dcache.enabled {
            self.dcache.flush(&mut self.ram)
        } else {
            Ok(0)
        }
    }

    /// Reads the word a load of `addr` would observe, without side effects.
    pub fn peek_u32(&self, addr: u32) -> Result<u32, MemoryError> {
        let value = if self.dcache.enabled {
            self.dcache.peek(addr, MemWidth::Word, &self.ram)?
        } else {
            self.ram.read(addr, MemWidth::Word)?
        };
        Ok(value as u32)
    }
}

fn check_alignment(addr: u32, width: MemWidth) -> Result<(), MemoryError> {
    if width.is_aligned(addr) {
        Ok(())
    } else {
        Err(CacheError::Misaligned { addr, width }.into())
    }
}
