//! Set-Associative Cache.
//!
//! This module implements a configurable set-associative cache that holds line data in
//! front of [`MainMemory`]. It performs the following:
//! 1. **Timing:** [`Cache::get_request_delay`] reports, without side effects, how many
//!    cycles an access to an address will take.
//! 2. **Data Path:** Naturally aligned reads and writes of 1, 2, 4 and 8 bytes with
//!    write-allocate on a miss and write-through or write-back behaviour.
//! 3. **Replacement:** Victim selection through a [`ReplacementPolicy`], preferring
//!    invalid ways.
//! 4. **Accounting:** Hit, miss, fill and write-back counters.

/// Cache replacement policy implementations (direct-mapped, FIFO, LRU).
pub mod policies;

use self::policies::{DirectMapped, FifoPolicy, LruPolicy, ReplacementPolicy};
use crate::common::data::MemWidth;
use crate::common::error::{CacheError, MemoryError};
use crate::config::{CacheConfig, ReplacementPolicy as PolicyType, WritePolicy};
use crate::core::units::memory::ram::MainMemory;

/// Cache line: tag, validity, dirtiness and payload.
#[derive(Clone, Debug, Default)]
struct CacheLine {
    tag: u32,
    valid: bool,
    dirty: bool,
    data: Vec<u8>,
}

/// Cache access counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Read accesses.
    pub reads: u64,
    /// Write accesses.
    pub writes: u64,
    /// Accesses that found their line.
    pub hits: u64,
    /// Accesses that had to fill a line.
    pub misses: u64,
    /// Lines loaded from memory.
    pub fills: u64,
    /// Dirty lines written back to memory.
    pub writebacks: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Set-associative cache with line data.
#[derive(Debug)]
pub struct Cache {
    /// When false, accesses bypass this cache.
    pub enabled: bool,
    lines: Vec<CacheLine>,
    sets: usize,
    ways: usize,
    line_bytes: usize,
    hit_latency: u32,
    miss_penalty: u32,
    write_policy: WritePolicy,
    policy: Box<dyn ReplacementPolicy>,
    stats: CacheStats,
}

impl Cache {
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry, policies and latencies. Assumed validated.
    pub fn new(config: &CacheConfig) -> Self {
        let ways = config.effective_ways().max(1);
        let line_bytes = config.line_bytes.max(1);
        let sets = (config.lines / ways).max(1);

        let policy: Box<dyn ReplacementPolicy> = match config.policy {
            PolicyType::DirectMapped => Box::new(DirectMapped),
            PolicyType::Fifo => Box::new(FifoPolicy::new(sets, ways)),
            PolicyType::Lru => Box::new(LruPolicy::new(sets, ways)),
        };

        Self {
            enabled: config.enabled,
            lines: vec![
                CacheLine {
                    data: vec![0; line_bytes],
                    ..CacheLine::default()
                };
                sets * ways
            ],
            sets,
            ways,
            line_bytes,
            hit_latency: config.hit_latency,
            miss_penalty: config.miss_penalty,
            write_policy: config.write_policy,
            policy,
            stats: CacheStats::default(),
        }
    }

    /// Access counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn set_index(&self, addr: u32) -> usize {
        (addr as usize / self.line_bytes) % self.sets
    }

    fn tag(&self, addr: u32) -> u32 {
        (addr as usize / (self.line_bytes * self.sets)) as u32
    }

    fn line_base(&self, addr: u32) -> u32 {
        addr & !(self.line_bytes as u32 - 1)
    }

    fn address_of(&self, set: usize, tag: u32) -> u32 {
        ((tag as usize * self.sets + set) * self.line_bytes) as u32
    }

    fn find(&self, addr: u32) -> Option<usize> {
        let set = self.set_index(addr);
        let tag = self.tag(addr);
        (0..self.ways)
            .map(|w| set * self.ways + w)
            .find(|&i| self.lines[i].valid && self.lines[i].tag == tag)
    }

    /// Returns `true` if the line holding `addr` is present.
    pub fn contains(&self, addr: u32) -> bool {
        self.find(addr).is_some()
    }

    /// Way that a fill of `set` would replace: the first invalid way, else the policy's victim.
    fn victim_way(&self, set: usize) -> usize {
        (0..self.ways)
            .find(|&w| !self.lines[set * self.ways + w].valid)
            .unwrap_or_else(|| self.policy.victim(set))
    }

    /// Cycles an access to `addr` would take, without changing any state.
    ///
    /// # Returns
    ///
    /// The hit latency on a hit; on a miss the miss penalty, paid twice when the
    /// victim is dirty and must be written back first.
    pub fn get_request_delay(&self, addr: u32) -> u32 {
        if self.find(addr).is_some() {
            return self.hit_latency;
        }
        let set = self.set_index(addr);
        let victim = &self.lines[set * self.ways + self.victim_way(set)];
        if victim.valid && victim.dirty {
            self.miss_penalty.saturating_mul(2)
        } else {
            self.miss_penalty
        }
    }

    /// Finds or fills the line of `addr`, returning its index in `lines`.
    fn line_for(
        &mut self,
        addr: u32,
        width: MemWidth,
        memory: &mut MainMemory,
    ) -> Result<usize, MemoryError> {
        if !width.is_aligned(addr) {
            return Err(CacheError::Misaligned { addr, width }.into());
        }
        if let Some(idx) = self.find(addr) {
            self.stats.hits += 1;
            self.policy.on_access(idx / self.ways, idx % self.ways);
            return Ok(idx);
        }
        self.stats.misses += 1;

        let set = self.set_index(addr);
        let way = self.victim_way(set);
        let idx = set * self.ways + way;
        let base = self.line_base(addr);
        let fill = memory
            .block(base, self.line_bytes)
            .ok_or(MemoryError::OutOfBounds { addr, width })?
            .to_vec();

        if self.lines[idx].valid && self.lines[idx].dirty {
            let victim_addr = self.address_of(set, self.lines[idx].tag);
            if !memory.write_block(victim_addr, &self.lines[idx].data) {
                return Err(MemoryError::OutOfBounds {
                    addr: victim_addr,
                    width,
                });
            }
            self.stats.writebacks += 1;
            tracing::debug!(addr = format_args!("{victim_addr:#010x}"), "cache write-back");
        }

        let tag = self.tag(addr);
        let line = &mut self.lines[idx];
        line.tag = tag;
        line.valid = true;
        line.dirty = false;
        line.data.copy_from_slice(&fill);
        self.stats.fills += 1;
        self.policy.on_fill(set, way);
        tracing::debug!(addr = format_args!("{base:#010x}"), set, way, "cache fill");
        Ok(idx)
    }

    fn read_line(&self, idx: usize, addr: u32, len: usize) -> Result<u64, CacheError> {
        let line = &self.lines[idx];
        if !line.valid {
            return Err(CacheError::InvalidLine { addr });
        }
        let offset = addr as usize % self.line_bytes;
        let mut buf = [0u8; 8];
        buf[..len].copy_from_slice(&line.data[offset..offset + len]);
        Ok(u64::from_le_bytes(buf))
    }

    fn read(&mut self, addr: u32, width: MemWidth, memory: &mut MainMemory) -> Result<u64, MemoryError> {
        self.stats.reads += 1;
        let idx = self.line_for(addr, width, memory)?;
        Ok(self.read_line(idx, addr, width.bytes() as usize)?)
    }

    fn write(
        &mut self,
        addr: u32,
        width: MemWidth,
        value: u64,
        memory: &mut MainMemory,
    ) -> Result<(), MemoryError> {
        self.stats.writes += 1;
        let idx = self.line_for(addr, width, memory)?;
        let len = width.bytes() as usize;
        let offset = addr as usize % self.line_bytes;
        let line = &mut self.lines[idx];
        if !line.valid {
            return Err(CacheError::InvalidLine { addr }.into());
        }
        line.data[offset..offset + len].copy_from_slice(&value.to_le_bytes()[..len]);
        match self.write_policy {
            WritePolicy::WriteBack => line.dirty = true,
            WritePolicy::WriteThrough => memory.write(addr, width, value)?,
        }
        Ok(())
    }

    /// Reads a byte through the cache.
    pub fn read_u8(&mut self, addr: u32, memory: &mut MainMemory) -> Result<u8, MemoryError> {
        self.read(addr, MemWidth::Byte, memory).map(|v| v as u8)
    }

    /// Reads a naturally aligned half-word through the cache.
    pub fn read_u16(&mut self, addr: u32, memory: &mut MainMemory) -> Result<u16, MemoryError> {
        self.read(addr, MemWidth::Half, memory).map(|v| v as u16)
    }

    /// Reads a naturally aligned word through the cache.
    pub fn read_u32(&mut self, addr: u32, memory: &mut MainMemory) -> Result<u32, MemoryError> {
        self.read(addr, MemWidth::Word, memory).map(|v| v as u32)
    }

    /// Reads a naturally aligned double-word through the cache.
    pub fn read_u64(&mut self, addr: u32, memory: &mut MainMemory) -> Result<u64, MemoryError> {
        self.read(addr, MemWidth::Double, memory)
    }

    /// Writes a byte through the cache.
    pub fn write_u8(&mut self, addr: u32, value: u8, memory: &mut MainMemory) -> Result<(), MemoryError> {
        self.write(addr, MemWidth::Byte, u64::from(value), memory)
    }

    /// Writes a naturally aligned half-word through the cache.
    pub fn write_u16(&mut self, addr: u32, value: u16, memory: &mut MainMemory) -> Result<(), MemoryError> {
        self.write(addr, MemWidth::Half, u64::from(value), memory)
    }

    /// Writes a naturally aligned word through the cache.
    pub fn write_u32(&mut self, addr: u32, value: u32, memory: &mut MainMemory) -> Result<(), MemoryError> {
        self.write(addr, MemWidth::Word, u64::from(value), memory)
    }

    /// Writes a naturally aligned double-word through the cache.
    pub fn write_u64(&mut self, addr: u32, value: u64, memory: &mut MainMemory) -> Result<(), MemoryError> {
        self.write(addr, MemWidth::Double, value, memory)
    }

    /// Reads `width` bytes at `addr` from the cached copy if present, else from memory.
    /// Nothing is filled and no counter moves.
    pub fn peek(&self, addr: u32, width: MemWidth, memory: &MainMemory) -> Result<u64, MemoryError> {
        if !width.is_aligned(addr) {
            return Err(CacheError::Misaligned { addr, width }.into());
        }
        match self.find(addr) {
            Some(idx) => Ok(self.read_line(idx, addr, width.bytes() as usize)?),
            None => memory.read(addr, width),
        }
    }

    /// Writes every dirty line back to memory. Lines stay valid and become clean.
    ///
    /// # Returns
    ///
    /// The number of lines written back.
    pub fn flush(&mut self, memory: &mut MainMemory) -> Result<u64, MemoryError> {
        let mut written = 0;
        for idx in 0..self.lines.len() {
            if !(self.lines[idx].valid && self.lines[idx].dirty) {
                continue;
            }
            let addr = self.address_of(idx / self.ways, self.lines[idx].tag);
            if !memory.write_block(addr, &self.lines[idx].data) {
                return Err(MemoryError::OutOfBounds {
                    addr,
                    width: MemWidth::Byte,
                });
            }
            self.lines[idx].dirty = false;
            written += 1;
        }
        self.stats.writebacks += written;
        Ok(written)
    }
}
