//! Main Memory.
//!
//! A flat little-endian byte array addressed from zero. It provides:
//! 1. **Storage:** Byte, half, word and double accesses plus whole-line block transfers
//!    used by the caches.
//! 2. **Reservations:** The address ranges occupied by loaded segments; accesses outside
//!    them are reported by the pipeline according to the configured severity.
//! 3. **Accounting:** A count of write operations reaching memory.

use std::ops::Range;

use crate::common::data::MemWidth;
use crate::common::error::{ConfigError, MemoryError};
use crate::config::MemoryConfig;

/// Flat main memory.
#[derive(Clone, Debug)]
pub struct MainMemory {
    bytes: Vec<u8>,
    reservations: Vec<Range<u64>>,
    data_start: u32,
    writes: u64,
}

impl MainMemory {
    /// Creates zero-filled memory with no reservations.
    pub fn new(config: &MemoryConfig) -> Self {
        Self {
            bytes: vec![0; config.size],
            reservations: Vec::new(),
            data_start: config.data_start,
            writes: 0,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Start of the data address range.
    pub const fn data_start(&self) -> u32 {
        self.data_start
    }

    /// Number of writes (scalar or block) that reached memory.
    pub const fn writes(&self) -> u64 {
        self.writes
    }

    fn range(&self, addr: u32, len: usize) -> Option<Range<usize>> {
        let start = addr as usize;
        let end = start.checked_add(len)?;
        (end <= self.bytes.len()).then_some(start..end)
    }

    /// Copies `bytes` to `addr` and reserves the range.
    ///
    /// # Returns
    ///
    /// `SegmentOutOfBounds` if the segment does not fit.
    pub fn load_segment(&mut self, addr: u32, bytes: &[u8]) -> Result<(), ConfigError> {
        let range = self.range(addr, bytes.len()).ok_or(ConfigError::SegmentOutOfBounds {
            addr,
            len: bytes.len(),
        })?;
        self.bytes[range].copy_from_slice(bytes);
        self.reserve(addr, bytes.len());
        Ok(())
    }

    /// Marks `len` bytes at `addr` as reserved.
    pub fn reserve(&mut self, addr: u32, len: usize) {
        if len > 0 {
            let start = u64::from(addr);
            self.reservations.push(start..start + len as u64);
        }
    }

    /// Returns `true` if the whole access lies inside one reserved range.
    pub fn is_reserved(&self, addr: u32, width: MemWidth) -> bool {
        let start = u64::from(addr);
        let end = start + u64::from(width.bytes());
        self.reservations
            .iter()
            .any(|r| r.start <= start && end <= r.end)
    }

    /// Borrows a block of memory.
    ///
    /// # Returns
    ///
    /// The bytes, or `None` if the block extends beyond memory.
    pub fn block(&self, addr: u32, len: usize) -> Option<&[u8]> {
        self.range(addr, len).map(|r| &self.bytes[r])
    }

    /// Overwrites a block of memory.
    ///
    /// # Returns
    ///
    /// `false` if the block extends beyond memory; nothing is written then.
    pub fn write_block(&mut self, addr: u32, data: &[u8]) -> bool {
        match self.range(addr, data.len()) {
            Some(r) => {
                self.bytes[r].copy_from_slice(data);
                self.writes += 1;
                true
            }
            None => false,
        }
    }

    /// Reads `width` bytes at `addr`, zero-extended.
    pub fn read(&self, addr: u32, width: MemWidth) -> Result<u64, MemoryError> {
        let bytes = self
            .block(addr, width.bytes() as usize)
            .ok_or(MemoryError::OutOfBounds { addr, width })?;
        let mut buf = [0u8; 8];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(u64::from_le_bytes(buf))
    }

    /// Writes the low `width` bytes of `value` at `addr`.
    pub fn write(&mut self, addr: u32, width: MemWidth, value: u64) -> Result<(), MemoryError> {
        let len = width.bytes() as usize;
        let bytes = value.to_le_bytes();
        if self.write_block(addr, &bytes[..len]) {
            Ok(())
        } else {
            Err(MemoryError::OutOfBounds { addr, width })
        }
    }
}
