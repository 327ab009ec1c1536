//! Program Image Loading.
//!
//! This module turns program files into a [`MemoryImage`]. It performs:
//! 1. **Raw binaries:** Places a flat file of instruction words at a given address.
//! 2. **ELF:** Parses 32-bit little-endian ELF executables, loading every `PT_LOAD`
//!    segment and tagging executable ones as code.
//! 3. **In-memory images:** Builds images from instruction words for tests and tools.

use std::fs;
use std::path::Path;

use object::Endian;
use object::elf;
use object::read::elf::{FileHeader, ProgramHeader};

use crate::common::error::LoadError;

/// What a segment holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Instructions.
    Code,
    /// Initialized or zero-filled data.
    Data,
}

/// A contiguous block of bytes placed in main memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Load address.
    pub addr: u32,
    /// Contents.
    pub bytes: Vec<u8>,
    /// Code or data.
    pub kind: SegmentKind,
}

/// A loadable program: its segments and entry point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryImage {
    /// First fetch address.
    pub entry_pc: u32,
    /// Segments, in load order.
    pub segments: Vec<Segment>,
}

impl MemoryImage {
    /// Creates an empty image entered at `entry_pc`.
    pub const fn new(entry_pc: u32) -> Self {
        Self {
            entry_pc,
            segments: Vec::new(),
        }
    }

    /// Creates an image holding `words` as code at `addr`, entered at `addr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::sim::loader::{MemoryImage, SegmentKind};
    ///
    /// let image = MemoryImage::from_words(0x100, &[0x0050_0093, 0x0010_0073]);
    /// assert_eq!(image.entry_pc, 0x100);
    /// assert_eq!(image.segments[0].kind, SegmentKind::Code);
    /// assert_eq!(image.segments[0].bytes.len(), 8);
    /// ```
    pub fn from_words(addr: u32, words: &[u32]) -> Self {
        Self::new(addr).with_segment(addr, words_to_bytes(words), SegmentKind::Code)
    }

    /// Adds a segment.
    #[must_use]
    pub fn with_segment(mut self, addr: u32, bytes: Vec<u8>, kind: SegmentKind) -> Self {
        self.segments.push(Segment { addr, bytes, kind });
        self
    }

    /// Adds a data segment holding `words`.
    #[must_use]
    pub fn with_data_words(self, addr: u32, words: &[u32]) -> Self {
        self.with_segment(addr, words_to_bytes(words), SegmentKind::Data)
    }

    /// Lowest address of any code segment.
    pub fn code_start(&self) -> Option<u32> {
        self.segments
            .iter()
            .filter(|s| s.kind == SegmentKind::Code)
            .map(|s| s.addr)
            .min()
    }
}

fn words_to_bytes(words: &[u32]) -> Vec<u8> {
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

/// Loads a flat binary as a single code segment.
///
/// # Arguments
///
/// * `path` - File of little-endian instruction words.
/// * `addr` - Load address, also the entry point.
///
/// # Returns
///
/// The image, or the I/O error.
pub fn load_raw(path: impl AsRef<Path>, addr: u32) -> Result<MemoryImage, LoadError> {
    let bytes = fs::read(path)?;
    tracing::debug!(addr = format_args!("{addr:#010x}"), len = bytes.len(), "raw image loaded");
    Ok(MemoryImage::new(addr).with_segment(addr, bytes, SegmentKind::Code))
}

/// Loads a 32-bit little-endian ELF executable.
///
/// # Arguments
///
/// * `path` - The ELF file.
///
/// # Returns
///
/// The image with one segment per `PT_LOAD` header, or the parse error.
pub fn load_elf(path: impl AsRef<Path>) -> Result<MemoryImage, LoadError> {
    let data = fs::read(path)?;
    parse_elf(&data)
}

/// Parses a 32-bit little-endian ELF executable held in memory.
pub fn parse_elf(data: &[u8]) -> Result<MemoryImage, LoadError> {
    let header = elf::FileHeader32::<object::Endianness>::parse(data)?;
    let endian = header.endian()?;
    if !endian.is_little_endian() {
        return Err(LoadError::Unsupported("big-endian images"));
    }
    if header.e_type(endian) != elf::ET_EXEC {
        return Err(LoadError::Unsupported("not an executable"));
    }

    let mut image = MemoryImage::new(header.e_entry(endian));
    for segment in header.program_headers(endian, data)? {
        if segment.p_type(endian) != elf::PT_LOAD {
            continue;
        }
        let addr = segment.p_vaddr(endian);
        let mem_size = segment.p_memsz(endian);
        if addr.checked_add(mem_size).is_none() {
            return Err(LoadError::AddressOverflow {
                addr: u64::from(addr),
            });
        }
        let mut bytes = segment
            .data(endian, data)
            .map_err(|()| LoadError::Unsupported("segment data outside the file"))?
            .to_vec();
        bytes.resize(bytes.len().max(mem_size as usize), 0);

        let kind = if segment.p_flags(endian) & elf::PF_X != 0 {
            SegmentKind::Code
        } else {
            SegmentKind::Data
        };
        tracing::debug!(
            addr = format_args!("{addr:#010x}"),
            len = bytes.len(),
            ?kind,
            "ELF segment loaded"
        );
        image = image.with_segment(addr, bytes, kind);
    }
    Ok(image)
}
