//! Image Loader Tests.
//!
//! ELF images are assembled by hand: one 52-byte header, one program header and the
//! segment payload.

use std::io::Write;

use pipesim_core::common::LoadError;
use pipesim_core::sim::loader::{self, MemoryImage, SegmentKind};
use pretty_assertions::assert_eq;

use crate::common::builder::riscv;

const ENTRY: u32 = 0x1000;
const PAYLOAD: [u8; 8] = [0x13, 0x00, 0x00, 0x00, 0x73, 0x00, 0x10, 0x00];

struct ElfParams {
    data_encoding: u8,
    e_type: u16,
    flags: u32,
}

impl Default for ElfParams {
    fn default() -> Self {
        Self {
            data_encoding: 1,
            e_type: 2,
            flags: 0b101,
        }
    }
}

fn elf(params: &ElfParams) -> Vec<u8> {
    let big = params.data_encoding == 2;
    let mut out = Vec::new();
    let put16 = |out: &mut Vec<u8>, v: u16| out.extend(if big { v.to_be_bytes() } else { v.to_le_bytes() });
    let put32 = |out: &mut Vec<u8>, v: u32| out.extend(if big { v.to_be_bytes() } else { v.to_le_bytes() });

    out.extend([0x7F, b'E', b'L', b'F', 1, params.data_encoding, 1, 0]);
    out.extend([0; 8]);
    put16(&mut out, params.e_type);
    put16(&mut out, 0xF3); // EM_RISCV
    put32(&mut out, 1);
    put32(&mut out, ENTRY);
    put32(&mut out, 52); // e_phoff
    put32(&mut out, 0); // e_shoff
    put32(&mut out, 0); // e_flags
    put16(&mut out, 52); // e_ehsize
    put16(&mut out, 32); // e_phentsize
    put16(&mut out, 1); // e_phnum
    put16(&mut out, 40); // e_shentsize
    put16(&mut out, 0); // e_shnum
    put16(&mut out, 0); // e_shstrndx
    assert_eq!(out.len(), 52);

    put32(&mut out, 1); // PT_LOAD
    put32(&mut out, 84); // p_offset
    put32(&mut out, ENTRY); // p_vaddr
    put32(&mut out, ENTRY); // p_paddr
    put32(&mut out, PAYLOAD.len() as u32); // p_filesz
    put32(&mut out, 16); // p_memsz
    put32(&mut out, params.flags);
    put32(&mut out, 4); // p_align
    assert_eq!(out.len(), 84);

    out.extend(PAYLOAD);
    out
}

// ══════════════════════════════════════════════════════════
// 1. ELF
// ══════════════════════════════════════════════════════════

#[test]
fn executable_segment_is_loaded_as_code() {
    let image = loader::parse_elf(&elf(&ElfParams::default())).unwrap();

    assert_eq!(image.entry_pc, ENTRY);
    assert_eq!(image.segments.len(), 1);
    let segment = &image.segments[0];
    assert_eq!(segment.addr, ENTRY);
    assert_eq!(segment.kind, SegmentKind::Code);
    // Zero-filled up to the memory size.
    assert_eq!(segment.bytes.len(), 16);
    assert_eq!(&segment.bytes[..8], &PAYLOAD);
    assert!(segment.bytes[8..].iter().all(|&b| b == 0));
    assert_eq!(image.code_start(), Some(ENTRY));
}

#[test]
fn non_executable_segment_is_data() {
    let image = loader::parse_elf(&elf(&ElfParams {
        flags: 0b110,
        ..ElfParams::default()
    }))
    .unwrap();
    assert_eq!(image.segments[0].kind, SegmentKind::Data);
    assert_eq!(image.code_start(), None);
}

#[test]
fn shared_object_is_rejected() {
    let result = loader::parse_elf(&elf(&ElfParams {
        e_type: 3,
        ..ElfParams::default()
    }));
    assert!(matches!(result, Err(LoadError::Unsupported(_))));
}

#[test]
fn big_endian_image_is_rejected() {
    let result = loader::parse_elf(&elf(&ElfParams {
        data_encoding: 2,
        ..ElfParams::default()
    }));
    assert!(matches!(result, Err(LoadError::Unsupported(_))));
}

#[test]
fn garbage_is_a_parse_error() {
    assert!(matches!(loader::parse_elf(b"not an elf"), Err(LoadError::Elf(_))));
}

#[test]
fn elf_file_is_read_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&elf(&ElfParams::default())).unwrap();
    let image = loader::load_elf(file.path()).unwrap();
    assert_eq!(image.entry_pc, ENTRY);
}

// ══════════════════════════════════════════════════════════
// 2. Raw and in-memory images
// ══════════════════════════════════════════════════════════

#[test]
fn raw_file_is_placed_at_the_given_address() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&PAYLOAD).unwrap();

    let image = loader::load_raw(file.path(), 0x400).unwrap();
    assert_eq!(image.entry_pc, 0x400);
    assert_eq!(image.segments[0].bytes, PAYLOAD.to_vec());
    assert_eq!(image.segments[0].kind, SegmentKind::Code);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = loader::load_raw(dir.path().join("absent.bin"), 0);
    assert!(matches!(result, Err(LoadError::Io(_))));
}

#[test]
fn words_are_stored_little_endian() {
    let image = MemoryImage::from_words(0x20, &[riscv::ebreak()]).with_data_words(0x100, &[0x1122_3344]);

    assert_eq!(image.segments[0].bytes, riscv::ebreak().to_le_bytes().to_vec());
    assert_eq!(image.segments[1].bytes, vec![0x44, 0x33, 0x22, 0x11]);
    assert_eq!(image.segments[1].kind, SegmentKind::Data);
    assert_eq!(image.code_start(), Some(0x20));
}
