//! Memory Hierarchy Tests.

use pipesim_core::common::error::{CacheError, ConfigError, MemoryError};
use pipesim_core::common::MemWidth;
use pipesim_core::config::Config;
use pipesim_core::core::units::memory::MemoryHierarchy;
use pretty_assertions::assert_eq;

fn uncached() -> MemoryHierarchy {
    let mut config = Config::default();
    config.memory.size = 0x1000;
    config.memory.latency = 3;
    MemoryHierarchy::new(&config)
}

fn cached() -> MemoryHierarchy {
    let mut config = Config::default();
    config.memory.size = 0x1000;
    config.cache.instruction.enabled = true;
    config.cache.data.enabled = true;
    MemoryHierarchy::new(&config)
}

#[test]
fn narrow_loads_are_zero_extended() {
    let mut mem = uncached();
    mem.store(0x100, MemWidth::Word, 0x8081_8283).unwrap();
    assert_eq!(mem.load(0x100, MemWidth::Byte).unwrap(), 0x83);
    assert_eq!(mem.load(0x102, MemWidth::Half).unwrap(), 0x8081);
}

#[test]
fn double_width_is_not_a_register_access() {
    let mut mem = uncached();
    assert_eq!(
        mem.load(0x100, MemWidth::Double),
        Err(MemoryError::WidthMismatch(MemWidth::Double))
    );
    assert_eq!(
        mem.store(0x100, MemWidth::Double, 0),
        Err(MemoryError::WidthMismatch(MemWidth::Double))
    );
}

#[test]
fn uncached_accesses_still_check_alignment() {
    let mut mem = uncached();
    assert_eq!(
        mem.load(0x101, MemWidth::Half),
        Err(MemoryError::Cache(CacheError::Misaligned {
            addr: 0x101,
            width: MemWidth::Half
        }))
    );
    assert!(mem.fetch(0x102).is_err());
}

#[test]
fn out_of_range_access_is_reported() {
    let mut mem = uncached();
    assert_eq!(
        mem.load(0x1000, MemWidth::Word),
        Err(MemoryError::OutOfBounds {
            addr: 0x1000,
            width: MemWidth::Word
        })
    );
}

#[test]
fn disabled_caches_charge_the_memory_latency() {
    let mem = uncached();
    assert_eq!(mem.fetch_delay(0), 3);
    assert_eq!(mem.data_delay(0x200), 3);
}

#[test]
fn enabled_caches_charge_miss_then_hit() {
    let mut mem = cached();
    mem.load_segment(0, &0x0000_0013u32.to_le_bytes()).unwrap();
    assert_eq!(mem.fetch_delay(0), 10);
    assert_eq!(mem.fetch(0).unwrap(), 0x13);
    assert_eq!(mem.fetch_delay(0), 0);
    assert_eq!(mem.icache().stats().misses, 1);
    assert_eq!(mem.dcache().stats().reads, 0);
}

#[test]
fn segments_reserve_their_range() {
    let mut mem = uncached();
    mem.load_segment(0x200, &[0; 8]).unwrap();
    assert!(mem.is_reserved(0x204, MemWidth::Word));
    assert!(!mem.is_reserved(0x208, MemWidth::Word));
}

#[test]
fn segment_past_the_end_is_rejected() {
    let mut mem = uncached();
    assert!(matches!(
        mem.load_segment(0xFFC, &[0; 8]),
        Err(ConfigError::SegmentOutOfBounds { addr: 0xFFC, len: 8 })
    ));
}

#[test]
fn dirty_data_is_visible_through_peek_until_flushed() {
    let mut mem = cached();
    mem.store(0x300, MemWidth::Word, 55).unwrap();

    assert_eq!(mem.ram().read(0x300, MemWidth::Word).unwrap(), 0);
    assert_eq!(mem.peek_u32(0x300).unwrap(), 55);

    assert_eq!(mem.flush_data_cache().unwrap(), 1);
    assert_eq!(mem.ram().read(0x300, MemWidth::Word).unwrap(), 55);
}

#[test]
fn flushing_a_disabled_cache_writes_nothing() {
    let mut mem = uncached();
    mem.store(0x300, MemWidth::Word, 55).unwrap();
    assert_eq!(mem.flush_data_cache().unwrap(), 0);
    assert_eq!(mem.peek_u32(0x300).unwrap(), 55);
}
