//! Common test utilities and helpers.
//!
//! Builders for simulated BIOS areas and a memory source that fails on demand.

use bytes::Bytes;
use smbios_probe::io::error::{MemoryError, Result};
use smbios_probe::{MemoryImage, PhysicalMemory};
use std::cell::Cell;

/// Base of the legacy BIOS area.
pub const BIOS_BASE: u64 = 0xF0000;
/// Size of the simulated area; slack past 1 MiB lets the last anchor read complete.
pub const BIOS_LEN: usize = 0x10000 + 0x100;

/// A zeroed BIOS area with room for a scan of the whole window.
pub fn bios_area() -> Vec<u8> {
    vec![0u8; BIOS_LEN]
}

/// Place an entry point at `address` with the given header `length`.
///
/// When `fix_checksum` is set, byte 4 is chosen so the header sums to zero.
pub fn place_entry_point(area: &mut [u8], address: u64, length: u8, fix_checksum: bool) {
    let ep = (address - BIOS_BASE) as usize;
    let end = ep + usize::from(length);
    area[ep..ep + 4].copy_from_slice(b"_SM_");
    area[ep + 5] = length;
    area[ep + 6] = 2;
    area[ep + 7] = 8;
    for (i, byte) in area[ep + 8..end].iter_mut().enumerate() {
        *byte = (i as u8).wrapping_mul(13).wrapping_add(0x21);
    }
    if fix_checksum {
        area[ep + 4] = 0;
        let sum = area[ep..end].iter().fold(0u8, |a, &b| a.wrapping_add(b));
        area[ep + 4] = sum.wrapping_neg();
    }
}

/// An image with a single valid 31-byte entry point at `address`.
pub fn valid_image(address: u64) -> MemoryImage {
    let mut area = bios_area();
    place_entry_point(&mut area, address, 0x1F, true);
    MemoryImage::new(BIOS_BASE, area)
}

/// Number of reads the scanner issues before matching at `address`.
pub fn scan_reads(address: u64) -> usize {
    ((address - BIOS_BASE) / 4) as usize + 1
}

/// Wraps a source and fails its `fail_on`-th read (1-based).
pub struct FlakyMemory<M> {
    inner: M,
    fail_on: usize,
    reads: Cell<usize>,
}

impl<M> FlakyMemory<M> {
    pub fn new(inner: M, fail_on: usize) -> Self {
        Self {
            inner,
            fail_on,
            reads: Cell::new(0),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl<M: PhysicalMemory> PhysicalMemory for FlakyMemory<M> {
    fn read(&self, address: u64, size: usize) -> Result<Bytes> {
        let n = self.reads.get() + 1;
        self.reads.set(n);
        if n == self.fail_on {
            return Err(MemoryError::OutOfRange { address, size });
        }
        self.inner.read(address, size)
    }
}
