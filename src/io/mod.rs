//! Scoped access to the machine's physical address space.
//!
//! This module provides the `PhysicalMemory` capability used by the scanner and
//! the header extractor, along with two sources: `DevMem`, which reads a
//! physical-memory device node such as `/dev/mem`, and `MemoryImage`, which
//! serves a byte buffer mapped at a fixed base address.

pub mod error;

use crate::io::error::{MemoryError, Result};
use bytes::Bytes;
use rustix::fs::OFlags;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Default physical-memory device node on Linux.
pub const DEFAULT_DEVICE: &str = "/dev/mem";

/// A readable source of physical memory.
///
/// Every call is independent: implementations must not cache contents
/// between reads, and must return exactly `size` bytes or an error.
pub trait PhysicalMemory {
    /// Read `size` bytes starting at the absolute physical `address`.
    fn read(&self, address: u64, size: usize) -> Result<Bytes>;

    /// Read the single byte at `address`.
    fn read_u8(&self, address: u64) -> Result<u8> {
        let byte = self.read(address, 1)?;
        Ok(byte[0])
    }
}

impl<M: PhysicalMemory + ?Sized> PhysicalMemory for &M {
    fn read(&self, address: u64, size: usize) -> Result<Bytes> {
        (**self).read(address, size)
    }
}

/// Physical memory backed by a device node.
///
/// The node is opened read/write with `O_SYNC` for every read and closed again
/// when the read returns, so no handle outlives a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevMem {
    path: PathBuf,
}

impl DevMem {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for DevMem {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE)
    }
}

impl PhysicalMemory for DevMem {
    fn read(&self, address: u64, size: usize) -> Result<Bytes> {
        let mut device = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(OFlags::SYNC.bits() as i32)
            .open(&self.path)
            .map_err(|e| MemoryError::classify(e, address, size))?;

        device
            .seek(SeekFrom::Start(address))
            .map_err(|e| MemoryError::classify(e, address, size))?;

        let mut buf = vec![0u8; size];
        let mut filled = 0;
        while filled < size {
            match device.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(MemoryError::classify(e, address, size)),
            }
        }

        trace!(
            device = %self.path.display(),
            address,
            requested = size,
            read = filled,
            "Performed physical read"
        );

        if filled < size {
            debug!(
                device = %self.path.display(),
                address,
                expected = size,
                actual = filled,
                "Device returned a short read"
            );
            return Err(MemoryError::ShortRead {
                address,
                expected: size,
                actual: filled,
            });
        }

        Ok(Bytes::from(buf))
    }
}

/// A snapshot of physical memory held in a buffer mapped at `base`.
///
/// Reads that start outside the mapped window fail with `OutOfRange`; reads
/// that run off its end fail with `ShortRead`, mirroring a device node.
#[derive(Debug, Clone)]
pub struct MemoryImage {
    base: u64,
    data: Bytes,
}

impl MemoryImage {
    pub fn new(base: u64, data: impl Into<Bytes>) -> Self {
        Self {
            base,
            data: data.into(),
        }
    }

    /// A zero-filled image covering `[base, base + len)`.
    pub fn zeroed(base: u64, len: usize) -> Self {
        Self::new(base, vec![0u8; len])
    }

    pub fn base(&self) -> u64 {
        self.base
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// One past the last mapped address.
    pub fn end(&self) -> u64 {
        self.base + self.data.len() as u64
    }
}

impl PhysicalMemory for MemoryImage {
    fn read(&self, address: u64, size: usize) -> Result<Bytes> {
        if address < self.base || address > self.end() {
            return Err(MemoryError::OutOfRange { address, size });
        }
        let start = (address - self.base) as usize;
        let available = self.data.len() - start;
        if available < size {
            return Err(MemoryError::ShortRead {
                address,
                expected: size,
                actual: available,
            });
        }
        Ok(self.data.slice(start..start + size))
    }
}
