//! Entry point header extraction.
//!
//! The header is never decoded into a record. Its length comes from a single
//! byte inside the entry point, and that byte is re-read from memory each time
//! a full header is requested.

use crate::config::HeaderConfig;
use crate::io::error::Result;
use crate::io::PhysicalMemory;
use bytes::Bytes;
use tracing::debug;

/// Offset of the SMBIOS major version byte.
pub const MAJOR_VERSION_OFFSET: usize = 6;
/// Offset of the SMBIOS minor version byte.
pub const MINOR_VERSION_OFFSET: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct HeaderExtractor {
    config: HeaderConfig,
}

impl HeaderExtractor {
    pub fn new(config: HeaderConfig) -> Self {
        Self { config }
    }

    /// Read the declared header length of the entry point at `entry_point`.
    pub fn header_length<M: PhysicalMemory>(&self, memory: &M, entry_point: u64) -> Result<u8> {
        let length = memory.read_u8(entry_point + self.config.length_offset)?;
        debug!(entry_point, length, "Read entry point length");
        Ok(length)
    }

    /// Read exactly `header_length` bytes starting at `entry_point`.
    pub fn read_header<M: PhysicalMemory>(&self, memory: &M, entry_point: u64) -> Result<Bytes> {
        let length = self.header_length(memory, entry_point)?;
        memory.read(entry_point, usize::from(length))
    }
}

/// SMBIOS `(major, minor)` version carried by an entry point header.
pub fn version(header: &[u8]) -> Option<(u8, u8)> {
    let major = *header.get(MAJOR_VERSION_OFFSET)?;
    let minor = *header.get(MINOR_VERSION_OFFSET)?;
    Some((major, minor))
}
