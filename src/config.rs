//! Configuration for the entry-point probe.
//!
//! Every constant the scanner and the header extractor depend on lives here as
//! an explicit value with the SMBIOS 2.x defaults, so callers can point the
//! probe at a different window or device without touching global state.

use crate::error::{ProbeError, Result};
use crate::io::DEFAULT_DEVICE;
use std::path::PathBuf;

/// Start of the legacy BIOS area searched for the anchor.
pub const LEGACY_BIOS_START: u64 = 0xF0000;
/// End (exclusive) of the legacy BIOS area.
pub const LEGACY_BIOS_END: u64 = 0x100000;
/// Minimum anchor alignment allowed by the SMBIOS standard.
pub const ANCHOR_STRIDE: u64 = 4;
/// 32-bit entry point anchor string.
pub const SMBIOS_ANCHOR: [u8; 4] = *b"_SM_";
/// Offset of the entry point length byte.
pub const LENGTH_OFFSET: u64 = 5;

/// Where and how to look for the anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// First address probed.
    pub start: u64,
    /// End of the window, exclusive.
    pub end: u64,
    /// Distance between probed addresses.
    pub stride: u64,
    pub anchor: [u8; 4],
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            start: LEGACY_BIOS_START,
            end: LEGACY_BIOS_END,
            stride: ANCHOR_STRIDE,
            anchor: SMBIOS_ANCHOR,
        }
    }
}

/// Layout of the entry point header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    /// Offset from the entry point of the single-byte header length.
    pub length_offset: u64,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            length_offset: LENGTH_OFFSET,
        }
    }
}

/// Master configuration for a probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Physical memory device node.
    pub device: PathBuf,
    pub scan: ScanConfig,
    pub header: HeaderConfig,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            device: PathBuf::from(DEFAULT_DEVICE),
            scan: ScanConfig::default(),
            header: HeaderConfig::default(),
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.stride == 0 {
            return Err(ProbeError::InvalidConfig("scan stride must be non-zero".into()));
        }
        if self.start >= self.end {
            return Err(ProbeError::InvalidConfig(format!(
                "scan window {:#x}..{:#x} is empty",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl ProbeConfig {
    pub fn validate(&self) -> Result<()> {
        self.scan.validate()
    }
}
