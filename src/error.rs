//! Error types for the SMBIOS entry-point probe.
//!
//! Accessor faults are wrapped unchanged; the remaining variants are the
//! defined outcomes the orchestration turns into a failed run.

use crate::io::error::MemoryError;
use thiserror::Error;

/// Main error type for probe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The process lacks the privilege needed to read physical memory
    #[error("Insufficient privilege: please run as root")]
    Privilege,

    /// The physical memory device could not be opened, positioned or read
    #[error("Physical memory access failed: {0}")]
    Memory(#[from] MemoryError),

    /// The scan window held no anchor
    #[error("No SMBIOS entry point found in {start:#x}..{end:#x}")]
    EntryPointNotFound { start: u64, end: u64 },

    /// The entry point bytes do not sum to zero
    #[error("Checksum mismatch for {length}-byte entry point at {address:#x} (sum {sum:#04x})")]
    ChecksumMismatch { address: u64, length: u8, sum: u8 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;
