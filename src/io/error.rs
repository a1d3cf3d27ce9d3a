//! Custom error types for the physical memory accessor.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Access to physical memory at {address:#x} was denied; are you root?")]
    AccessDenied { address: u64 },

    #[error("Physical address range {address:#x}+{size:#x} is not readable.")]
    OutOfRange { address: u64, size: usize },

    #[error("Short read at {address:#x}: expected {expected} bytes, got {actual}.")]
    ShortRead {
        address: u64,
        expected: usize,
        actual: usize,
    },

    #[error("An underlying device I/O error occurred: {0}")]
    Device(#[from] std::io::Error),
}

impl MemoryError {
    /// Classify an OS error raised while positioning or reading the device.
    pub(crate) fn classify(err: std::io::Error, address: u64, size: usize) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            return MemoryError::AccessDenied { address };
        }
        match err.raw_os_error().map(rustix::io::Errno::from_raw_os_error) {
            Some(rustix::io::Errno::FAULT)
            | Some(rustix::io::Errno::INVAL)
            | Some(rustix::io::Errno::NXIO)
            | Some(rustix::io::Errno::IO) => MemoryError::OutOfRange { address, size },
            _ => MemoryError::Device(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, MemoryError>;
