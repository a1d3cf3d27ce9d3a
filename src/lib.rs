//! Locate, validate and dump the legacy SMBIOS entry point from physical memory.

pub mod checksum;
pub mod config;
pub mod error;
pub mod header;
pub mod io;
pub mod logging;
pub mod privilege;
pub mod probe;
pub mod scan;

pub use error::{ProbeError, Result};
pub use io::{DevMem, MemoryImage, PhysicalMemory};
pub use probe::{Checksum, Probe, Report};
