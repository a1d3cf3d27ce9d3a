//! Anchor scan over the legacy BIOS area.

use crate::config::ScanConfig;
use crate::io::error::Result;
use crate::io::PhysicalMemory;
use tracing::{info, trace};

/// Walks a physical window looking for the entry point anchor.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Return the first address in the window holding the anchor.
    ///
    /// Every candidate is read from `memory` afresh; a window without an
    /// anchor yields `Ok(None)`, and the first read failure aborts the scan.
    pub fn find_entry_point<M: PhysicalMemory>(&self, memory: &M) -> Result<Option<u64>> {
        let ScanConfig {
            start,
            end,
            stride,
            anchor,
        } = &self.config;

        let mut address = *start;
        while address < *end {
            let candidate = memory.read(address, anchor.len())?;
            trace!(address, "Probing for anchor");
            if candidate[..] == anchor[..] {
                info!(address, "Found SMBIOS entry point @{:#x}", address);
                return Ok(Some(address));
            }
            address = match address.checked_add(*stride) {
                Some(next) => next,
                None => break,
            };
        }
        Ok(None)
    }
}
