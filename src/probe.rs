//! End-to-end entry point probe.
//!
//! Runs scan → length → checksum → dump against a `PhysicalMemory` source and
//! stops at the first stage that fails. The result is a `Report`; a report
//! with a bad checksum never carries header bytes.

use crate::checksum;
use crate::config::{HeaderConfig, ProbeConfig, ScanConfig};
use crate::error::{ProbeError, Result};
use crate::header::{self, HeaderExtractor};
use crate::io::PhysicalMemory;
use crate::scan::Scanner;
use bytes::Bytes;
use std::fmt;
use std::io::Write;
use tracing::{info, info_span, warn};

/// Checksum verdict for an entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checksum {
    Ok,
    Bad { sum: u8 },
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Checksum::Ok => f.write_str("OK"),
            Checksum::Bad { .. } => f.write_str("BAD"),
        }
    }
}

/// Outcome of a probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub address: u64,
    pub length: u8,
    pub version: Option<(u8, u8)>,
    pub checksum: Checksum,
    /// Full header, present only when the checksum is valid.
    pub header: Option<Bytes>,
}

impl Report {
    pub fn is_valid(&self) -> bool {
        self.checksum == Checksum::Ok
    }

    /// Turn a bad checksum into `ProbeError::ChecksumMismatch`.
    pub fn ensure_valid(&self) -> Result<()> {
        match self.checksum {
            Checksum::Ok => Ok(()),
            Checksum::Bad { sum } => Err(ProbeError::ChecksumMismatch {
                address: self.address,
                length: self.length,
                sum,
            }),
        }
    }

    /// Write the human-readable report lines.
    pub fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Found SMBIOS entrypoint @{:#x}", self.address)?;
        if let Some((major, minor)) = self.version {
            writeln!(out, "SMBIOS Version: {}.{}", major, minor)?;
        }
        writeln!(out, "SMBIOS Header Length: {} bytes", self.length)?;
        writeln!(out, "Checksum: {}", self.checksum)?;
        if let Some(header) = &self.header {
            writeln!(out, "SMBIOS HEADER: {}", HexBytes(header))?;
        }
        Ok(())
    }
}

/// Space separated lowercase hex.
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Entry point probe over a physical memory source.
pub struct Probe<M> {
    memory: M,
    scanner: Scanner,
    extractor: HeaderExtractor,
}

impl<M: PhysicalMemory> Probe<M> {
    pub fn new(memory: M, scan: ScanConfig, header: HeaderConfig) -> Self {
        Self {
            memory,
            scanner: Scanner::new(scan),
            extractor: HeaderExtractor::new(header),
        }
    }

    /// Build a probe from a validated configuration.
    pub fn from_config(memory: M, config: &ProbeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(memory, config.scan.clone(), config.header.clone()))
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn find_entry_point(&self) -> Result<Option<u64>> {
        Ok(self.scanner.find_entry_point(&self.memory)?)
    }

    pub fn header_length(&self, entry_point: u64) -> Result<u8> {
        Ok(self.extractor.header_length(&self.memory, entry_point)?)
    }

    pub fn read_header(&self, entry_point: u64) -> Result<Bytes> {
        Ok(self.extractor.read_header(&self.memory, entry_point)?)
    }

    /// Sum the declared header span, returning its length, bytes and verdict.
    pub fn verify_checksum(&self, entry_point: u64) -> Result<(u8, Bytes, Checksum)> {
        let length = self.header_length(entry_point)?;
        info!(length, "SMBIOS header length: {} bytes", length);
        let window = self.memory.read(entry_point, usize::from(length))?;
        let sum = checksum::sum(&window);
        let verdict = if sum == 0 {
            Checksum::Ok
        } else {
            warn!(entry_point, length, sum, "Entry point checksum mismatch");
            Checksum::Bad { sum }
        };
        Ok((length, window, verdict))
    }

    /// Run the whole pipeline.
    pub fn run(&self) -> Result<Report> {
        let run_span = info_span!("smbios_probe");
        let _guard = run_span.enter();

        let scan = self.scanner.config();
        let address = self
            .find_entry_point()?
            .ok_or(ProbeError::EntryPointNotFound {
                start: scan.start,
                end: scan.end,
            })?;

        let (length, window, checksum) = self.verify_checksum(address)?;
        let version = header::version(&window);

        let header = match checksum {
            Checksum::Ok => Some(self.read_header(address)?),
            Checksum::Bad { .. } => None,
        };

        Ok(Report {
            address,
            length,
            version,
            checksum,
            header,
        })
    }
}
