//! Pipeline tests against a device node backed by a sparse file.

use smbios_probe::config::ProbeConfig;
use smbios_probe::io::error::MemoryError;
use smbios_probe::{Checksum, DevMem, PhysicalMemory, Probe, ProbeError};
use std::io::{Seek, SeekFrom, Write};
use tempfile::NamedTempFile;

use crate::common::*;

/// A file laid out like physical memory with `area` mapped at the BIOS base.
pub fn device_with(area: &[u8]) -> NamedTempFile {
    let mut device = NamedTempFile::new().unwrap();
    device
        .as_file()
        .set_len(BIOS_BASE + area.len() as u64)
        .unwrap();
    device.seek(SeekFrom::Start(BIOS_BASE)).unwrap();
    device.write_all(area).unwrap();
    device.flush().unwrap();
    device
}

fn config_for(device: &NamedTempFile) -> ProbeConfig {
    ProbeConfig {
        device: device.path().to_path_buf(),
        ..ProbeConfig::default()
    }
}

#[test]
fn finds_and_validates_entry_point_in_device() {
    let mut area = bios_area();
    place_entry_point(&mut area, 0xF0100, 0x1F, true);
    let device = device_with(&area);
    let config = config_for(&device);

    let probe = Probe::from_config(DevMem::new(&config.device), &config).unwrap();
    let report = probe.run().unwrap();
    assert_eq!(report.address, 0xF0100);
    assert_eq!(report.length, 31);
    assert_eq!(report.checksum, Checksum::Ok);
    assert_eq!(
        report.header.as_deref(),
        Some(&area[0x100..0x100 + 31])
    );
}

#[test]
fn corrupted_device_reports_bad() {
    let mut area = bios_area();
    place_entry_point(&mut area, 0xF0100, 0x1F, true);
    area[0x104] = area[0x104].wrapping_add(1);
    let device = device_with(&area);
    let config = config_for(&device);

    let report = Probe::from_config(DevMem::new(&config.device), &config)
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(report.checksum, Checksum::Bad { sum: 1 });
    assert!(report.header.is_none());
}

#[test]
fn truncated_device_fails_during_scan() {
    // The device ends well before the scan window does.
    let area = vec![0u8; 0x100];
    let device = device_with(&area);
    let config = config_for(&device);

    let result = Probe::from_config(DevMem::new(&config.device), &config)
        .unwrap()
        .run();
    assert!(matches!(
        result,
        Err(ProbeError::Memory(MemoryError::ShortRead { .. }))
    ));
}

#[test]
fn every_read_reopens_the_device() {
    let mut area = bios_area();
    place_entry_point(&mut area, 0xF0100, 0x1F, true);
    let mut device = device_with(&area);
    let mem = DevMem::new(device.path());
    assert_eq!(mem.read_u8(0xF0105).unwrap(), 0x1F);

    device.seek(SeekFrom::Start(0xF0105)).unwrap();
    device.write_all(&[0x10]).unwrap();
    device.flush().unwrap();
    assert_eq!(mem.read_u8(0xF0105).unwrap(), 0x10);
}
