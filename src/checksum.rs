//! SMBIOS byte-sum checksum.

/// Sum of all bytes modulo 256.
pub fn sum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// True when every byte of `data`, checksum byte included, sums to zero.
pub fn is_valid(data: &[u8]) -> bool {
    sum(data) == 0
}
