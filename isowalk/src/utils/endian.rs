//! Both-endian integer fields
//!
//! ECMA-119 stores most integers twice: little-endian followed by big-endian.
//! The two copies must agree; a disagreement means the image is damaged or
//! was written by a broken tool.

use crate::error::FormatError;

/// Both-endian 32-bit value (stored as LE then BE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BothEndian32 {
    /// Little-endian value
    pub le: [u8; 4],
    /// Big-endian value
    pub be: [u8; 4],
}

impl BothEndian32 {
    /// Split the 8 bytes at `offset`
    pub fn read(data: &[u8], offset: usize) -> Self {
        Self {
            le: array_at(data, offset),
            be: array_at(data, offset + 4),
        }
    }

    /// Get value after checking both copies agree
    pub fn get(&self, field: &'static str) -> Result<u32, FormatError> {
        let little = u32::from_le_bytes(self.le);
        let big = u32::from_be_bytes(self.be);
        if little != big {
            return Err(FormatError::ByteOrderMismatch { field, little, big });
        }
        Ok(little)
    }
}

/// Both-endian 16-bit value (stored as LE then BE)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BothEndian16 {
    /// Little-endian value
    pub le: [u8; 2],
    /// Big-endian value
    pub be: [u8; 2],
}

impl BothEndian16 {
    /// Split the 4 bytes at `offset`
    pub fn read(data: &[u8], offset: usize) -> Self {
        Self {
            le: array_at(data, offset),
            be: array_at(data, offset + 2),
        }
    }

    /// Get value after checking both copies agree
    pub fn get(&self, field: &'static str) -> Result<u16, FormatError> {
        let little = u16::from_le_bytes(self.le);
        let big = u16::from_be_bytes(self.be);
        if little != big {
            return Err(FormatError::ByteOrderMismatch {
                field,
                little: little.into(),
                big: big.into(),
            });
        }
        Ok(little)
    }
}

/// Copy `N` bytes starting at `offset`
///
/// Callers index fixed layouts whose length was checked up front, so an
/// out-of-range offset is a bug in the layout tables.
pub fn array_at<const N: usize>(data: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&data[offset..offset + N]);
    out
}

/// Single-endian little-endian u32 at `offset`
pub fn le_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes(array_at(data, offset))
}

/// Single-endian big-endian u32 at `offset`
pub fn be_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(array_at(data, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_endian_32_agrees() {
        let mut data = [0u8; 8];
        data[..4].copy_from_slice(&0x1234_5678u32.to_le_bytes());
        data[4..].copy_from_slice(&0x1234_5678u32.to_be_bytes());
        assert_eq!(BothEndian32::read(&data, 0).get("size"), Ok(0x1234_5678));
    }

    #[test]
    fn test_both_endian_32_mismatch() {
        let mut data = [0u8; 8];
        data[..4].copy_from_slice(&18u32.to_le_bytes());
        data[4..].copy_from_slice(&19u32.to_be_bytes());
        assert_eq!(
            BothEndian32::read(&data, 0).get("location"),
            Err(FormatError::ByteOrderMismatch { field: "location", little: 18, big: 19 })
        );
    }

    #[test]
    fn test_both_endian_16_mismatch() {
        // Big-endian copy written little-endian by mistake
        let data = [0x00, 0x08, 0x00, 0x08];
        assert_eq!(
            BothEndian16::read(&data, 0).get("sector_size"),
            Err(FormatError::ByteOrderMismatch { field: "sector_size", little: 2048, big: 8 })
        );
    }
}
