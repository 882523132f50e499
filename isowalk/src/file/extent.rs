//! File extent management
//!
//! Extents represent contiguous data regions on disk.

use crate::directory::record::DirectoryRecord;
use crate::types::SECTOR_SIZE;

/// File extent (contiguous data region)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// Starting LBA, relative to the start of the ISO
    pub lba: u32,

    /// Length in bytes
    pub length: u32,
}

impl Extent {
    /// Create new extent
    pub fn new(lba: u32, length: u32) -> Self {
        Self { lba, length }
    }

    /// Extent described by a directory record
    pub fn of(record: &DirectoryRecord) -> Self {
        Self::new(record.location, record.size)
    }

    /// Byte offset just past the data, relative to the start of the ISO
    pub fn end_offset(&self) -> u64 {
        u64::from(self.lba) * SECTOR_SIZE as u64 + u64::from(self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_end() {
        assert_eq!(Extent::new(20, 5120).end_offset(), 20 * 2048 + 5120);
        assert_eq!(Extent::new(20, 5).end_offset(), 40965);
        assert_eq!(
            Extent::new(u32::MAX, u32::MAX).end_offset(),
            u64::from(u32::MAX) * 2048 + u64::from(u32::MAX)
        );
    }
}
