//! File reading and extent management

pub mod extent;

use crate::directory::record::DirectoryRecord;
use crate::error::{FormatError, Iso9660Error, Result};
use crate::types::SECTOR_SIZE;
use crate::utils::sector::{device_sectors, read_sectors, sector_to_byte};
use alloc::vec::Vec;
use extent::Extent;
use gpt_disk_io::BlockIo;

/// Check that the extent of `record` lies inside the device
///
/// Compares the byte just past the file against the device length. Image
/// sources expose a trailing partial sector as a whole, zero-filled block,
/// so a file ending inside it is readable.
pub fn check_extent<B: BlockIo>(
    block_io: &mut B,
    start_sector: u64,
    record: &DirectoryRecord,
) -> Result<()> {
    let extent = Extent::of(record);
    let end = sector_to_byte(start_sector) + extent.end_offset();
    if end > sector_to_byte(device_sectors(block_io)?) {
        return Err(FormatError::FileTruncated {
            location: extent.lba,
            size: extent.length,
        }
        .into());
    }
    Ok(())
}

/// Read file contents
///
/// A zero-length record touches no sectors at all. Otherwise the whole
/// extent must lie inside the device or the image counts as truncated.
///
/// # Arguments
/// * `block_io` - Block device
/// * `start_sector` - Starting sector of the ISO (0 if raw ISO)
/// * `record` - Directory record of the file or directory to read
/// * `buffer` - Buffer to read into, at least `record.size` bytes
///
/// # Returns
/// Number of bytes read
pub fn read_file<B: BlockIo>(
    block_io: &mut B,
    start_sector: u64,
    record: &DirectoryRecord,
    buffer: &mut [u8],
) -> Result<usize> {
    let file_size = record.size as usize;
    if file_size == 0 {
        return Ok(0);
    }

    // Check buffer size
    if buffer.len() < file_size {
        return Err(Iso9660Error::BufferTooSmall {
            needed: file_size,
            available: buffer.len(),
        });
    }

    check_extent(block_io, start_sector, record)?;
    read_extent(block_io, start_sector, record, &mut buffer[..file_size])?;
    Ok(file_size)
}

/// Read file into new Vec
///
/// The extent is checked against the device before anything is allocated.
pub fn read_file_vec<B: BlockIo>(
    block_io: &mut B,
    start_sector: u64,
    record: &DirectoryRecord,
) -> Result<Vec<u8>> {
    if record.size == 0 {
        return Ok(Vec::new());
    }

    check_extent(block_io, start_sector, record)?;
    let mut buffer = alloc::vec![0u8; record.size as usize];
    read_extent(block_io, start_sector, record, &mut buffer)?;
    Ok(buffer)
}

/// Fill `dst` (exactly `record.size` bytes) from an already-checked extent
fn read_extent<B: BlockIo>(
    block_io: &mut B,
    start_sector: u64,
    record: &DirectoryRecord,
    dst: &mut [u8],
) -> Result<()> {
    let start_lba = start_sector + u64::from(record.location);
    let whole = dst.len() - dst.len() % SECTOR_SIZE;
    if whole > 0 {
        read_sectors(block_io, start_lba, &mut dst[..whole])?;
    }

    // Partial last sector goes through a bounce buffer
    if whole < dst.len() {
        let mut sector = [0u8; SECTOR_SIZE];
        read_sectors(block_io, start_lba + (whole / SECTOR_SIZE) as u64, &mut sector)?;
        let tail = dst.len() - whole;
        dst[whole..].copy_from_slice(&sector[..tail]);
    }
    Ok(())
}
