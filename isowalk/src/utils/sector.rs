//! Sector offsets and device access

use crate::error::{Iso9660Error, Result};
use crate::types::SECTOR_SIZE;
use alloc::string::ToString;
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// Convert sector number to byte offset
pub fn sector_to_byte(sector: u64) -> u64 {
    sector * SECTOR_SIZE as u64
}

/// Read whole sectors starting at `lba`; `dst` must be a multiple of 2048 bytes
pub fn read_sectors<B: BlockIo>(block_io: &mut B, lba: u64, dst: &mut [u8]) -> Result<()> {
    block_io
        .read_blocks(Lba(lba), dst)
        .map_err(|e| Iso9660Error::Io(e.to_string()))
}

/// Number of addressable sectors on the device
pub fn device_sectors<B: BlockIo>(block_io: &mut B) -> Result<u64> {
    block_io
        .num_blocks()
        .map_err(|e| Iso9660Error::Io(e.to_string()))
}

/// Reject devices whose block size is not the ISO9660 sector size
pub fn check_block_size<B: BlockIo>(block_io: &B) -> Result<()> {
    let block_size = u64::from(block_io.block_size().to_u32());
    if block_size != SECTOR_SIZE as u64 {
        return Err(Iso9660Error::UnsupportedBlockSize(block_size));
    }
    Ok(())
}
