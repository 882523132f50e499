//! File-backed image source
//!
//! Opens an `.iso` file read-only and exposes it through [`BlockIo`] so the
//! rest of the crate stays agnostic of where sectors come from.

use crate::error::{Iso9660Error, Result};
use crate::types::SECTOR_SIZE;
use crate::utils::sector::sector_to_byte;
use crate::walker::TreeWalker;
use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// ISO image file accessed in 2048-byte sectors
///
/// A trailing partial sector counts as a block; the bytes missing from it
/// read as zero.
#[derive(Debug)]
pub struct ImageFile {
    file: File,
    block_size: BlockSize,
    len: u64,
}

impl ImageFile {
    /// Open the image at `path` for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file(File::open(path)?)
    }

    /// Wrap an already-open file
    pub fn from_file(file: File) -> Result<Self> {
        let len = file.metadata()?.len();
        let block_size = BlockSize::new(SECTOR_SIZE as u32)
            .ok_or(Iso9660Error::UnsupportedBlockSize(SECTOR_SIZE as u64))?;
        Ok(Self { file, block_size, len })
    }

    /// Image length in bytes
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Is the image file empty?
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl BlockIo for ImageFile {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        self.block_size
    }

    fn num_blocks(&mut self) -> core::result::Result<u64, Self::Error> {
        Ok(self.len.div_ceil(SECTOR_SIZE as u64))
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> core::result::Result<(), Self::Error> {
        let offset = sector_to_byte(start_lba.0);
        let end = offset + dst.len() as u64;
        if end > sector_to_byte(self.num_blocks()?) {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of image",
            ));
        }

        let available = self.len.saturating_sub(offset).min(dst.len() as u64) as usize;
        self.file.seek(SeekFrom::Start(offset))?;
        self.file.read_exact(&mut dst[..available])?;
        dst[available..].fill(0);
        Ok(())
    }

    fn write_blocks(&mut self, _start_lba: Lba, _src: &[u8]) -> core::result::Result<(), Self::Error> {
        Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "ISO images are opened read-only",
        ))
    }

    fn flush(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }
}

/// Open the ISO image at `path` and mount it
///
/// The file is closed when the returned walker is dropped, and on every
/// error path before that.
///
/// ```no_run
/// let mut iso = isowalk::open("ubuntu-24.04-desktop-amd64.iso")?;
/// let grub_cfg = iso.read("/boot/grub/grub.cfg")?;
/// for entry in iso.listdir("/casper")? {
///     println!("{}{}", entry.name(), if entry.is_directory() { "/" } else { "" });
/// }
/// # Ok::<(), isowalk::Iso9660Error>(())
/// ```
pub fn open<P: AsRef<Path>>(path: P) -> Result<TreeWalker<ImageFile>> {
    TreeWalker::mount(ImageFile::open(path)?)
}
