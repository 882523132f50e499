//! Common test utilities and mock block devices

pub mod builder;
#[allow(unused_imports)]
pub use builder::IsoBuilder;

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use std::io;

/// In-memory block device for testing
#[derive(Debug, Clone)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
    pub block_size: usize,
    /// Number of `read_blocks` calls served
    pub reads: usize,
    /// Reads starting at or past this LBA fail
    pub fail_from_lba: Option<u64>,
}

impl MemoryBlockDevice {
    /// Create a new memory block device from raw data
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            block_size: 2048, // ISO9660 sector size
            reads: 0,
            fail_from_lba: None,
        }
    }

    /// Same data presented with a different block size
    #[allow(dead_code)]
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Create from a file path
    #[allow(dead_code)]
    pub fn from_file(path: &str) -> io::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(data))
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_size as u32).expect("valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok(self.data.len().div_ceil(self.block_size) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.reads += 1;
        if self.fail_from_lba.is_some_and(|lba| start_lba.0 >= lba) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected read failure"));
        }
        let offset = start_lba.0 as usize * self.block_size;
        let blocks = self.data.len().div_ceil(self.block_size);
        if offset + dst.len() > blocks * self.block_size {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        // A trailing partial block reads back zero-filled
        let available = self.data.len().saturating_sub(offset).min(dst.len());
        dst[..available].copy_from_slice(&self.data[offset..offset + available]);
        dst[available..].fill(0);
        Ok(())
    }

    fn write_blocks(&mut self, start_lba: Lba, src: &[u8]) -> Result<(), Self::Error> {
        let offset = start_lba.0 as usize * self.block_size;
        if offset + src.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "write beyond end of device",
            ));
        }
        self.data[offset..offset + src.len()].copy_from_slice(src);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Image with `/BOOT/GRUB.CFG;1` containing `hello`
#[allow(dead_code)]
pub fn boot_image() -> MemoryBlockDevice {
    let mut builder = IsoBuilder::new();
    builder.add_file("/BOOT/GRUB.CFG;1", b"hello");
    builder.build()
}
