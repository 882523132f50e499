//! Volume descriptor parsing
//!
//! ISO9660 volume descriptors start at sector 16, right after the 32 KiB
//! system area, and run until a Volume Descriptor Set Terminator.

pub mod boot_record;
pub mod primary;

use crate::error::{FormatError, Result};
use crate::types::{
    VolumeDescriptorType, DESCRIPTOR_VERSION, SECTOR_SIZE, STANDARD_IDENTIFIER,
    VOLUME_DESCRIPTOR_START,
};
use crate::utils::endian::array_at;
use crate::utils::sector::{device_sectors, read_sectors};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use boot_record::BootRecord;
use gpt_disk_io::BlockIo;
use primary::PrimaryVolumeDescriptor;

/// One raw 2048-byte volume descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeDescriptor {
    /// Type code (0=boot, 1=primary, 2=supplementary, 255=terminator)
    pub kind: VolumeDescriptorType,

    /// Standard identifier "CD001"
    pub identifier: [u8; 5],

    /// Version (always 1)
    pub version: u8,

    /// Type-specific payload (2041 bytes)
    pub data: Vec<u8>,
}

impl VolumeDescriptor {
    /// Decode and validate the header of the descriptor read from `sector`
    pub fn parse(sector: u64, block: &[u8; SECTOR_SIZE]) -> core::result::Result<Self, FormatError> {
        let kind = VolumeDescriptorType::from_code(block[0]);
        let identifier: [u8; 5] = array_at(block, 1);
        let version = block[6];

        if &identifier != STANDARD_IDENTIFIER {
            return Err(FormatError::BadIdentifier { sector, found: identifier });
        }
        if version != DESCRIPTOR_VERSION {
            return Err(FormatError::BadVersion { sector, found: version });
        }

        Ok(Self {
            kind,
            identifier,
            version,
            data: block[7..].to_vec(),
        })
    }
}

/// Every descriptor seen before the terminator, keyed by type
///
/// Later descriptors of the same type replace earlier ones.
#[derive(Debug, Clone)]
pub struct VolumeDescriptorSet {
    descriptors: BTreeMap<VolumeDescriptorType, VolumeDescriptor>,
    primary: PrimaryVolumeDescriptor,
}

impl VolumeDescriptorSet {
    /// The decoded Primary Volume Descriptor
    pub fn primary(&self) -> &PrimaryVolumeDescriptor {
        &self.primary
    }

    /// Raw descriptor of the given type, if one was present
    pub fn get(&self, kind: VolumeDescriptorType) -> Option<&VolumeDescriptor> {
        self.descriptors.get(&kind)
    }

    /// Decoded boot record, if the image carries one
    pub fn boot_record(&self) -> Option<BootRecord> {
        self.get(VolumeDescriptorType::BootRecord)
            .map(|d| BootRecord::parse(&d.data))
    }

    /// Descriptors in type-code order
    pub fn iter(&self) -> impl Iterator<Item = &VolumeDescriptor> {
        self.descriptors.values()
    }
}

/// Read volume descriptors until the terminator
///
/// # Arguments
/// * `block_io` - Block device containing the ISO
/// * `start_sector` - Starting sector of the ISO (0 if raw ISO)
///
/// # Returns
/// The descriptor set; fails if no Primary Volume Descriptor precedes the
/// terminator or the image ends first.
pub fn read_volume_descriptors<B: BlockIo>(
    block_io: &mut B,
    start_sector: u64,
) -> Result<VolumeDescriptorSet> {
    let available = device_sectors(block_io)?;
    let mut buffer = [0u8; SECTOR_SIZE];
    let mut descriptors = BTreeMap::new();
    let mut primary = None;

    let mut sector = start_sector + VOLUME_DESCRIPTOR_START;
    loop {
        if sector >= available {
            return Err(FormatError::TruncatedVolumeDescriptor { sector }.into());
        }
        read_sectors(block_io, sector, &mut buffer)?;

        let descriptor = VolumeDescriptor::parse(sector, &buffer)?;
        log::debug!("volume descriptor {:?} at sector {}", descriptor.kind, sector);

        match descriptor.kind {
            VolumeDescriptorType::Terminator => break,
            VolumeDescriptorType::Primary => {
                primary = Some(PrimaryVolumeDescriptor::parse(&descriptor.data)?);
            }
            VolumeDescriptorType::Reserved(_) => {
                log::warn!(
                    "skipping reserved volume descriptor type {} at sector {}",
                    descriptor.kind.code(),
                    sector
                );
            }
            _ => {}
        }
        descriptors.insert(descriptor.kind, descriptor);
        sector += 1;
    }

    let primary = primary.ok_or(FormatError::MissingPrimary)?;
    Ok(VolumeDescriptorSet { descriptors, primary })
}
