//! Common types and constants for ISO9660

/// ISO9660 sector size (always 2048 bytes)
pub const SECTOR_SIZE: usize = 2048;

/// Bytes reserved ahead of the volume descriptors (hybrid boot images live here)
pub const SYSTEM_AREA_SIZE: usize = 32768;

/// Volume descriptor set starts at sector 16
pub const VOLUME_DESCRIPTOR_START: u64 = (SYSTEM_AREA_SIZE / SECTOR_SIZE) as u64;

/// Standard identifier carried by every volume descriptor
pub const STANDARD_IDENTIFIER: &[u8; 5] = b"CD001";

/// Only defined volume descriptor version
pub const DESCRIPTOR_VERSION: u8 = 1;

/// Payload bytes following the 7-byte descriptor header
pub const DESCRIPTOR_PAYLOAD_SIZE: usize = SECTOR_SIZE - 7;

/// File version suffix appended by mastering tools
pub const VERSION_SUFFIX: &str = ";1";

/// Volume descriptor type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VolumeDescriptorType {
    /// Boot Record (El Torito)
    BootRecord,
    /// Primary Volume Descriptor
    Primary,
    /// Supplementary Volume Descriptor (Joliet)
    Supplementary,
    /// Volume Partition Descriptor
    Partition,
    /// Volume Descriptor Set Terminator
    Terminator,
    /// Codes 4..=254, reserved by ECMA-119
    Reserved(u8),
}

impl VolumeDescriptorType {
    /// Decode the type byte at offset 0 of a descriptor
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Self::BootRecord,
            1 => Self::Primary,
            2 => Self::Supplementary,
            3 => Self::Partition,
            255 => Self::Terminator,
            other => Self::Reserved(other),
        }
    }

    /// Raw type byte
    pub fn code(self) -> u8 {
        match self {
            Self::BootRecord => 0,
            Self::Primary => 1,
            Self::Supplementary => 2,
            Self::Partition => 3,
            Self::Terminator => 255,
            Self::Reserved(code) => code,
        }
    }
}

/// File flags from directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileFlags {
    /// Hidden file
    pub hidden: bool,

    /// Directory (not a file)
    pub directory: bool,

    /// Associated file
    pub associated: bool,

    /// Extended attribute record format
    pub extended_format: bool,

    /// Owner/group permissions in extended attributes
    pub extended_permissions: bool,

    /// Not final directory record for this file
    pub not_final: bool,
}
