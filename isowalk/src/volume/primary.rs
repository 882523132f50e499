//! Primary Volume Descriptor parsing
//!
//! The Primary Volume Descriptor (PVD) is always present and describes
//! the basic ISO9660 filesystem structure. Offsets below are relative to the
//! 2041-byte payload that follows the 7-byte descriptor header (subtract 7
//! from the ECMA-119 byte positions).

use crate::directory::record::DirectoryRecord;
use crate::error::FormatError;
use crate::types::{DESCRIPTOR_PAYLOAD_SIZE, SECTOR_SIZE};
use crate::utils::datetime::DateTime17;
use crate::utils::endian::{array_at, be_u32, le_u32, BothEndian16, BothEndian32};
use crate::utils::string::identifier_to_string;
use alloc::string::String;
use core::fmt;

const UNUSED1: usize = 0;
const SYSTEM_ID: usize = 1;
const VOLUME_ID: usize = 33;
const VOLUME_SPACE_SIZE: usize = 73;
const VOLUME_SET_SIZE: usize = 113;
const VOLUME_SEQUENCE_NUMBER: usize = 117;
const LOGICAL_BLOCK_SIZE: usize = 121;
const PATH_TABLE_SIZE: usize = 125;
const TYPE_L_PATH_TABLE: usize = 133;
const OPTIONAL_TYPE_L_PATH_TABLE: usize = 137;
const TYPE_M_PATH_TABLE: usize = 141;
const OPTIONAL_TYPE_M_PATH_TABLE: usize = 145;
const ROOT_DIRECTORY_RECORD: usize = 149;
const VOLUME_SET_ID: usize = 183;
const PUBLISHER_ID: usize = 311;
const DATA_PREPARER_ID: usize = 439;
const APPLICATION_ID: usize = 567;
const COPYRIGHT_FILE_ID: usize = 695;
const ABSTRACT_FILE_ID: usize = 732;
const BIBLIOGRAPHIC_FILE_ID: usize = 769;
const CREATION_TIME: usize = 806;
const MODIFICATION_TIME: usize = 823;
const EXPIRATION_TIME: usize = 840;
const EFFECTIVE_TIME: usize = 857;
const FILE_STRUCTURE_VERSION: usize = 874;
const RESERVED_AFTER_VERSION: usize = 875;

/// Decoded Primary Volume Descriptor (type 1)
///
/// See ECMA-119 8.4 for full specification
#[derive(Clone, PartialEq, Eq)]
pub struct PrimaryVolumeDescriptor {
    /// System identifier (32 a-characters)
    pub system_id: [u8; 32],

    /// Volume identifier (32 d-characters)
    pub volume_id: [u8; 32],

    /// Volume space size in sectors
    pub volume_space_size: u32,

    /// Volume set size (always 1)
    pub volume_set_size: u16,

    /// Volume sequence number (always 1)
    pub volume_sequence_number: u16,

    /// Logical block size (always 2048)
    pub logical_block_size: u16,

    /// Path table size in bytes
    pub path_table_size: u32,

    /// Type L path table location (32-bit LE)
    pub type_l_path_table: u32,

    /// Optional type L path table location (32-bit LE)
    pub optional_type_l_path_table: u32,

    /// Type M path table location (32-bit BE)
    pub type_m_path_table: u32,

    /// Optional type M path table location (32-bit BE)
    pub optional_type_m_path_table: u32,

    /// Root directory record
    pub root_directory_record: DirectoryRecord,

    /// Volume set identifier
    pub volume_set_id: [u8; 128],

    /// Publisher identifier
    pub publisher_id: [u8; 128],

    /// Data preparer identifier
    pub data_preparer_id: [u8; 128],

    /// Application identifier
    pub application_id: [u8; 128],

    /// Copyright file identifier
    pub copyright_file_id: [u8; 37],

    /// Abstract file identifier
    pub abstract_file_id: [u8; 37],

    /// Bibliographic file identifier
    pub bibliographic_file_id: [u8; 37],

    /// Volume creation date and time
    pub creation_time: [u8; 17],

    /// Volume modification date and time
    pub modification_time: [u8; 17],

    /// Volume expiration date and time
    pub expiration_time: [u8; 17],

    /// Volume effective date and time
    pub effective_time: [u8; 17],
}

impl PrimaryVolumeDescriptor {
    /// Parse and validate the payload of a descriptor typed PRIMARY
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        if data.len() != DESCRIPTOR_PAYLOAD_SIZE {
            return Err(FormatError::BadField {
                field: "primary volume descriptor length",
                expected: DESCRIPTOR_PAYLOAD_SIZE as u32,
                found: data.len() as u32,
            });
        }

        let volume_space_size = BothEndian32::read(data, VOLUME_SPACE_SIZE).get("number_of_sectors")?;
        let volume_set_size = BothEndian16::read(data, VOLUME_SET_SIZE).get("volume_set_size")?;
        let volume_sequence_number =
            BothEndian16::read(data, VOLUME_SEQUENCE_NUMBER).get("volume_sequence_number")?;
        let logical_block_size = BothEndian16::read(data, LOGICAL_BLOCK_SIZE).get("sector_size")?;
        let path_table_size = BothEndian32::read(data, PATH_TABLE_SIZE).get("path_table_length")?;

        expect_field("unused field", data[UNUSED1].into(), 0)?;
        expect_field("volume set size", volume_set_size.into(), 1)?;
        expect_field("volume sequence number", volume_sequence_number.into(), 1)?;
        expect_field("sector size", logical_block_size.into(), SECTOR_SIZE as u32)?;
        expect_field("file structure version", data[FILE_STRUCTURE_VERSION].into(), 1)?;
        expect_field("reserved byte after file structure version", data[RESERVED_AFTER_VERSION].into(), 0)?;

        let root_end = ROOT_DIRECTORY_RECORD + DirectoryRecord::MIN_LENGTH;
        let root_directory_record = DirectoryRecord::parse(&data[ROOT_DIRECTORY_RECORD..root_end])?;

        Ok(Self {
            system_id: array_at(data, SYSTEM_ID),
            volume_id: array_at(data, VOLUME_ID),
            volume_space_size,
            volume_set_size,
            volume_sequence_number,
            logical_block_size,
            path_table_size,
            type_l_path_table: le_u32(data, TYPE_L_PATH_TABLE),
            optional_type_l_path_table: le_u32(data, OPTIONAL_TYPE_L_PATH_TABLE),
            type_m_path_table: be_u32(data, TYPE_M_PATH_TABLE),
            optional_type_m_path_table: be_u32(data, OPTIONAL_TYPE_M_PATH_TABLE),
            root_directory_record,
            volume_set_id: array_at(data, VOLUME_SET_ID),
            publisher_id: array_at(data, PUBLISHER_ID),
            data_preparer_id: array_at(data, DATA_PREPARER_ID),
            application_id: array_at(data, APPLICATION_ID),
            copyright_file_id: array_at(data, COPYRIGHT_FILE_ID),
            abstract_file_id: array_at(data, ABSTRACT_FILE_ID),
            bibliographic_file_id: array_at(data, BIBLIOGRAPHIC_FILE_ID),
            creation_time: array_at(data, CREATION_TIME),
            modification_time: array_at(data, MODIFICATION_TIME),
            expiration_time: array_at(data, EXPIRATION_TIME),
            effective_time: array_at(data, EFFECTIVE_TIME),
        })
    }

    /// Root directory record, the starting point of every path lookup
    pub fn root(&self) -> &DirectoryRecord {
        &self.root_directory_record
    }

    /// System identifier, trailing spaces trimmed
    pub fn system_identifier(&self) -> String {
        identifier_to_string(&self.system_id)
    }

    /// Volume identifier (the disc label)
    pub fn volume_identifier(&self) -> String {
        identifier_to_string(&self.volume_id)
    }

    /// Volume set identifier
    pub fn volume_set_identifier(&self) -> String {
        identifier_to_string(&self.volume_set_id)
    }

    /// Publisher identifier
    pub fn publisher_identifier(&self) -> String {
        identifier_to_string(&self.publisher_id)
    }

    /// Data preparer identifier
    pub fn data_preparer_identifier(&self) -> String {
        identifier_to_string(&self.data_preparer_id)
    }

    /// Application identifier
    pub fn application_identifier(&self) -> String {
        identifier_to_string(&self.application_id)
    }

    /// Volume creation time, if recorded
    pub fn created(&self) -> Option<DateTime17> {
        DateTime17::from_bytes(&self.creation_time)
    }

    /// Volume modification time, if recorded
    pub fn modified(&self) -> Option<DateTime17> {
        DateTime17::from_bytes(&self.modification_time)
    }

    /// Volume expiration time, if recorded
    pub fn expires(&self) -> Option<DateTime17> {
        DateTime17::from_bytes(&self.expiration_time)
    }

    /// Volume effective time, if recorded
    pub fn effective(&self) -> Option<DateTime17> {
        DateTime17::from_bytes(&self.effective_time)
    }
}

impl fmt::Debug for PrimaryVolumeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimaryVolumeDescriptor")
            .field("volume_identifier", &self.volume_identifier())
            .field("data_preparer_identifier", &self.data_preparer_identifier())
            .field("created", &self.created())
            .field("volume_space_size", &self.volume_space_size)
            .field("root", &self.root_directory_record.location)
            .finish_non_exhaustive()
    }
}

fn expect_field(field: &'static str, found: u32, expected: u32) -> Result<(), FormatError> {
    if found != expected {
        return Err(FormatError::BadField { field, expected, found });
    }
    Ok(())
}
