//! Directory Record structure
//!
//! Directory records describe files and subdirectories. Each record is a
//! 33-byte fixed prefix, the file identifier, one pad byte when the
//! identifier length is even, and a system use area filling the rest of the
//! declared record length.

use crate::error::FormatError;
use crate::types::FileFlags;
use crate::utils::datetime::DateTime7;
use crate::utils::endian::{array_at, BothEndian16, BothEndian32};
use crate::utils::string;
use alloc::borrow::Cow;
use alloc::vec::Vec;

/// Decoded directory record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Length of directory record (BP 1)
    pub record_size: u8,

    /// Extended attribute record length (BP 2), always 0 once decoded
    pub extended_attr_length: u8,

    /// Extent location (BP 3-10)
    pub location: u32,

    /// Data length (BP 11-18)
    pub size: u32,

    /// Recording date and time (BP 19-25)
    pub recorded_at: DateTime7,

    /// File flags (BP 26)
    pub flags: FileFlags,

    /// File unit size (interleaved files) (BP 27)
    pub file_unit_size: u8,

    /// Interleave gap size (BP 28)
    pub interleave_gap: u8,

    /// Volume sequence number (BP 29-32)
    pub volume_sequence: u16,

    /// File identifier bytes
    pub identifier: Vec<u8>,

    /// Whether a pad byte follows the identifier
    pub padded: bool,

    /// System use area
    pub system_use: Vec<u8>,
}

impl DirectoryRecord {
    /// Length of the fixed prefix, up to and including the identifier length
    pub const FIXED_LENGTH: usize = 33;

    /// Length of a record whose identifier is a single byte (root, `.`, `..`)
    pub const MIN_LENGTH: usize = 34;

    /// Identifier of a directory's own entry
    pub const SELF_ID: u8 = 0x00;

    /// Identifier of a directory's parent entry
    pub const PARENT_ID: u8 = 0x01;

    /// Parse exactly one directory record
    ///
    /// `data` must span the whole record: its length has to equal the
    /// declared record size.
    pub fn parse(data: &[u8]) -> Result<Self, FormatError> {
        if data.len() < Self::FIXED_LENGTH {
            return Err(FormatError::RecordTooShort { len: data.len() });
        }

        let record_size = data[0];
        if record_size as usize != data.len() {
            return Err(FormatError::RecordSizeMismatch {
                declared: record_size as usize,
                actual: data.len(),
            });
        }

        let extended_attr_length = data[1];
        if extended_attr_length != 0 {
            return Err(FormatError::BadField {
                field: "extended attribute record size",
                expected: 0,
                found: extended_attr_length.into(),
            });
        }

        let location = BothEndian32::read(data, 2).get("first_sector")?;
        let size = BothEndian32::read(data, 10).get("file_size")?;
        let recorded_at = DateTime7::from_bytes(&array_at(data, 18));
        let flags = FileFlags::from_byte(data[25]);
        let file_unit_size = data[26];
        let interleave_gap = data[27];
        let volume_sequence = BothEndian16::read(data, 28).get("volume_sequence_number")?;

        let identifier_len = data[32] as usize;
        let padded = identifier_len % 2 == 0;
        let name_end = Self::FIXED_LENGTH + identifier_len;
        let system_use_start = name_end + usize::from(padded);
        if system_use_start > data.len() {
            return Err(FormatError::RecordSizeMismatch {
                declared: data.len(),
                actual: system_use_start,
            });
        }

        Ok(Self {
            record_size,
            extended_attr_length,
            location,
            size,
            recorded_at,
            flags,
            file_unit_size,
            interleave_gap,
            volume_sequence,
            identifier: data[Self::FIXED_LENGTH..name_end].to_vec(),
            padded,
            system_use: data[system_use_start..].to_vec(),
        })
    }

    /// Bytes this record occupies when laid out on disk
    pub fn encoded_len(&self) -> usize {
        Self::FIXED_LENGTH + self.identifier.len() + usize::from(self.padded) + self.system_use.len()
    }

    /// Display name: `.` and `..` for the special identifiers, otherwise the
    /// identifier as ASCII (version suffix included)
    pub fn name(&self) -> Cow<'_, str> {
        match self.identifier.as_slice() {
            [Self::SELF_ID] => Cow::Borrowed("."),
            [Self::PARENT_ID] => Cow::Borrowed(".."),
            id => string::ascii_lossy(id),
        }
    }

    /// Name without the `;N` version suffix or a trailing dot
    pub fn base_name(&self) -> Cow<'_, str> {
        match self.name() {
            Cow::Borrowed(name) => Cow::Borrowed(string::strip_version(name)),
            Cow::Owned(name) => Cow::Owned(string::strip_version(&name).into()),
        }
    }

    /// Is this the `.` or `..` entry?
    pub fn is_special(&self) -> bool {
        matches!(self.identifier.as_slice(), [Self::SELF_ID] | [Self::PARENT_ID])
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.flags.directory
    }

    /// Is this hidden?
    pub fn is_hidden(&self) -> bool {
        self.flags.hidden
    }

    /// Does the file continue in another record?
    pub fn has_extents(&self) -> bool {
        self.flags.not_final
    }
}
