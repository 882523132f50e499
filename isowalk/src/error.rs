//! Error types for ISO9660 operations

use alloc::string::String;
use core::fmt;

/// Result type for ISO9660 operations
pub type Result<T> = core::result::Result<T, Iso9660Error>;

/// Errors that can occur during ISO9660 operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Iso9660Error {
    /// I/O error reading from the image source
    Io(String),

    /// Image source does not use 2048-byte blocks
    UnsupportedBlockSize(u64),

    /// Image violates an on-disk invariant
    Format(FormatError),

    /// File or directory not found
    NotFound(String),

    /// Listing something that is not a directory
    NotADirectory(String),

    /// Reading something that is a directory
    IsADirectory(String),

    /// File is split across several directory records
    MultipleExtents(String),

    /// Caller's buffer cannot hold the file
    BufferTooSmall {
        /// File size in bytes
        needed: usize,
        /// Buffer length in bytes
        available: usize,
    },
}

/// Structural violations found while decoding an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Volume descriptor sector lies past the end of the image
    TruncatedVolumeDescriptor {
        /// Sector that could not be read
        sector: u64,
    },

    /// Standard identifier is not `CD001`
    BadIdentifier {
        /// Offending sector
        sector: u64,
        /// Bytes found instead
        found: [u8; 5],
    },

    /// Descriptor version is not 1
    BadVersion {
        /// Offending sector
        sector: u64,
        /// Version found instead
        found: u8,
    },

    /// Terminator reached without a primary volume descriptor
    MissingPrimary,

    /// Little- and big-endian copies of a field disagree
    ByteOrderMismatch {
        /// Field name
        field: &'static str,
        /// Value decoded from the little-endian copy
        little: u32,
        /// Value decoded from the big-endian copy
        big: u32,
    },

    /// Fixed-value field holds something else
    BadField {
        /// Field name
        field: &'static str,
        /// Required value
        expected: u32,
        /// Value found
        found: u32,
    },

    /// Fewer bytes than the fixed directory record prefix
    RecordTooShort {
        /// Bytes available
        len: usize,
    },

    /// Declared record size disagrees with the bytes it spans
    RecordSizeMismatch {
        /// Size from the record's first byte
        declared: usize,
        /// Bytes actually consumed
        actual: usize,
    },

    /// Directory record runs past the end of its directory extent
    RecordOverrun {
        /// Offset of the record within the extent
        offset: usize,
        /// Declared record size
        size: usize,
        /// Extent length
        available: usize,
    },

    /// Extent lies past the end of the image
    FileTruncated {
        /// First sector of the extent
        location: u32,
        /// Extent length in bytes
        size: u32,
    },
}

impl fmt::Display for Iso9660Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "I/O error reading image: {}", msg),
            Self::UnsupportedBlockSize(size) => {
                write!(f, "unsupported block size: {} (expected 2048)", size)
            }
            Self::Format(err) => write!(f, "{}", err),
            Self::NotFound(path) => write!(f, "no such file or directory: {}", path),
            Self::NotADirectory(path) => write!(f, "not a directory: {}", path),
            Self::IsADirectory(path) => write!(f, "not a regular file: {}", path),
            Self::MultipleExtents(path) => {
                write!(f, "{} has multiple extents which is not supported", path)
            }
            Self::BufferTooSmall { needed, available } => {
                write!(f, "buffer of {} bytes too small for {} byte file", available, needed)
            }
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TruncatedVolumeDescriptor { sector } => {
                write!(f, "truncated volume descriptor at sector {}", sector)
            }
            Self::BadIdentifier { sector, found } => write!(
                f,
                "bad volume descriptor identifier at sector {}: \"{}\"",
                sector,
                found.escape_ascii()
            ),
            Self::BadVersion { sector, found } => {
                write!(f, "bad volume descriptor version at sector {}: {}", sector, found)
            }
            Self::MissingPrimary => write!(f, "primary volume descriptor not found"),
            Self::ByteOrderMismatch { field, little, big } => {
                write!(f, "{} mismatch: {} != {}", field, little, big)
            }
            Self::BadField { field, expected, found } => {
                write!(f, "bad {}: {} (expected {})", field, found, expected)
            }
            Self::RecordTooShort { len } => {
                write!(f, "directory record too short: {} bytes", len)
            }
            Self::RecordSizeMismatch { declared, actual } => {
                write!(f, "directory record size mismatch: {} != {}", declared, actual)
            }
            Self::RecordOverrun { offset, size, available } => write!(
                f,
                "directory record at offset {} ({} bytes) overruns extent of {} bytes",
                offset, size, available
            ),
            Self::FileTruncated { location, size } => {
                write!(f, "file truncated: {} bytes at sector {}", size, location)
            }
        }
    }
}

impl From<FormatError> for Iso9660Error {
    fn from(err: FormatError) -> Self {
        Self::Format(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Iso9660Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormatError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for Iso9660Error {
    fn from(err: std::io::Error) -> Self {
        use alloc::string::ToString;
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_mismatch_message_names_both_values() {
        let err = Iso9660Error::from(FormatError::ByteOrderMismatch {
            field: "sector_size",
            little: 2048,
            big: 8,
        });
        assert_eq!(err.to_string(), "sector_size mismatch: 2048 != 8");
    }

    #[test]
    fn test_identifier_message_escapes_bytes() {
        let err = FormatError::BadIdentifier { sector: 17, found: *b"CD\x0001" };
        assert_eq!(
            err.to_string(),
            "bad volume descriptor identifier at sector 17: \"CD\\x0001\""
        );
    }
}
