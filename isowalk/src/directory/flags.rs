//! File flags parsing

use crate::types::FileFlags;

impl FileFlags {
    /// Hidden from directory listings by convention
    pub const HIDDEN: u8 = 0x01;
    /// Entry is a directory
    pub const DIRECTORY: u8 = 0x02;
    /// Associated file
    pub const ASSOCIATED: u8 = 0x04;
    /// Record format given in the extended attribute record
    pub const RECORD_FORMAT: u8 = 0x08;
    /// Permissions given in the extended attribute record
    pub const PERMISSIONS: u8 = 0x10;
    /// Further records for this file follow
    pub const NOT_FINAL: u8 = 0x80;

    /// Parse from raw byte
    pub fn from_byte(byte: u8) -> Self {
        Self {
            hidden: byte & Self::HIDDEN != 0,
            directory: byte & Self::DIRECTORY != 0,
            associated: byte & Self::ASSOCIATED != 0,
            extended_format: byte & Self::RECORD_FORMAT != 0,
            extended_permissions: byte & Self::PERMISSIONS != 0,
            not_final: byte & Self::NOT_FINAL != 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_bits() {
        let flags = FileFlags::from_byte(0x82);
        assert!(flags.directory);
        assert!(flags.not_final);
        assert!(!flags.hidden);
        assert!(!flags.associated);
    }

    #[test]
    fn test_reserved_bits_dropped() {
        // Bits 5 and 6 are reserved
        assert_eq!(FileFlags::from_byte(0x60), FileFlags::default());
    }
}
