//! Boot Record Volume Descriptor (El Torito)
//!
//! Points to the El Torito boot catalog which describes bootable images.

use crate::utils::endian::{array_at, le_u32};
use crate::utils::string::identifier_to_string;
use alloc::string::String;

const BOOT_SYSTEM_ID: usize = 0;
const BOOT_ID: usize = 32;
const BOOT_CATALOG_LBA: usize = 64;

/// Decoded Boot Record Volume Descriptor (type 0)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootRecord {
    /// Boot system identifier, "EL TORITO SPECIFICATION" for El Torito
    pub boot_system_id: [u8; 32],

    /// Boot identifier
    pub boot_id: [u8; 32],

    /// Absolute sector of the El Torito boot catalog
    pub catalog_lba: Option<u32>,
}

impl BootRecord {
    /// El Torito magic string
    pub const EL_TORITO_MAGIC: &'static [u8; 23] = b"EL TORITO SPECIFICATION";

    /// Decode the 2041-byte descriptor payload
    pub fn parse(data: &[u8]) -> Self {
        let boot_system_id: [u8; 32] = array_at(data, BOOT_SYSTEM_ID);
        let catalog_lba = boot_system_id
            .starts_with(Self::EL_TORITO_MAGIC)
            .then(|| le_u32(data, BOOT_CATALOG_LBA));
        Self {
            boot_system_id,
            boot_id: array_at(data, BOOT_ID),
            catalog_lba,
        }
    }

    /// Is this an El Torito boot record?
    pub fn is_el_torito(&self) -> bool {
        self.catalog_lba.is_some()
    }

    /// Boot system identifier with NUL/space padding removed
    pub fn boot_system(&self) -> String {
        let end = self.boot_system_id.iter().position(|&b| b == 0).unwrap_or(32);
        identifier_to_string(&self.boot_system_id[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_el_torito() {
        let mut data = vec![0u8; 2041];
        data[..23].copy_from_slice(BootRecord::EL_TORITO_MAGIC);
        data[64..68].copy_from_slice(&33u32.to_le_bytes());
        let record = BootRecord::parse(&data);
        assert!(record.is_el_torito());
        assert_eq!(record.catalog_lba, Some(33));
        assert_eq!(record.boot_system(), "EL TORITO SPECIFICATION");
    }

    #[test]
    fn test_other_boot_system() {
        let mut data = vec![0u8; 2041];
        data[..6].copy_from_slice(b"IBMPC ");
        data[64..68].copy_from_slice(&33u32.to_le_bytes());
        let record = BootRecord::parse(&data);
        assert_eq!(record.catalog_lba, None);
        assert_eq!(record.boot_system(), "IBMPC");
    }
}
