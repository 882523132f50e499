//! ISO9660 Tree Walker
//!
//! A read-only ISO9660 reader built to pull boot configuration (for example
//! `/boot/grub/grub.cfg`) out of live CD images.
//!
//! # Overview
//!
//! ISO9660 is the standard filesystem for CD-ROMs and DVDs. This crate provides:
//! - Volume descriptor parsing with every both-endian field cross-checked
//! - Directory record decoding with exact record-size accounting
//! - Memoised path resolution that tolerates case and `;1` version suffixes
//! - Single-extent file extraction
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Volume layer** - Parses volume descriptors from sectors 16+
//! 2. **Directory layer** - Decodes directory records from extent bytes
//! 3. **File layer** - Reads file data from extents
//! 4. **Walker** - Resolves paths and caches the records it has seen
//!
//! The core is `no_std` + `alloc` over any [`gpt_disk_io::BlockIo`] with
//! 2048-byte blocks. The default `std` feature adds [`open`] for image files.
//!
//! # Usage
//!
//! ```ignore
//! use isowalk::TreeWalker;
//!
//! // Mount ISO from block device
//! let mut iso = TreeWalker::mount(block_io)?;
//!
//! // Read a file; case and version suffix need not match
//! let cfg = iso.read("/boot/grub/grub.cfg")?;
//!
//! // List a directory
//! for entry in iso.listdir("/casper")? {
//!     println!("{} {}", entry.name(), entry.is_directory());
//! }
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod directory;
pub mod error;
pub mod file;
pub mod types;
pub mod utils;
pub mod volume;
pub mod walker;

#[cfg(feature = "std")]
pub mod image;

pub use directory::DirectoryRecord;
pub use error::{FormatError, Iso9660Error, Result};
pub use types::{FileFlags, VolumeDescriptorType};
pub use volume::primary::PrimaryVolumeDescriptor;
pub use volume::{read_volume_descriptors, VolumeDescriptor, VolumeDescriptorSet};
pub use walker::TreeWalker;

#[cfg(feature = "std")]
pub use image::{open, ImageFile};
