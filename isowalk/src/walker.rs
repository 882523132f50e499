//! Path resolution over a mounted image
//!
//! A [`TreeWalker`] owns the image source and a cache from absolute path to
//! directory record, seeded with the root at `/`. Resolving `/a/b` resolves
//! the parent `/a` first, lists it once, caches every child under
//! `<resolved parent>/<name>` and only then matches the request. The cache
//! only ever grows.
//!
//! Candidates are spelled from the whole requested path, in order: as
//! given, upper-cased, and (when the last component carries no `;N`
//! version) both of those with `;1` appended. The first candidate present
//! in the cache wins. A request like `/boot/grub.cfg` therefore matches
//! `/BOOT/GRUB.CFG;1` but never a mixed-case `/BOOT/grub.cfg`.

use crate::directory::{parse_directory, DirectoryRecord};
use crate::error::{FormatError, Iso9660Error, Result};
use crate::file::read_file_vec;
use crate::types::VERSION_SUFFIX;
use crate::utils::sector::check_block_size;
use crate::utils::string::has_version;
use crate::volume::primary::PrimaryVolumeDescriptor;
use crate::volume::{read_volume_descriptors, VolumeDescriptorSet};
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use gpt_disk_io::BlockIo;

/// Live session over one image
pub struct TreeWalker<B: BlockIo> {
    block_io: B,
    start_sector: u64,
    descriptors: VolumeDescriptorSet,
    cache: BTreeMap<String, DirectoryRecord>,
    listed: BTreeSet<String>,
}

impl<B: BlockIo> TreeWalker<B> {
    /// Mount an ISO9660 volume occupying the whole device
    pub fn mount(block_io: B) -> Result<Self> {
        Self::mount_at(block_io, 0)
    }

    /// Mount an ISO9660 volume starting `start_sector` sectors into the device
    ///
    /// Reads the volume descriptors up to the terminator and seeds the path
    /// cache with the root directory record.
    pub fn mount_at(mut block_io: B, start_sector: u64) -> Result<Self> {
        check_block_size(&block_io)?;
        let descriptors = read_volume_descriptors(&mut block_io, start_sector)?;

        let mut cache = BTreeMap::new();
        cache.insert(String::from("/"), descriptors.primary().root().clone());

        Ok(Self {
            block_io,
            start_sector,
            descriptors,
            cache,
            listed: BTreeSet::new(),
        })
    }

    /// Primary Volume Descriptor of the mounted volume
    pub fn primary(&self) -> &PrimaryVolumeDescriptor {
        self.descriptors.primary()
    }

    /// All volume descriptors read at mount time
    pub fn descriptors(&self) -> &VolumeDescriptorSet {
        &self.descriptors
    }

    /// Underlying image source
    pub fn block_io(&self) -> &B {
        &self.block_io
    }

    /// Release the image source
    pub fn into_inner(self) -> B {
        self.block_io
    }

    /// Resolve `path` to the cache key of the record it names
    ///
    /// The returned path carries the on-disc spelling of every component,
    /// e.g. `/boot/grub.cfg` may resolve to `/BOOT/GRUB.CFG;1`.
    pub fn lookup(&mut self, path: &str) -> Result<String> {
        self.resolve(&normalize(path)).map_err(|err| match err {
            Iso9660Error::NotFound(_) => Iso9660Error::NotFound(path.to_string()),
            err => err,
        })
    }

    /// Directory record for `path`
    pub fn get(&mut self, path: &str) -> Result<&DirectoryRecord> {
        let resolved = self.lookup(path)?;
        self.cache
            .get(&resolved)
            .ok_or_else(|| Iso9660Error::NotFound(path.to_string()))
    }

    /// Records of the directory at `path`, including `.` and `..`
    pub fn listdir(&mut self, path: &str) -> Result<Vec<DirectoryRecord>> {
        let record = self.get(path)?.clone();
        if !record.is_directory() {
            return Err(Iso9660Error::NotADirectory(path.to_string()));
        }
        self.read_directory(&record)
    }

    /// Contents of the regular file at `path`
    pub fn read(&mut self, path: &str) -> Result<Vec<u8>> {
        let record = self.get(path)?.clone();
        if record.is_directory() {
            return Err(Iso9660Error::IsADirectory(path.to_string()));
        }
        if record.has_extents() {
            return Err(Iso9660Error::MultipleExtents(path.to_string()));
        }
        read_file_vec(&mut self.block_io, self.start_sector, &record)
    }

    /// Resolve a normalised path, listing its parent first if needed
    fn resolve(&mut self, path: &str) -> Result<String> {
        if self.cache.contains_key(path) {
            log::trace!("cache hit for {}", path);
            return Ok(path.to_string());
        }

        let parent = self.resolve(parent_of(path))?;
        self.populate(&parent)?;

        for candidate in candidates(path) {
            if self.cache.contains_key(&candidate) {
                log::trace!("{} resolved as {}", path, candidate);
                return Ok(candidate);
            }
        }

        log::debug!("{} not found in {}", path, parent);
        Err(Iso9660Error::NotFound(path.to_string()))
    }

    /// List `parent` once and cache each child under `parent/<name>`
    fn populate(&mut self, parent: &str) -> Result<()> {
        if self.listed.contains(parent) {
            return Ok(());
        }

        let record = match self.cache.get(parent) {
            Some(record) => record.clone(),
            None => return Err(Iso9660Error::NotFound(parent.to_string())),
        };
        if !record.is_directory() {
            return Err(Iso9660Error::NotADirectory(parent.to_string()));
        }

        for entry in self.read_directory(&record)? {
            let key = join(parent, &entry.name());
            // First record wins when a name repeats
            self.cache.entry(key).or_insert(entry);
        }
        self.listed.insert(parent.to_string());
        Ok(())
    }

    /// Read a directory extent and decode all of its records
    fn read_directory(&mut self, record: &DirectoryRecord) -> Result<Vec<DirectoryRecord>> {
        let data = read_file_vec(&mut self.block_io, self.start_sector, record)?;
        let entries = parse_directory(&data)
            .collect::<core::result::Result<Vec<_>, FormatError>>()?;
        log::debug!(
            "directory at sector {}: {} records in {} bytes",
            record.location,
            entries.len(),
            data.len()
        );
        Ok(entries)
    }
}

/// Absolute POSIX form: leading `/`, no empty or `.` components
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for component in path.split('/').filter(|c| !c.is_empty() && *c != ".") {
        out.push('/');
        out.push_str(component);
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}

fn join(parent: &str, name: &str) -> String {
    if parent == "/" {
        alloc::format!("/{}", name)
    } else {
        alloc::format!("{}/{}", parent, name)
    }
}

/// Parent of a normalised path; the root is its own parent
fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) | None => "/",
        Some(idx) => &path[..idx],
    }
}

/// Spellings to try for a whole path, in precedence order
fn candidates(path: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(4);
    out.push(path.to_string());
    out.push(path.to_uppercase());
    let name = &path[path.rfind('/').map_or(0, |idx| idx + 1)..];
    if !has_version(name) {
        let versioned = alloc::format!("{}{}", path, VERSION_SUFFIX);
        let upper = versioned.to_uppercase();
        out.push(versioned);
        out.push(upper);
    }
    out
}
