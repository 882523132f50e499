//! Directory iteration
//!
//! Walks the records packed into a directory extent. Iteration stops at the
//! first record whose length byte is zero or at the end of the extent,
//! whichever comes first.

use crate::directory::record::DirectoryRecord;
use crate::error::FormatError;
use core::iter::FusedIterator;

/// Iterator over the records of one directory extent
///
/// Clone before iterating to walk the same extent again.
#[derive(Debug, Clone)]
pub struct DirectoryIterator<'a> {
    data: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> DirectoryIterator<'a> {
    /// Create new directory iterator over raw extent bytes
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            done: false,
        }
    }

    /// Byte offset of the next record
    pub fn offset(&self) -> usize {
        self.offset
    }
}

impl Iterator for DirectoryIterator<'_> {
    type Item = Result<DirectoryRecord, FormatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.offset >= self.data.len() {
            return None;
        }

        let size = self.data[self.offset] as usize;
        if size == 0 {
            self.done = true;
            return None;
        }

        let end = self.offset + size;
        if end > self.data.len() {
            self.done = true;
            return Some(Err(FormatError::RecordOverrun {
                offset: self.offset,
                size,
                available: self.data.len(),
            }));
        }

        let record = DirectoryRecord::parse(&self.data[self.offset..end]);
        match record {
            Ok(_) => self.offset = end,
            Err(_) => self.done = true,
        }
        Some(record)
    }
}

impl FusedIterator for DirectoryIterator<'_> {}
