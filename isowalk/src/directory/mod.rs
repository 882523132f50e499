//! Directory record parsing and iteration

pub mod flags;
pub mod iterator;
pub mod record;

pub use iterator::DirectoryIterator;
pub use record::DirectoryRecord;

/// Decode the records of a directory extent lazily
///
/// Includes the `.` and `..` entries. Re-calling this on the same bytes
/// yields the same sequence.
pub fn parse_directory(data: &[u8]) -> DirectoryIterator<'_> {
    DirectoryIterator::new(data)
}
