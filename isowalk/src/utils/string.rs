//! String handling utilities
//!
//! ISO9660 identifiers are space-padded a-/d-characters; file identifiers
//! carry a `;N` version suffix.

use alloc::borrow::Cow;
use alloc::string::String;

/// Trim trailing spaces from byte slice
pub fn trim_trailing_spaces(bytes: &[u8]) -> &[u8] {
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        end -= 1;
    }
    &bytes[..end]
}

/// Decode a space-padded identifier field, replacing non-ASCII bytes
pub fn identifier_to_string(bytes: &[u8]) -> String {
    ascii_lossy(trim_trailing_spaces(bytes)).into_owned()
}

/// Decode ASCII, substituting U+FFFD for anything outside 0..=0x7F
pub fn ascii_lossy(bytes: &[u8]) -> Cow<'_, str> {
    if bytes.is_ascii() {
        // ASCII is valid UTF-8
        return Cow::Borrowed(core::str::from_utf8(bytes).unwrap_or_default());
    }
    Cow::Owned(
        bytes
            .iter()
            .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
            .collect(),
    )
}

/// Whether the final path component already names a version (`FILE;1`)
pub fn has_version(name: &str) -> bool {
    name.contains(';')
}

/// Strip version suffix from filename (e.g., "FILE.TXT;1" -> "FILE.TXT")
/// Also removes trailing dot if present (e.g., "FILE.;1" -> "FILE")
pub fn strip_version(name: &str) -> &str {
    let base = name.split(';').next().unwrap_or(name);
    if let Some(stripped) = base.strip_suffix('.') {
        stripped
    } else {
        base
    }
}
