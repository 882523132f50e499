//! Recording timestamps
//!
//! Directory records carry a packed binary form, volume descriptors an ASCII one.

use core::fmt;

/// Binary timestamp from a directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateTime7 {
    /// Years since 1900
    pub year: u8,

    /// Month (1-12)
    pub month: u8,

    /// Day (1-31)
    pub day: u8,

    /// Hour (0-23)
    pub hour: u8,

    /// Minute (0-59)
    pub minute: u8,

    /// Second (0-59)
    pub second: u8,

    /// GMT offset in 15-minute intervals (-48 to +52)
    pub gmt_offset: i8,
}

impl DateTime7 {
    /// Unpack the seven raw bytes
    pub fn from_bytes(bytes: &[u8; 7]) -> Self {
        Self {
            year: bytes[0],
            month: bytes[1],
            day: bytes[2],
            hour: bytes[3],
            minute: bytes[4],
            second: bytes[5],
            gmt_offset: bytes[6] as i8,
        }
    }

    /// Calendar year
    pub fn full_year(&self) -> u16 {
        1900 + self.year as u16
    }
}

impl fmt::Display for DateTime7 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.full_year(),
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second
        )
    }
}

/// Digit-string timestamp from a volume descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTime17 {
    /// Year, 1 to 9999
    pub year: u16,

    /// Month, 1 to 12
    pub month: u8,

    /// Day of month
    pub day: u8,

    /// Hour
    pub hour: u8,

    /// Minute
    pub minute: u8,

    /// Second
    pub second: u8,

    /// Hundredths of a second
    pub hundredths: u8,

    /// Offset from GMT in quarter hours
    pub gmt_offset: i8,
}

impl DateTime17 {
    /// Decode the 17 raw bytes
    ///
    /// Returns `None` for the "not specified" form (all digits `0`, offset 0)
    /// and for fields that are not decimal digits.
    pub fn from_bytes(bytes: &[u8; 17]) -> Option<Self> {
        if bytes[..16].iter().all(|&b| b == b'0' || b == 0) && bytes[16] == 0 {
            return None;
        }
        let digits = |range: core::ops::Range<usize>| -> Option<u16> {
            bytes[range].iter().try_fold(0u16, |acc, &b| {
                b.is_ascii_digit().then(|| acc * 10 + u16::from(b - b'0'))
            })
        };
        Some(Self {
            year: digits(0..4)?,
            month: digits(4..6)? as u8,
            day: digits(6..8)? as u8,
            hour: digits(8..10)? as u8,
            minute: digits(10..12)? as u8,
            second: digits(12..14)? as u8,
            hundredths: digits(14..16)? as u8,
            gmt_offset: bytes[16] as i8,
        })
    }
}

impl fmt::Display for DateTime17 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.hundredths
        )
    }
}
