//! Fixed-width ASCII header fields.
//!
//! Every field of a member header is left-justified and padded on the right,
//! normally with spaces. The helpers here are pure functions over byte
//! slices so they can be tested without any I/O.

/// Width of the name field.
pub const NAME_WIDTH: usize = 16;

/// A fixed-width field inside the 60-byte member header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Field name, used in error messages.
    pub name: &'static str,
    /// Offset from the start of the header.
    pub offset: usize,
    /// Width in bytes.
    pub width: usize,
}

impl Field {
    /// Returns the byte range of this field within a header.
    #[inline]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.width
    }
}

/// Member name, optionally ending in a GNU `/`.
pub const NAME: Field = Field {
    name: "name",
    offset: 0,
    width: NAME_WIDTH,
};
/// Modification time in decimal seconds since the epoch.
pub const DATE: Field = Field {
    name: "date",
    offset: 16,
    width: 12,
};
/// Owner id in decimal.
pub const UID: Field = Field {
    name: "uid",
    offset: 28,
    width: 6,
};
/// Group id in decimal.
pub const GID: Field = Field {
    name: "gid",
    offset: 34,
    width: 6,
};
/// File mode in octal.
pub const MODE: Field = Field {
    name: "mode",
    offset: 40,
    width: 8,
};
/// Payload size in decimal bytes.
pub const SIZE: Field = Field {
    name: "size",
    offset: 48,
    width: 10,
};
/// Header terminator, always `` "`\n" ``.
pub const END: Field = Field {
    name: "terminator",
    offset: 58,
    width: 2,
};

/// Left-justifies `value` in a field of `width` bytes, filling the rest
/// with `fill`.
///
/// Returns `None` if `value` is longer than `width`; values are never
/// truncated.
///
/// ```
/// use debpatch::format::field::pad;
///
/// assert_eq!(pad(b"4", 10, b' ').unwrap(), b"4         ");
/// assert_eq!(pad(b"abc", 5, b'_').unwrap(), b"abc__");
/// assert!(pad(b"toolong", 3, b' ').is_none());
/// ```
pub fn pad(value: &[u8], width: usize, fill: u8) -> Option<Vec<u8>> {
    if value.len() > width {
        return None;
    }
    let mut out = Vec::with_capacity(width);
    out.extend_from_slice(value);
    out.resize(width, fill);
    Some(out)
}

/// Formats `value` as space-padded decimal text of `width` bytes.
pub fn decimal(value: u64, width: usize) -> Option<Vec<u8>> {
    pad(value.to_string().as_bytes(), width, b' ')
}

/// Writes `value` left-justified into `dest`, filling the remainder of
/// `dest` with `fill`. Returns `false`, leaving `dest` untouched, if it does
/// not fit.
pub fn write_padded(dest: &mut [u8], value: &[u8], fill: u8) -> bool {
    match pad(value, dest.len(), fill) {
        Some(bytes) => {
            dest.copy_from_slice(&bytes);
            true
        }
        None => false,
    }
}

/// Strips trailing spaces from a field.
pub fn trim_end(bytes: &[u8]) -> &[u8] {
    let end = bytes
        .iter()
        .rposition(|&b| b != b' ')
        .map_or(0, |pos| pos + 1);
    &bytes[..end]
}

/// Parses a numeric field in the given radix.
///
/// Surrounding spaces are ignored. Returns `None` for blank fields, for any
/// non-digit byte, and on overflow.
///
/// ```
/// use debpatch::format::field::parse_number;
///
/// assert_eq!(parse_number(b"1700000000  ", 10), Some(1_700_000_000));
/// assert_eq!(parse_number(b"100644  ", 8), Some(0o100644));
/// assert_eq!(parse_number(b"          ", 10), None);
/// assert_eq!(parse_number(b"12a       ", 10), None);
/// ```
pub fn parse_number(digits: &[u8], radix: u32) -> Option<u64> {
    let start = digits.iter().position(|&b| b != b' ')?;
    let digits = trim_end(&digits[start..]);
    let mut result: u64 = 0;
    for &c in digits {
        let x = (c as char).to_digit(radix)?;
        result = result
            .checked_mul(u64::from(radix))?
            .checked_add(u64::from(x))?;
    }
    Some(result)
}
