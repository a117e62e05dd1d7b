//! The 60-byte member header.

use super::field::{self, Field};
use super::{DEFAULT_GID, DEFAULT_MODE, DEFAULT_UID, HEADER_SIZE, TERMINATOR};
use crate::{Error, MemberName, Result};

/// A raw member header.
///
/// The header is kept as the exact bytes read from (or to be written to)
/// the archive, so copying an unmodified member reproduces it byte for
/// byte. Accessors parse fields on demand.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct MemberHeader {
    bytes: [u8; HEADER_SIZE],
}

impl MemberHeader {
    /// Wraps header bytes read from an archive. No validation is performed;
    /// see [`is_terminated`](Self::is_terminated).
    pub const fn from_bytes(bytes: [u8; HEADER_SIZE]) -> Self {
        Self { bytes }
    }

    /// Builds a header for a new member with owner and group `0` and mode
    /// `100644`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldOverflow`] if `mtime` or `size` needs more
    /// digits than its field holds.
    ///
    /// ```
    /// use debpatch::MemberName;
    /// use debpatch::format::MemberHeader;
    ///
    /// let name = MemberName::new("new.txt").unwrap();
    /// let header = MemberHeader::new(&name, 1_700_000_000, 5).unwrap();
    /// assert_eq!(
    ///     header.as_bytes(),
    ///     b"new.txt         1700000000  0     0     100644  5         `\n"
    /// );
    /// ```
    pub fn new(name: &MemberName, mtime: u64, size: u64) -> Result<Self> {
        let mut header = Self {
            bytes: [b' '; HEADER_SIZE],
        };
        header.set_text(field::NAME, name.as_bytes())?;
        header.set_mtime(mtime)?;
        header.set_text(field::UID, DEFAULT_UID.as_bytes())?;
        header.set_text(field::GID, DEFAULT_GID.as_bytes())?;
        header.set_text(field::MODE, DEFAULT_MODE.as_bytes())?;
        header.set_size(size)?;
        header.bytes[field::END.range()].copy_from_slice(TERMINATOR);
        Ok(header)
    }

    /// Returns the raw header bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.bytes
    }

    /// Returns `true` if the header ends with the `` "`\n" `` terminator.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        &self.bytes[field::END.range()] == TERMINATOR
    }

    /// Returns the raw 16-byte name field.
    #[inline]
    pub fn raw_name(&self) -> &[u8] {
        &self.bytes[field::NAME.range()]
    }

    /// Returns the name field with trailing spaces removed.
    pub fn trimmed_name(&self) -> &[u8] {
        field::trim_end(self.raw_name())
    }

    /// Returns the member name with trailing spaces and a GNU-style
    /// trailing `/` removed.
    ///
    /// GNU special members keep their meaning: the symbol table `/` becomes
    /// the empty name and the long-name table `//` becomes `/`.
    pub fn name(&self) -> &[u8] {
        let trimmed = self.trimmed_name();
        trimmed.strip_suffix(b"/").unwrap_or(trimmed)
    }

    /// Returns the name as (lossy) UTF-8, for display and file names.
    pub fn name_lossy(&self) -> String {
        String::from_utf8_lossy(self.name()).into_owned()
    }

    /// Modification time in seconds since the epoch, if the field is set.
    pub fn mtime(&self) -> Option<u64> {
        field::parse_number(&self.bytes[field::DATE.range()], 10)
    }

    /// Owner id, if the field is set.
    pub fn uid(&self) -> Option<u64> {
        field::parse_number(&self.bytes[field::UID.range()], 10)
    }

    /// Group id, if the field is set.
    pub fn gid(&self) -> Option<u64> {
        field::parse_number(&self.bytes[field::GID.range()], 10)
    }

    /// File mode, parsed from octal text.
    pub fn mode(&self) -> Option<u64> {
        field::parse_number(&self.bytes[field::MODE.range()], 8)
    }

    /// Declared payload size, excluding any pad byte.
    pub fn size(&self) -> Option<u64> {
        field::parse_number(&self.bytes[field::SIZE.range()], 10)
    }

    /// Rewrites the modification time field.
    pub fn set_mtime(&mut self, mtime: u64) -> Result<()> {
        self.set_decimal(field::DATE, mtime)
    }

    /// Rewrites the size field.
    pub fn set_size(&mut self, size: u64) -> Result<()> {
        self.set_decimal(field::SIZE, size)
    }

    fn set_decimal(&mut self, field: Field, value: u64) -> Result<()> {
        self.set_text(field, value.to_string().as_bytes())
    }

    fn set_text(&mut self, field: Field, value: &[u8]) -> Result<()> {
        if field::write_padded(&mut self.bytes[field.range()], value, b' ') {
            Ok(())
        } else {
            Err(Error::FieldOverflow {
                field: field.name,
                value: String::from_utf8_lossy(value).into_owned(),
                width: field.width,
            })
        }
    }
}

impl std::fmt::Debug for MemberHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberHeader")
            .field("name", &String::from_utf8_lossy(self.raw_name()))
            .field("mtime", &self.mtime())
            .field("size", &self.size())
            .field("terminated", &self.is_terminated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATA_BIN: &[u8; HEADER_SIZE] =
        b"data.bin        1600000000  1000  1000  100755  8         `\n";

    #[test]
    fn test_parse_fields() {
        let header = MemberHeader::from_bytes(*DATA_BIN);
        assert!(header.is_terminated());
        assert_eq!(header.name(), b"data.bin");
        assert_eq!(header.mtime(), Some(1_600_000_000));
        assert_eq!(header.uid(), Some(1000));
        assert_eq!(header.gid(), Some(1000));
        assert_eq!(header.mode(), Some(0o100755));
        assert_eq!(header.size(), Some(8));
    }

    #[test]
    fn test_gnu_names() {
        let mut bytes = *DATA_BIN;
        bytes[..16].copy_from_slice(b"debian-binary/  ");
        let header = MemberHeader::from_bytes(bytes);
        assert_eq!(header.trimmed_name(), b"debian-binary/");
        assert_eq!(header.name(), b"debian-binary");

        bytes[..16].copy_from_slice(b"/               ");
        assert_eq!(MemberHeader::from_bytes(bytes).name(), b"");

        bytes[..16].copy_from_slice(b"//              ");
        assert_eq!(MemberHeader::from_bytes(bytes).name(), b"/");
    }

    #[test]
    fn test_unterminated() {
        let mut bytes = *DATA_BIN;
        bytes[58] = b'x';
        assert!(!MemberHeader::from_bytes(bytes).is_terminated());
    }

    #[test]
    fn test_rewrite_keeps_other_fields() {
        let mut header = MemberHeader::from_bytes(*DATA_BIN);
        header.set_mtime(1_700_000_000).unwrap();
        header.set_size(4).unwrap();
        assert_eq!(
            header.as_bytes(),
            b"data.bin        1700000000  1000  1000  100755  4         `\n"
        );
    }

    #[test]
    fn test_size_overflow_leaves_header_unchanged() {
        let mut header = MemberHeader::from_bytes(*DATA_BIN);
        let err = header.set_size(10_000_000_000).unwrap_err();
        assert!(matches!(err, Error::FieldOverflow { field: "size", width: 10, .. }));
        assert_eq!(header.as_bytes(), DATA_BIN);
    }

    #[test]
    fn test_new_header_layout() {
        let name = MemberName::new("abcdefghijklmnop").unwrap();
        let header = MemberHeader::new(&name, 0, 0).unwrap();
        assert_eq!(
            header.as_bytes(),
            b"abcdefghijklmnop0           0     0     100644  0         `\n"
        );
        assert!(header.is_terminated());
    }

    #[test]
    fn test_blank_fields_are_none() {
        let header = MemberHeader::from_bytes(
            *b"/               0           0     0     0       4         `\n",
        );
        assert_eq!(header.mtime(), Some(0));
        assert_eq!(header.size(), Some(4));

        let blank = MemberHeader::from_bytes(
            *b"blank                                           4         `\n",
        );
        assert_eq!(blank.mtime(), None);
        assert_eq!(blank.uid(), None);
        assert_eq!(blank.mode(), None);
        assert_eq!(blank.size(), Some(4));
    }
}
