//! Member name type with validation for the fixed-width `ar` name field.

use crate::format::field::NAME_WIDTH;
use crate::{Error, Result};
use std::fmt;

/// A validated `ar` member name.
///
/// `MemberName` guarantees the name can be written into the 16-byte name
/// field of a member header and read back unchanged:
/// - It is not empty and at most 16 bytes long
/// - It contains no NUL bytes, newlines, or `/` (GNU uses `/` as the
///   terminator of short names and as the prefix of its special tables)
/// - It has no leading or trailing spaces, which the space-padded encoding
///   would lose
///
/// # Examples
///
/// ```
/// use debpatch::MemberName;
///
/// let name = MemberName::new("debian-binary").unwrap();
/// assert_eq!(name.as_str(), "debian-binary");
///
/// // Exactly 16 bytes fits the field
/// assert!(MemberName::new("0123456789abcdef").is_ok());
/// // 17 bytes does not
/// assert!(MemberName::new("0123456789abcdefg").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberName(String);

impl MemberName {
    /// Creates a new `MemberName`, validating it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MemberNameTooLong`] for names longer than 16 bytes
    /// and [`Error::InvalidMemberName`] for any other violation.
    pub fn new(s: &str) -> Result<Self> {
        Self::validate(s)?;
        Ok(Self(s.to_string()))
    }

    fn validate(s: &str) -> Result<()> {
        if s.is_empty() {
            return Err(Error::InvalidMemberName("empty name".into()));
        }

        if s.len() > NAME_WIDTH {
            return Err(Error::MemberNameTooLong {
                name: s.to_string(),
                len: s.len(),
            });
        }

        if s.contains('\0') {
            return Err(Error::InvalidMemberName(format!(
                "'{}' contains NUL byte",
                s.escape_default()
            )));
        }

        if s.contains('\n') {
            return Err(Error::InvalidMemberName(format!(
                "'{}' contains a newline",
                s.escape_default()
            )));
        }

        if s.contains('/') {
            return Err(Error::InvalidMemberName(format!(
                "'{}' contains '/'",
                s
            )));
        }

        if s.starts_with(' ') || s.ends_with(' ') {
            return Err(Error::InvalidMemberName(format!(
                "'{}' has leading or trailing spaces",
                s
            )));
        }

        Ok(())
    }

    /// Returns the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the name as bytes, as they appear in the header.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Returns the length of the name in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the name is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for MemberName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for MemberName {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for MemberName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::validate(&s)?;
        Ok(Self(s))
    }
}
