//! Replacement requests: which member to write, and from where.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::format::field;
use crate::{Error, MemberName, Result};

/// A request to write a member named `target` with the contents of the
/// file at `source`.
///
/// `mtime` and `size` are what the new header records; `size` bytes are
/// read from `source` when the archive is rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Name of the member to replace or add.
    pub target: MemberName,
    /// File whose contents become the member payload.
    pub source: PathBuf,
    /// Modification time in seconds since the epoch.
    pub mtime: u64,
    /// Payload size in bytes.
    pub size: u64,
}

impl Replacement {
    /// Creates a replacement with explicit metadata.
    pub fn new(target: MemberName, source: impl Into<PathBuf>, mtime: u64, size: u64) -> Self {
        Self {
            target,
            source: source.into(),
            mtime,
            size,
        }
    }

    /// Creates a replacement from a file on disk, taking `mtime` and `size`
    /// from its metadata.
    ///
    /// # Errors
    ///
    /// - [`Error::SourceNotFound`] if `source` does not exist
    /// - [`Error::NotARegularFile`] if it is a directory or other special file
    /// - [`Error::FieldOverflow`] if the size or mtime does not fit its
    ///   header field
    pub fn from_source(source: impl AsRef<Path>, target: MemberName) -> Result<Self> {
        let source = source.as_ref();
        let metadata = fs::metadata(source).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::SourceNotFound {
                path: source.to_path_buf(),
            },
            _ => Error::Io(e),
        })?;

        if !metadata.is_file() {
            return Err(Error::NotARegularFile {
                path: source.to_path_buf(),
            });
        }

        let mtime = FileTime::from_last_modification_time(&metadata).unix_seconds();
        let replacement = Self::new(
            target,
            source,
            u64::try_from(mtime).unwrap_or(0),
            metadata.len(),
        );
        replacement.check_fields()?;
        Ok(replacement)
    }

    /// Checks that `mtime` and `size` fit the header's decimal fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldOverflow`] naming the first field that does not
    /// fit.
    pub fn check_fields(&self) -> Result<()> {
        for (f, value) in [(field::DATE, self.mtime), (field::SIZE, self.size)] {
            if field::decimal(value, f.width).is_none() {
                return Err(Error::FieldOverflow {
                    field: f.name,
                    value: value.to_string(),
                    width: f.width,
                });
            }
        }
        Ok(())
    }
}

/// An ordered set of replacements keyed by target name.
///
/// Iteration follows insertion order. Inserting a second replacement for a
/// target already present overwrites the first in place.
#[derive(Debug, Clone, Default)]
pub struct ReplacementSet {
    entries: Vec<Replacement>,
}

impl ReplacementSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a replacement, returning the one it displaced, if any.
    pub fn insert(&mut self, replacement: Replacement) -> Option<Replacement> {
        match self
            .entries
            .iter_mut()
            .find(|r| r.target == replacement.target)
        {
            Some(existing) => Some(std::mem::replace(existing, replacement)),
            None => {
                self.entries.push(replacement);
                None
            }
        }
    }

    /// Looks up the replacement for `name`.
    pub fn get(&self, name: &str) -> Option<&Replacement> {
        self.entries.iter().find(|r| r.target.as_str() == name)
    }

    /// Removes and returns the replacement for `name`.
    pub fn take(&mut self, name: &str) -> Option<Replacement> {
        let index = self
            .entries
            .iter()
            .position(|r| r.target.as_str() == name)?;
        Some(self.entries.remove(index))
    }

    /// Returns true if a replacement targets `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of replacements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Replacement> {
        self.entries.iter()
    }

    /// Target names in insertion order.
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|r| r.target.as_str())
    }
}

impl FromIterator<Replacement> for ReplacementSet {
    fn from_iter<I: IntoIterator<Item = Replacement>>(iter: I) -> Self {
        let mut set = Self::new();
        for replacement in iter {
            set.insert(replacement);
        }
        set
    }
}

impl Extend<Replacement> for ReplacementSet {
    fn extend<I: IntoIterator<Item = Replacement>>(&mut self, iter: I) {
        for replacement in iter {
            self.insert(replacement);
        }
    }
}

impl IntoIterator for ReplacementSet {
    type Item = Replacement;
    type IntoIter = std::vec::IntoIter<Replacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReplacementSet {
    type Item = &'a Replacement;
    type IntoIter = std::slice::Iter<'a, Replacement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Splits a `source=target` argument.
///
/// # Errors
///
/// Returns [`Error::InvalidFilePair`] unless the argument has exactly one
/// `=` with text on both sides, and a member name error if `target` is not
/// a valid member name.
///
/// # Example
///
/// ```rust
/// use debpatch::edit::parse_file_pair;
///
/// let (source, target) = parse_file_pair("build/postinst=postinst").unwrap();
/// assert_eq!(source.to_str(), Some("build/postinst"));
/// assert_eq!(target.as_str(), "postinst");
///
/// assert!(parse_file_pair("a=b=c").is_err());
/// ```
pub fn parse_file_pair(arg: &str) -> Result<(PathBuf, MemberName)> {
    let mut parts = arg.split('=');
    let (Some(source), Some(target), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::InvalidFilePair(arg.to_string()));
    };
    if source.is_empty() || target.is_empty() {
        return Err(Error::InvalidFilePair(arg.to_string()));
    }
    Ok((PathBuf::from(source), MemberName::new(target)?))
}
