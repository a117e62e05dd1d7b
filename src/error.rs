//! Error types for `ar` archive operations.
//!
//! This module provides the [`Error`] enum which represents all possible
//! failure modes when reading or patching `ar` archives (and therefore
//! Debian binary packages), along with a convenient [`Result<T>`] alias.
//!
//! # Error Handling
//!
//! All fallible operations in this crate return `Result<T, Error>`. Errors
//! fall into three families, each with a classification helper:
//!
//! | Family | Helper | Variants |
//! |--------|--------|----------|
//! | Format | [`Error::is_format_error`] | [`InvalidFormat`][Error::InvalidFormat], [`CorruptHeader`][Error::CorruptHeader] |
//! | Validation | [`Error::is_validation_error`] | [`MemberNameTooLong`][Error::MemberNameTooLong], [`InvalidMemberName`][Error::InvalidMemberName], [`SourceNotFound`][Error::SourceNotFound], [`NotARegularFile`][Error::NotARegularFile], [`InvalidFilePair`][Error::InvalidFilePair], [`InvalidControl`][Error::InvalidControl], [`FieldOverflow`][Error::FieldOverflow], [`UnsafeMemberName`][Error::UnsafeMemberName] |
//! | I/O | [`Error::is_io_error`] | [`Io`][Error::Io], [`ShortRead`][Error::ShortRead], [`TruncatedHeader`][Error::TruncatedHeader], [`TruncatedMember`][Error::TruncatedMember], [`MemberNotFound`][Error::MemberNotFound] |
//!
//! ```rust,no_run
//! use debpatch::{Error, read};
//!
//! fn show(path: &str) {
//!     match read::list_members(path) {
//!         Ok(names) => println!("{}", names.join(", ")),
//!         Err(e) if e.is_format_error() => eprintln!("Not an ar archive: {}", e),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! [`ArchiveEditor`](crate::ArchiveEditor) raises validation errors before
//! an archive is touched, so a caller seeing one from it can be sure no
//! output file was created.

use std::io;
use std::path::PathBuf;

/// The main error type for `ar` archive operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An I/O error occurred during file operations.
    ///
    /// This wraps [`std::io::Error`] and is returned when opening, reading,
    /// writing or renaming files fails.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not an `ar` archive.
    ///
    /// Returned when the first 8 bytes are not `!<arch>\n`.
    #[error("Invalid ar format: {0}")]
    InvalidFormat(String),

    /// A member header is terminated correctly but its contents are unusable,
    /// for example a size field that is not a decimal number.
    #[error("Corrupt header at offset {offset:#x}: {reason}")]
    CorruptHeader {
        /// Byte offset of the header in the archive.
        offset: u64,
        /// A description of the corruption.
        reason: String,
    },

    /// A target member name does not fit the 16-byte name field.
    ///
    /// # Example
    ///
    /// ```rust
    /// use debpatch::{Error, MemberName};
    ///
    /// let err = MemberName::new("seventeen-chars!!").unwrap_err();
    /// assert!(matches!(err, Error::MemberNameTooLong { len: 17, .. }));
    /// ```
    #[error("Member name '{name}' is {len} bytes, at most 16 are allowed")]
    MemberNameTooLong {
        /// The rejected name.
        name: String,
        /// Its length in bytes.
        len: usize,
    },

    /// A target member name cannot be encoded in an `ar` header.
    #[error("Invalid member name: {0}")]
    InvalidMemberName(String),

    /// A source file to insert does not exist.
    #[error("Source file not found: {}", path.display())]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A source file to insert exists but is not a regular file.
    #[error("Source must be a regular file: {}", path.display())]
    NotARegularFile {
        /// The offending path.
        path: PathBuf,
    },

    /// A `source=target` argument could not be split.
    #[error("Invalid file pair '{0}': expected <source>=<target>")]
    InvalidFilePair(String),

    /// A Debian control file lacks one of the fields needed to name the package.
    #[error("Invalid control file: {0}")]
    InvalidControl(String),

    /// A numeric value does not fit its fixed-width header field.
    ///
    /// The size field holds 10 decimal digits, so payloads of 10 GB or more
    /// cannot be stored.
    #[error("Value {value} does not fit the {width}-byte {field} field")]
    FieldOverflow {
        /// Header field name.
        field: &'static str,
        /// The value as it would have been written.
        value: String,
        /// Field width in bytes.
        width: usize,
    },

    /// A member name cannot safely be used as a file name during extraction.
    #[error("Member name '{name}' is not a safe file name")]
    UnsafeMemberName {
        /// The member name as stored in the archive.
        name: String,
    },

    /// A source file yielded fewer bytes than its recorded size.
    ///
    /// This usually means the file was truncated between validation and
    /// insertion. The partially written archive is never promoted.
    #[error("Failed to read {} fully: expected {expected} bytes, got {actual}", path.display())]
    ShortRead {
        /// The source file.
        path: PathBuf,
        /// Bytes expected.
        expected: u64,
        /// Bytes actually read.
        actual: u64,
    },

    /// The archive ended in the middle of a member header.
    #[error("Archive ends mid-header at offset {offset:#x}: {available} of 60 bytes present")]
    TruncatedHeader {
        /// Byte offset of the partial header.
        offset: u64,
        /// Number of header bytes that were present.
        available: usize,
    },

    /// The archive ended before a member's declared payload was complete.
    #[error("Member '{name}' is truncated: expected {expected} bytes, got {actual}")]
    TruncatedMember {
        /// The member name.
        name: String,
        /// Declared payload size.
        expected: u64,
        /// Bytes actually present.
        actual: u64,
    },

    /// A member requested by name is not present in the archive.
    #[error("Member not found: {name}")]
    MemberNotFound {
        /// The requested name.
        name: String,
    },
}

impl Error {
    /// Returns `true` if the archive itself is not a well-formed `ar` archive.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::InvalidFormat(_) | Error::CorruptHeader { .. })
    }

    /// Returns `true` if this error was raised while validating caller input.
    ///
    /// Validation errors are reported before any output file is created.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::MemberNameTooLong { .. }
                | Error::InvalidMemberName(_)
                | Error::SourceNotFound { .. }
                | Error::NotARegularFile { .. }
                | Error::InvalidFilePair(_)
                | Error::InvalidControl(_)
                | Error::FieldOverflow { .. }
                | Error::UnsafeMemberName { .. }
        )
    }

    /// Returns `true` if this is an I/O failure, including short reads and
    /// truncated archive streams.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Error::Io(_)
                | Error::ShortRead { .. }
                | Error::TruncatedHeader { .. }
                | Error::TruncatedMember { .. }
                | Error::MemberNotFound { .. }
        )
    }

    /// Returns the member name associated with this error, if any.
    ///
    /// # Example
    ///
    /// ```rust
    /// use debpatch::Error;
    ///
    /// fn log_error(error: &Error) {
    ///     if let Some(name) = error.member_name() {
    ///         eprintln!("Error for '{}': {}", name, error);
    ///     }
    /// }
    /// ```
    pub fn member_name(&self) -> Option<&str> {
        match self {
            Error::MemberNameTooLong { name, .. } => Some(name.as_str()),
            Error::UnsafeMemberName { name } => Some(name.as_str()),
            Error::TruncatedMember { name, .. } => Some(name.as_str()),
            Error::MemberNotFound { name } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Creates a CorruptHeader error.
    pub fn corrupt_header(offset: u64, reason: impl Into<String>) -> Self {
        Error::CorruptHeader {
            offset,
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for `ar` archive operations.
pub type Result<T> = std::result::Result<T, Error>;
