//! `ar` archive format constants, definitions, and low-level parsing utilities.
//!
//! An `ar` archive is the 8-byte magic followed by a sequence of members.
//! Each member is a 60-byte ASCII header and a payload. Payloads of odd
//! length are followed by one pad byte that is not counted in the header's
//! size field:
//!
//! ```text
//! "!<arch>\n"
//! [header 60][payload size][pad 0|1]
//! [header 60][payload size][pad 0|1]
//! ...
//! ```

pub mod field;
pub mod header;
pub mod reader;

pub use header::MemberHeader;

/// The `ar` file signature (magic bytes).
///
/// Every valid archive, including every Debian binary package, starts with
/// these 8 bytes.
pub const MAGIC: &[u8; 8] = b"!<arch>\n";

/// Size of a member header in bytes.
pub const HEADER_SIZE: usize = 60;

/// The two bytes that end every member header.
pub const TERMINATOR: &[u8; 2] = b"`\n";

/// Filler written after odd-length payloads.
pub const PAD_BYTE: u8 = b'\n';

/// Owner id written into newly created headers.
pub const DEFAULT_UID: &str = "0";

/// Group id written into newly created headers.
pub const DEFAULT_GID: &str = "0";

/// File mode (octal text) written into newly created headers.
pub const DEFAULT_MODE: &str = "100644";

/// Returns the number of bytes a payload of `size` bytes occupies in the
/// archive, including the pad byte.
///
/// ```
/// use debpatch::format::padded_size;
///
/// assert_eq!(padded_size(4), 4);
/// assert_eq!(padded_size(5), 6);
/// ```
#[inline]
pub const fn padded_size(size: u64) -> u64 {
    size + (size & 1)
}

/// Returns `true` if `bytes` starts with the `ar` magic.
#[inline]
pub fn has_magic(bytes: &[u8]) -> bool {
    bytes.len() >= MAGIC.len() && &bytes[..MAGIC.len()] == MAGIC
}
