//! Archive member metadata.

use crate::format::{HEADER_SIZE, MemberHeader, padded_size};

/// A member of an `ar` archive, as described by its header.
///
/// The payload is not held in memory; use
/// [`Members::read_payload`](super::Members::read_payload) or
/// [`Archive::read_member`](super::Archive::read_member) to get it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Member name with trailing spaces and any GNU `/` removed.
    pub name: String,
    /// The name field exactly as stored (16 bytes).
    pub raw_name: Vec<u8>,
    /// Modification time in seconds since the epoch.
    pub mtime: Option<u64>,
    /// Owner id.
    pub uid: Option<u64>,
    /// Group id.
    pub gid: Option<u64>,
    /// File mode.
    pub mode: Option<u64>,
    /// Payload size in bytes, excluding the pad byte.
    pub size: u64,
    /// Offset of the member header from the start of the archive.
    pub offset: u64,
}

impl Member {
    pub(crate) fn from_header(header: &MemberHeader, size: u64, offset: u64) -> Self {
        Self {
            name: header.name_lossy(),
            raw_name: header.raw_name().to_vec(),
            mtime: header.mtime(),
            uid: header.uid(),
            gid: header.gid(),
            mode: header.mode(),
            size,
            offset,
        }
    }

    /// Offset of the first payload byte.
    pub fn data_offset(&self) -> u64 {
        self.offset + HEADER_SIZE as u64
    }

    /// Bytes occupied by the payload including its pad byte.
    pub fn padded_size(&self) -> u64 {
        padded_size(self.size)
    }

    /// Returns `true` for the GNU symbol table (`/`) and long-name table
    /// (`//`), which are archive bookkeeping rather than files.
    pub fn is_special(&self) -> bool {
        self.name.is_empty() || self.name == "/"
    }
}
