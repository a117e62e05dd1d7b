//! Archive reading API.
//!
//! This module lists and extracts the members of `ar` archives. Headers are
//! read one at a time and payloads are skipped by seeking, so listing a
//! large `.deb` only touches its headers.
//!
//! # Example
//!
//! ```rust,no_run
//! use debpatch::read::{Archive, ExtractOptions};
//!
//! let mut archive = Archive::open_path("package.deb")?;
//!
//! for member in archive.members() {
//!     let member = member?;
//!     println!("{}: {} bytes", member.name, member.size);
//! }
//!
//! archive.extract(Some("control.tar.gz"), "out", &ExtractOptions::default())?;
//! # Ok::<(), debpatch::Error>(())
//! ```

mod archive_open;
mod archive_query;
mod extraction;
mod info;
mod member;
mod members;
mod options;

pub use info::ExtractResult;
pub use member::Member;
pub use members::Members;
pub use options::{ExtractOptions, OverwritePolicy};

use std::fs::File;
use std::path::Path;

use crate::Result;
use crate::format::{MAGIC, has_magic, reader::read_full};

/// An `ar` archive reader.
///
/// The magic has been verified by the time an `Archive` exists; members are
/// read lazily through [`members`](Self::members).
pub struct Archive<R> {
    pub(crate) reader: R,
}

/// Returns `true` if the file at `path` starts with the `ar` magic.
///
/// Missing, unreadable or short files give `false`.
pub fn is_archive(path: impl AsRef<Path>) -> bool {
    let Ok(mut file) = File::open(path.as_ref()) else {
        return false;
    };
    let mut magic = [0u8; MAGIC.len()];
    match read_full(&mut file, &mut magic) {
        Ok(n) => has_magic(&magic[..n]),
        Err(_) => false,
    }
}

/// Lists member names (GNU `/` removed) in archive order.
///
/// A file that is not an `ar` archive gives an empty list.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened, or
/// [`Error::CorruptHeader`](crate::Error::CorruptHeader) if a header has an
/// unreadable size.
pub fn list_members(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    File::open(path)?;
    if !is_archive(path) {
        log::debug!("'{}' is not an ar archive", path.display());
        return Ok(Vec::new());
    }
    Archive::open_path(path)?.member_names()
}

/// Extracts one member (by name) or all members of the archive at `path`
/// into `target_dir`, with default [`ExtractOptions`].
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`](crate::Error::InvalidFormat) if the file
/// is not an `ar` archive; see [`Archive::extract`] for the rest.
pub fn extract(
    path: impl AsRef<Path>,
    member_name: Option<&str>,
    target_dir: impl AsRef<Path>,
) -> Result<ExtractResult> {
    Archive::open_path(path)?.extract(member_name, target_dir, &ExtractOptions::default())
}
