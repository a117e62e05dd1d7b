//! # debpatch
//!
//! A pure-Rust library for editing Unix `ar` archives, the container format
//! of Debian `.deb` packages.
//!
//! The main use is patching a built package: replacing the payload of
//! existing members (say, a re-signed `control.tar.gz`) and appending new
//! ones, without unpacking or rebuilding anything. Members are streamed, so
//! archives of any size are handled in bounded memory.
//!
//! ## Quick Start
//!
//! ### Listing and Extracting
//!
//! ```rust,no_run
//! use debpatch::{Archive, ExtractOptions, Result};
//!
//! fn main() -> Result<()> {
//!     let mut archive = Archive::open_path("hello_2.10-3_amd64.deb")?;
//!
//!     for member in archive.members() {
//!         let member = member?;
//!         println!("{}: {} bytes", member.name, member.size);
//!     }
//!
//!     // Extract everything into ./out
//!     archive.extract(None, "./out", &ExtractOptions::default())?;
//!     Ok(())
//! }
//! ```
//!
//! ### Replacing and Adding Members
//!
//! ```rust,no_run
//! use debpatch::{ArchiveEditor, BackupPolicy, Result};
//!
//! fn main() -> Result<()> {
//!     let mut editor = ArchiveEditor::open("hello_2.10-3_amd64.deb")?
//!         .backup(BackupPolicy::Keep);
//!
//!     // Replaced in place if present, appended otherwise
//!     editor.add_file("signed/control.tar.gz", "control.tar.gz")?;
//!     editor.add_file("_gpgorigin", "_gpgorigin")?;
//!
//!     let result = editor.commit()?;
//!     println!(
//!         "{} replaced, {} appended",
//!         result.members_replaced, result.members_appended
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli` | No | Command-line interface tool |
//!
//! ## Format
//!
//! Archives start with the 8-byte magic `!<arch>\n`, followed by members.
//! Each member is a 60-byte text header (name, mtime, uid, gid, octal mode,
//! size, terminator) and the payload, padded with `\n` to an even length.
//! GNU-style names ending in `/` are accepted on input. See [`format`].

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

/// Default buffer size for read operations (8 KiB).
pub(crate) const READ_BUFFER_SIZE: usize = 8192;

pub mod control;
pub mod edit;
pub mod error;
pub mod format;
pub mod member_name;
pub mod read;

pub use control::ControlInfo;
pub use error::{Error, Result};
pub use member_name::MemberName;

// Re-export reading API at crate root for convenience
pub use read::{
    Archive, ExtractOptions, ExtractResult, Member, Members, extract, is_archive, list_members,
};

// Re-export edit API
pub use edit::{
    ArchiveEditor, BackupPolicy, EditResult, Replacement, ReplacementSet, RewriteOutcome,
    append_members, parse_file_pair, rewrite,
};
