//! Archive editing.
//!
//! Editing an `ar` archive means streaming it into a new file: members are
//! copied as-is except those named by a [`Replacement`], whose header gets a
//! new mtime and size and whose payload comes from a file on disk.
//! Replacements that match no member are appended at the end.
//!
//! Two levels are offered:
//! - [`rewrite`] and [`append_members`] work on any reader and writer
//! - [`ArchiveEditor`] works on a path, writing `<archive>.new` and renaming
//!   it over the original once complete
//!
//! # Example
//!
//! ```rust,no_run
//! use debpatch::edit::{ReplacementSet, Replacement, append_members, rewrite};
//! use debpatch::MemberName;
//! use std::fs::File;
//!
//! let mut set = ReplacementSet::new();
//! set.insert(Replacement::from_source("postinst", MemberName::new("postinst")?)?);
//!
//! let input = File::open("in.deb")?;
//! let mut output = File::create("out.deb")?;
//! let outcome = rewrite(input, &mut output, set)?;
//! append_members(&mut output, &outcome.remaining)?;
//! # Ok::<(), debpatch::Error>(())
//! ```

mod editor;
mod replacement;
mod rewrite;

pub use editor::{ArchiveEditor, BackupPolicy, EditResult};
pub use replacement::{Replacement, ReplacementSet, parse_file_pair};
pub use rewrite::{RewriteOutcome, append_members, rewrite};
