//! Path-level editing session with atomic promotion.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::READ_BUFFER_SIZE;
use crate::format::reader::read_magic;
use crate::{Error, MemberName, Result};

use super::{Replacement, ReplacementSet, append_members, rewrite};

/// What to do with the original archive when an edit is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackupPolicy {
    /// Replace the original without keeping a copy.
    #[default]
    None,
    /// Keep the original as `<archive>.orig`, overwriting any previous backup.
    Keep,
}

/// Result of [`ArchiveEditor::commit`].
#[must_use = "edit result should be checked to verify operation completed as expected"]
#[derive(Debug, Clone, Default)]
pub struct EditResult {
    /// Members copied unchanged.
    pub members_copied: usize,
    /// Members whose payload was replaced in place.
    pub members_replaced: usize,
    /// New members appended at the end.
    pub members_appended: usize,
    /// Size of the new archive in bytes.
    pub bytes_written: u64,
    /// Where the original was moved, if a backup was kept.
    pub backup: Option<PathBuf>,
}

impl EditResult {
    /// Total number of members in the new archive.
    pub fn total_members(&self) -> usize {
        self.members_copied + self.members_replaced + self.members_appended
    }

    /// Returns true if the archive was left untouched.
    pub fn is_noop(&self) -> bool {
        self.bytes_written == 0
    }
}

/// An editing session on an archive file.
///
/// Requests are queued and applied by [`commit`](Self::commit), which
/// writes the new archive next to the original as `<archive>.new` and then
/// renames it into place. Members whose name matches a request have their
/// payload replaced where they stand; requests matching no member are
/// appended as new members.
///
/// # Example
///
/// ```rust,no_run
/// use debpatch::edit::{ArchiveEditor, BackupPolicy};
///
/// let mut editor = ArchiveEditor::open("hello_1.0_amd64.deb")?.backup(BackupPolicy::Keep);
/// editor.add_file("build/postinst", "postinst")?;
/// let result = editor.commit()?;
/// println!(
///     "replaced {}, appended {}",
///     result.members_replaced, result.members_appended
/// );
/// # Ok::<(), debpatch::Error>(())
/// ```
#[derive(Debug)]
pub struct ArchiveEditor {
    path: PathBuf,
    replacements: ReplacementSet,
    backup: BackupPolicy,
}

impl ArchiveEditor {
    /// Opens an archive for editing.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened, or
    /// [`Error::InvalidFormat`] if it is not an `ar` archive.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;
        read_magic(&mut file)?;
        Ok(Self {
            path: path.to_path_buf(),
            replacements: ReplacementSet::new(),
            backup: BackupPolicy::None,
        })
    }

    /// Sets the backup policy.
    pub fn backup(mut self, policy: BackupPolicy) -> Self {
        self.backup = policy;
        self
    }

    /// Queues a replacement. A later request for the same target wins.
    pub fn replace(&mut self, replacement: Replacement) -> &mut Self {
        if let Some(old) = self.replacements.insert(replacement) {
            log::debug!(
                "Request for '{}' from '{}' superseded",
                old.target,
                old.source.display()
            );
        }
        self
    }

    /// Queues the file at `source` to be written as member `target`.
    ///
    /// # Errors
    ///
    /// Fails if `target` is not a valid member name, or if `source` is
    /// missing or not a regular file.
    pub fn add_file(&mut self, source: impl AsRef<Path>, target: &str) -> Result<&mut Self> {
        let target = MemberName::new(target)?;
        let replacement = Replacement::from_source(source, target)?;
        Ok(self.replace(replacement))
    }

    /// Path of the archive being edited.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Queued requests, in insertion order.
    pub fn pending(&self) -> &ReplacementSet {
        &self.replacements
    }

    /// Applies all queued requests.
    ///
    /// The original is only replaced once the new archive has been written
    /// and synced in full. On error `<archive>.new` is removed and the
    /// original is left as it was. With no queued requests nothing is
    /// written.
    ///
    /// # Errors
    ///
    /// [`Error::FieldOverflow`] if a request's size or mtime cannot be
    /// stored, checked before any file is created. Otherwise any error from
    /// [`rewrite`] or [`append_members`], or an I/O error
    /// from creating, syncing or renaming files.
    pub fn commit(self) -> Result<EditResult> {
        if self.replacements.is_empty() {
            log::info!("No members to write into '{}'", self.path.display());
            return Ok(EditResult::default());
        }
        for replacement in &self.replacements {
            replacement.check_fields()?;
        }

        let new_path = sibling(&self.path, "new");
        let mut result = match self.write_new(&new_path) {
            Ok(result) => result,
            Err(e) => {
                discard(&new_path);
                return Err(e);
            }
        };

        if self.backup == BackupPolicy::Keep {
            let orig_path = sibling(&self.path, "orig");
            if let Err(e) = fs::rename(&self.path, &orig_path) {
                discard(&new_path);
                return Err(Error::Io(e));
            }
            log::debug!("Kept original as '{}'", orig_path.display());
            result.backup = Some(orig_path);
        }

        if let Err(e) = fs::rename(&new_path, &self.path) {
            if let Some(orig_path) = &result.backup {
                if let Err(restore) = fs::rename(orig_path, &self.path) {
                    log::error!(
                        "Failed to restore '{}' from backup: {}",
                        self.path.display(),
                        restore
                    );
                }
            }
            discard(&new_path);
            return Err(Error::Io(e));
        }

        log::debug!(
            "Wrote '{}': {} copied, {} replaced, {} appended, {} bytes",
            self.path.display(),
            result.members_copied,
            result.members_replaced,
            result.members_appended,
            result.bytes_written
        );
        Ok(result)
    }

    fn write_new(&self, new_path: &Path) -> Result<EditResult> {
        let source = BufReader::with_capacity(READ_BUFFER_SIZE, File::open(&self.path)?);
        let mut output = BufWriter::with_capacity(READ_BUFFER_SIZE, File::create(new_path)?);

        let outcome = rewrite(source, &mut output, self.replacements.clone())?;
        let appended = append_members(&mut output, &outcome.remaining)?;

        output.flush()?;
        let file = output.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        file.sync_all()?;

        Ok(EditResult {
            members_copied: outcome.members_copied,
            members_replaced: outcome.members_replaced,
            members_appended: outcome.remaining.len(),
            bytes_written: outcome.bytes_written + appended,
            backup: None,
        })
    }
}

/// `<path>.<suffix>`, keeping the existing extension.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn discard(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            log::warn!("Failed to remove '{}': {}", path.display(), e);
        }
    }
}
