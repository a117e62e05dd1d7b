//! Member extraction to the filesystem.

use std::fs::File;
use std::io::{self, BufWriter, Read, Seek, Write};
use std::path::{Path, PathBuf};

use filetime::FileTime;

use crate::{Error, Result};

use super::{Archive, ExtractOptions, ExtractResult, Member, OverwritePolicy};

impl<R: Read + Seek> Archive<R> {
    /// Extracts members into `target_dir`.
    ///
    /// With `name`, only the first member whose (GNU-stripped) name matches
    /// is written and the scan stops there. Without, every member is
    /// written using its name as the file name; GNU symbol and long-name
    /// tables are skipped. Untargeted payloads are skipped by seeking.
    ///
    /// # Errors
    ///
    /// - [`Error::MemberNotFound`] if `name` is given and absent
    /// - [`Error::UnsafeMemberName`] if a selected name is not a plain file name
    /// - [`Error::TruncatedMember`] if a selected payload is cut short
    pub fn extract(
        &mut self,
        name: Option<&str>,
        target_dir: impl AsRef<Path>,
        options: &ExtractOptions,
    ) -> Result<ExtractResult> {
        let target_dir = target_dir.as_ref();
        let mut result = ExtractResult::default();
        let mut members = self.members();

        while let Some(member) = members.next() {
            let member = member?;

            match name {
                Some(wanted) if member.name != wanted => continue,
                None if member.is_special() => {
                    log::debug!("Skipping GNU table member at {:#x}", member.offset);
                    result.members_skipped += 1;
                    continue;
                }
                _ => {}
            }

            let path = output_path(target_dir, &member)?;
            if path.exists() {
                match options.overwrite {
                    OverwritePolicy::Overwrite => {}
                    OverwritePolicy::Skip => {
                        log::debug!("Skipping existing file '{}'", path.display());
                        result.members_skipped += 1;
                        if name.is_some() {
                            return Ok(result);
                        }
                        continue;
                    }
                    OverwritePolicy::Error => {
                        return Err(Error::Io(io::Error::new(
                            io::ErrorKind::AlreadyExists,
                            format!("'{}' already exists", path.display()),
                        )));
                    }
                }
            }

            let mut out = BufWriter::new(File::create(&path)?);
            let written = members.read_payload(&member, &mut out)?;
            out.flush()?;
            drop(out);

            if options.preserve_mtime {
                apply_mtime(&path, member.mtime);
            }

            log::debug!("Extracted '{}' ({} bytes)", member.name, written);
            result.members_extracted += 1;
            result.bytes_extracted += written;
            result.paths.push(path);

            if name.is_some() {
                return Ok(result);
            }
        }

        match name {
            Some(wanted) => Err(Error::MemberNotFound {
                name: wanted.to_string(),
            }),
            None => Ok(result),
        }
    }
}

/// Resolves the output path for a member, refusing names that would escape
/// `target_dir` or are not plain file names.
fn output_path(target_dir: &Path, member: &Member) -> Result<PathBuf> {
    let name = member.name.as_str();
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if unsafe_name {
        return Err(Error::UnsafeMemberName {
            name: name.to_string(),
        });
    }
    Ok(target_dir.join(name))
}

fn apply_mtime(path: &Path, mtime: Option<u64>) {
    let Some(secs) = mtime.and_then(|m| i64::try_from(m).ok()) else {
        return;
    };
    if let Err(e) = filetime::set_file_mtime(path, FileTime::from_unix_time(secs, 0)) {
        log::warn!(
            "Failed to set modification time on '{}': {}",
            path.display(),
            e
        );
    }
}
