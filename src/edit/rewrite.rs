//! Stream-level archive rewriting.
//!
//! [`rewrite`] copies an archive member by member, swapping in replacement
//! payloads as it goes; [`append_members`] writes whatever was left over as
//! new members. Neither needs to seek, so both work on pipes.

use std::fs::File;
use std::io::{BufReader, Read, Write};

use crate::READ_BUFFER_SIZE;
use crate::format::reader::{
    HeaderRead, copy_bytes, read_header, read_magic, skip_bytes, write_padding,
};
use crate::format::{HEADER_SIZE, MAGIC, MemberHeader, PAD_BYTE, padded_size};
use crate::{Error, Result};

use super::{Replacement, ReplacementSet};

/// Result of [`rewrite`].
#[must_use = "replacements that matched no member are returned in `remaining`"]
#[derive(Debug, Clone, Default)]
pub struct RewriteOutcome {
    /// Replacements whose target matched no member, in insertion order.
    pub remaining: ReplacementSet,
    /// Members copied unchanged.
    pub members_copied: usize,
    /// Members whose payload was replaced.
    pub members_replaced: usize,
    /// Bytes written to the output, magic included.
    pub bytes_written: u64,
}

/// Copies the archive in `source` to `output`, replacing the payload of
/// every member named in `replacements`.
///
/// A replaced member keeps its position and its uid, gid and mode; its
/// mtime and size are taken from the replacement. Only the first member
/// with a given name is replaced. Names are compared after removing
/// trailing spaces and a GNU `/`.
///
/// Copying stops at a clean end of stream, or at a header without the
/// `` `\n `` terminator; nothing after such a header is written.
///
/// # Errors
///
/// - [`Error::InvalidFormat`] if `source` lacks the magic
/// - [`Error::TruncatedHeader`] if `source` ends mid-header
/// - [`Error::CorruptHeader`] if a size field is unreadable
/// - [`Error::TruncatedMember`] if a payload, replaced or copied, is cut short
/// - [`Error::ShortRead`] if a replacement source is shorter than its size
/// - [`Error::FieldOverflow`] if a new mtime or size does not fit its field
pub fn rewrite<R: Read, W: Write>(
    mut source: R,
    mut output: W,
    mut replacements: ReplacementSet,
) -> Result<RewriteOutcome> {
    read_magic(&mut source)?;
    output.write_all(MAGIC)?;

    let mut outcome = RewriteOutcome {
        bytes_written: MAGIC.len() as u64,
        ..RewriteOutcome::default()
    };
    let mut offset = MAGIC.len() as u64;

    loop {
        let mut header = match read_header(&mut source)? {
            HeaderRead::Header(header) => header,
            HeaderRead::End => break,
            HeaderRead::Partial(available) => {
                return Err(Error::TruncatedHeader { offset, available });
            }
        };

        if !header.is_terminated() {
            log::warn!(
                "Bad ar header at offset {:#x}, dropping the rest of the archive",
                offset
            );
            break;
        }

        let size = header
            .size()
            .ok_or_else(|| Error::corrupt_header(offset, "size field is not a decimal number"))?;
        let name = header.name_lossy();

        match replacements.take(&name) {
            Some(replacement) => {
                log::debug!(
                    "Replacing '{}' ({} -> {} bytes) from '{}'",
                    name,
                    size,
                    replacement.size,
                    replacement.source.display()
                );
                header.set_mtime(replacement.mtime)?;
                header.set_size(replacement.size)?;
                output.write_all(header.as_bytes())?;
                outcome.bytes_written += HEADER_SIZE as u64;
                outcome.bytes_written += write_payload(&mut output, &replacement)?;

                let skipped = skip_bytes(&mut source, padded_size(size))?;
                if skipped < size {
                    return Err(Error::TruncatedMember {
                        name,
                        expected: size,
                        actual: skipped,
                    });
                }
                outcome.members_replaced += 1;
            }
            None => {
                output.write_all(header.as_bytes())?;
                let copied = copy_bytes(&mut source, &mut output, size)?;
                if copied != size {
                    return Err(Error::TruncatedMember {
                        name,
                        expected: size,
                        actual: copied,
                    });
                }
                let mut written = HEADER_SIZE as u64 + copied;
                if size & 1 == 1 {
                    if copy_bytes(&mut source, &mut output, 1)? == 0 {
                        log::debug!("Member '{}' has no pad byte, adding one", name);
                        output.write_all(&[PAD_BYTE])?;
                    }
                    written += 1;
                }
                outcome.bytes_written += written;
                outcome.members_copied += 1;
            }
        }

        offset += HEADER_SIZE as u64 + padded_size(size);
    }

    outcome.remaining = replacements;
    Ok(outcome)
}

/// Writes each replacement in `members` as a new member, in set order.
///
/// New headers carry uid `0`, gid `0` and mode `100644`. Returns the number
/// of bytes written.
///
/// # Errors
///
/// Returns [`Error::ShortRead`] if a source is shorter than its recorded
/// size, and [`Error::FieldOverflow`] if a size does not fit the header.
pub fn append_members<W: Write>(mut output: W, members: &ReplacementSet) -> Result<u64> {
    let mut written = 0;
    for replacement in members {
        log::debug!(
            "Appending new member '{}' ({} bytes) from '{}'",
            replacement.target,
            replacement.size,
            replacement.source.display()
        );
        let header = MemberHeader::new(&replacement.target, replacement.mtime, replacement.size)?;
        output.write_all(header.as_bytes())?;
        written += HEADER_SIZE as u64;
        written += write_payload(&mut output, replacement)?;
    }
    Ok(written)
}

/// Streams exactly `replacement.size` bytes from the source file, then the
/// pad byte if needed.
fn write_payload<W: Write>(output: &mut W, replacement: &Replacement) -> Result<u64> {
    let file = File::open(&replacement.source)?;
    let mut reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);
    let copied = copy_bytes(&mut reader, output, replacement.size)?;
    if copied != replacement.size {
        return Err(Error::ShortRead {
            path: replacement.source.clone(),
            expected: replacement.size,
            actual: copied,
        });
    }
    Ok(copied + write_padding(output, replacement.size)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemberName;
    use std::io::{Cursor, Write as _};

    fn header(name: &str, size: u64) -> Vec<u8> {
        let h = MemberHeader::new(&MemberName::new(name).unwrap(), 1_500_000_000, size).unwrap();
        h.as_bytes().to_vec()
    }

    fn archive(members: &[(&str, &str)]) -> Vec<u8> {
        let mut bytes = MAGIC.to_vec();
        for (name, data) in members {
            bytes.extend(header(name, data.len() as u64));
            bytes.extend_from_slice(data.as_bytes());
            if data.len() % 2 == 1 {
                bytes.push(PAD_BYTE);
            }
        }
        bytes
    }

    fn source_file(data: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(data).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_identity_without_replacements() {
        let input = archive(&[("debian-binary", "2.0\n"), ("odd", "abc")]);
        let mut output = Vec::new();
        let outcome = rewrite(Cursor::new(&input), &mut output, ReplacementSet::new()).unwrap();
        assert_eq!(output, input);
        assert_eq!(outcome.members_copied, 2);
        assert_eq!(outcome.bytes_written, input.len() as u64);
        assert!(outcome.remaining.is_empty());
    }

    #[test]
    fn test_replace_keeps_position_and_owner() {
        let mut input = archive(&[("a", "1111"), ("b", "22")]);
        // uid 1000 on the first member
        input[8 + 28..8 + 32].copy_from_slice(b"1000");

        let src = source_file(b"xyz");
        let set: ReplacementSet = [Replacement::new(
            MemberName::new("a").unwrap(),
            src.path(),
            42,
            3,
        )]
        .into_iter()
        .collect();

        let mut output = Vec::new();
        let outcome = rewrite(Cursor::new(&input), &mut output, set).unwrap();
        assert_eq!(outcome.members_replaced, 1);
        assert_eq!(outcome.members_copied, 1);

        let first = MemberHeader::from_bytes(output[8..68].try_into().unwrap());
        assert_eq!(first.name(), b"a");
        assert_eq!(first.mtime(), Some(42));
        assert_eq!(first.size(), Some(3));
        assert_eq!(first.uid(), Some(1000));
        assert_eq!(&output[68..72], b"xyz\n");
        assert_eq!(&output[72..132], &input[72..132]);
    }

    #[test]
    fn test_unmatched_are_returned() {
        let input = archive(&[("a", "1")]);
        let set: ReplacementSet = [Replacement::new(
            MemberName::new("new").unwrap(),
            "/unused",
            0,
            0,
        )]
        .into_iter()
        .collect();
        let outcome = rewrite(Cursor::new(&input), Vec::new(), set).unwrap();
        assert_eq!(outcome.remaining.targets().collect::<Vec<_>>(), vec!["new"]);
    }

    #[test]
    fn test_partial_header_is_error() {
        let mut input = archive(&[("a", "12")]);
        input.extend_from_slice(b"partial");
        let err = rewrite(Cursor::new(&input), Vec::new(), ReplacementSet::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedHeader {
                offset: 70,
                available: 7
            }
        ));
    }

    #[test]
    fn test_bad_terminator_stops_copying() {
        let mut input = archive(&[("a", "12"), ("b", "34")]);
        input[70 + 58] = b'X';
        let mut output = Vec::new();
        let outcome = rewrite(Cursor::new(&input), &mut output, ReplacementSet::new()).unwrap();
        assert_eq!(outcome.members_copied, 1);
        assert_eq!(output, &input[..70]);
    }

    #[test]
    fn test_truncated_member() {
        let mut input = archive(&[("a", "1234")]);
        input.truncate(input.len() - 2);
        let err = rewrite(Cursor::new(&input), Vec::new(), ReplacementSet::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedMember {
                expected: 4,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_short_source_is_error() {
        let input = archive(&[("a", "1")]);
        let src = source_file(b"ab");
        let set: ReplacementSet = [Replacement::new(
            MemberName::new("a").unwrap(),
            src.path(),
            0,
            10,
        )]
        .into_iter()
        .collect();
        let err = rewrite(Cursor::new(&input), Vec::new(), set).unwrap_err();
        assert!(matches!(
            err,
            Error::ShortRead {
                expected: 10,
                actual: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_append_members_pads_odd() {
        let src = source_file(b"hello");
        let set: ReplacementSet = [Replacement::new(
            MemberName::new("greeting").unwrap(),
            src.path(),
            7,
            5,
        )]
        .into_iter()
        .collect();
        let mut output = Vec::new();
        let written = append_members(&mut output, &set).unwrap();
        assert_eq!(written, 66);
        assert_eq!(
            &output[..60],
            b"greeting        7           0     0     100644  5         `\n"
        );
        assert_eq!(&output[60..], b"hello\n");
    }
}
