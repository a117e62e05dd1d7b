//! Sequential member iteration.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::format::reader::{HeaderRead, copy_bytes, read_header, skip_bytes};
use crate::format::{HEADER_SIZE, MAGIC, padded_size};
use crate::{Error, Result};

use super::Member;

/// Iterator over the members of an archive.
///
/// Each step reads one 60-byte header and then seeks past the payload (and
/// pad byte) without reading it, unless the caller asked for the payload
/// with [`read_payload`](Self::read_payload) in between.
///
/// Iteration ends without an error at a clean end of file, at a partial
/// header, or at a header whose terminator is wrong; real-world archives
/// sometimes carry trailing garbage. A correctly terminated header with an
/// unreadable size field yields [`Error::CorruptHeader`] and ends iteration.
pub struct Members<'a, R> {
    reader: &'a mut R,
    /// Offset of the next header.
    offset: u64,
    /// Payload and pad bytes of the current member not yet consumed.
    pending: u64,
    /// The current member's declared size while its payload is unread.
    current_size: Option<u64>,
    started: bool,
    done: bool,
}

impl<'a, R: Read + Seek> Members<'a, R> {
    pub(crate) fn new(reader: &'a mut R) -> Self {
        Self {
            reader,
            offset: MAGIC.len() as u64,
            pending: 0,
            current_size: None,
            started: false,
            done: false,
        }
    }

    /// Copies the payload of the member most recently returned by `next`
    /// into `w`, then consumes its pad byte.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TruncatedMember`] if the archive ends before the
    /// declared size, and an I/O error if the payload was already consumed
    /// or no member has been returned yet.
    pub fn read_payload<W: Write>(&mut self, member: &Member, w: &mut W) -> Result<u64> {
        let size = match self.current_size.take() {
            Some(size) if size == member.size => size,
            _ => {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("payload of '{}' is not at the current position", member.name),
                )));
            }
        };

        let copied = copy_bytes(&mut *self.reader, w, size)?;
        if copied != size {
            self.done = true;
            return Err(Error::TruncatedMember {
                name: member.name.clone(),
                expected: size,
                actual: copied,
            });
        }
        skip_bytes(&mut *self.reader, size & 1)?;
        self.pending = 0;
        Ok(copied)
    }

    fn advance(&mut self) -> Result<Option<Member>> {
        if !self.started {
            self.reader.seek(SeekFrom::Start(self.offset))?;
            self.started = true;
        }
        if self.pending > 0 {
            let skip = i64::try_from(self.pending)
                .map_err(|_| Error::corrupt_header(self.offset, "member size out of range"))?;
            self.reader.seek_relative(skip)?;
            self.pending = 0;
        }
        self.current_size = None;

        let header = match read_header(&mut *self.reader)? {
            HeaderRead::Header(header) => header,
            HeaderRead::End => return Ok(None),
            HeaderRead::Partial(n) => {
                log::warn!(
                    "Ignoring {} trailing bytes at offset {:#x}",
                    n,
                    self.offset
                );
                return Ok(None);
            }
        };

        if !header.is_terminated() {
            log::warn!(
                "Bad ar header at offset {:#x}, treating archive as complete",
                self.offset
            );
            return Ok(None);
        }

        let size = header.size().ok_or_else(|| {
            Error::corrupt_header(self.offset, "size field is not a decimal number")
        })?;

        let member = Member::from_header(&header, size, self.offset);
        log::debug!(
            "Member '{}' at {:#x}, {} bytes",
            member.name,
            member.offset,
            member.size
        );

        self.pending = padded_size(size);
        self.current_size = Some(size);
        self.offset += HEADER_SIZE as u64 + self.pending;
        Ok(Some(member))
    }
}

impl<R: Read + Seek> Iterator for Members<'_, R> {
    type Item = Result<Member>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.advance() {
            Ok(Some(member)) => Some(Ok(member)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read + Seek> std::iter::FusedIterator for Members<'_, R> {}
