//! Low-level stream utilities shared by the reader and the editor.

use std::io::{self, Read, Write};

use super::{HEADER_SIZE, MAGIC, MemberHeader, PAD_BYTE};
use crate::{Error, Result};

/// Outcome of trying to read one member header.
#[derive(Debug)]
pub enum HeaderRead {
    /// A full 60-byte header.
    Header(MemberHeader),
    /// The stream ended cleanly before the header.
    End,
    /// The stream ended after this many header bytes.
    Partial(usize),
}

/// Reads into `buf` until it is full or the reader reports EOF.
///
/// Returns the number of bytes read. Unlike [`Read::read_exact`], a short
/// count is not an error, so callers can tell a clean end of stream from a
/// truncated record.
pub fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Reads and checks the 8-byte magic.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the stream is shorter than 8 bytes or
/// does not start with `!<arch>\n`.
pub fn read_magic<R: Read>(r: &mut R) -> Result<()> {
    let mut magic = [0u8; 8];
    let n = read_full(r, &mut magic)?;
    if n < MAGIC.len() || &magic != MAGIC {
        return Err(Error::InvalidFormat(
            "missing !<arch> magic at start of file".into(),
        ));
    }
    Ok(())
}

/// Reads the next member header.
pub fn read_header<R: Read>(r: &mut R) -> io::Result<HeaderRead> {
    let mut bytes = [0u8; HEADER_SIZE];
    let n = read_full(r, &mut bytes)?;
    Ok(match n {
        0 => HeaderRead::End,
        HEADER_SIZE => HeaderRead::Header(MemberHeader::from_bytes(bytes)),
        n => HeaderRead::Partial(n),
    })
}

/// Copies up to `len` bytes from `r` to `w`.
///
/// Returns the number of bytes copied, which is less than `len` only if `r`
/// ran out. Data is streamed through a fixed buffer, so arbitrarily large
/// payloads are copied in bounded memory.
pub fn copy_bytes<R: Read, W: Write>(r: &mut R, w: &mut W, len: u64) -> io::Result<u64> {
    io::copy(&mut r.take(len), w)
}

/// Discards up to `len` bytes from a non-seekable stream.
pub fn skip_bytes<R: Read>(r: &mut R, len: u64) -> io::Result<u64> {
    copy_bytes(r, &mut io::sink(), len)
}

/// Writes the pad byte if `size` is odd. Returns the number of bytes written.
pub fn write_padding<W: Write>(w: &mut W, size: u64) -> io::Result<u64> {
    if size & 1 == 1 {
        w.write_all(&[PAD_BYTE])?;
        Ok(1)
    } else {
        Ok(0)
    }
}
