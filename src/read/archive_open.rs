//! Archive opening.

use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::Result;
use crate::format::reader::read_magic;

use super::{Archive, Members};

impl<R: Read + Seek> Archive<R> {
    /// Opens an archive from a seekable reader.
    ///
    /// The reader is rewound and the 8-byte magic checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidFormat`](crate::Error::InvalidFormat) if the
    /// stream does not start with `!<arch>\n`.
    pub fn open(mut reader: R) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;
        read_magic(&mut reader)?;
        Ok(Self { reader })
    }

    /// Returns an iterator over the members, starting from the first.
    ///
    /// Each call restarts at the beginning of the archive.
    pub fn members(&mut self) -> Members<'_, R> {
        Members::new(&mut self.reader)
    }

    /// Consumes the archive and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl Archive<BufReader<File>> {
    /// Opens an archive file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened, or
    /// [`Error::InvalidFormat`](crate::Error::InvalidFormat) if it is not an
    /// `ar` archive.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening archive '{}'", path.display());
        let file = File::open(path)?;
        Self::open(BufReader::new(file))
    }
}
