//! Shared test utilities for integration tests.
//!
//! Archives are assembled byte by byte here, independently of the library's
//! own header writer, so tests compare the library against a second
//! implementation of the format.
//!
//! Note: `#![allow(dead_code)]` is required because each integration test file
//! compiles as a separate crate and may only use a subset of these helpers.

#![allow(dead_code)]

use std::io::Cursor;
use std::path::{Path, PathBuf};

use debpatch::Archive;

/// Default mtime used for members built by [`ArchiveBuilder::member`].
pub const BUILD_MTIME: u64 = 1_600_000_000;

/// Formats a 60-byte member header.
pub fn header(name: &str, mtime: u64, uid: u32, gid: u32, mode: &str, size: usize) -> Vec<u8> {
    let text = format!(
        "{:<16}{:<12}{:<6}{:<6}{:<8}{:<10}`\n",
        name, mtime, uid, gid, mode, size
    );
    assert_eq!(text.len(), 60, "test header for '{}' is not 60 bytes", name);
    text.into_bytes()
}

/// Builds archive bytes member by member.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    bytes: Vec<u8>,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveBuilder {
    /// Starts an archive containing only the magic.
    pub fn new() -> Self {
        Self {
            bytes: b"!<arch>\n".to_vec(),
        }
    }

    /// Adds a member with default metadata.
    pub fn member(self, name: &str, data: impl AsRef<[u8]>) -> Self {
        self.member_with(name, BUILD_MTIME, 0, 0, "100644", data)
    }

    /// Adds a member with the given name field and metadata. The name is
    /// written verbatim, so GNU-style `name/` can be produced.
    pub fn member_with(
        mut self,
        name: &str,
        mtime: u64,
        uid: u32,
        gid: u32,
        mode: &str,
        data: impl AsRef<[u8]>,
    ) -> Self {
        let data = data.as_ref();
        self.bytes
            .extend(header(name, mtime, uid, gid, mode, data.len()));
        self.bytes.extend_from_slice(data);
        if data.len() % 2 == 1 {
            self.bytes.push(b'\n');
        }
        self
    }

    /// Appends arbitrary bytes (garbage, partial headers).
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    /// Returns the archive bytes.
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }

    /// Writes the archive to `dir/name` and returns its path.
    pub fn write_to(self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, &self.bytes).expect("Failed to write archive");
        path
    }
}

/// A typical Debian binary package layout.
pub fn deb_archive() -> ArchiveBuilder {
    ArchiveBuilder::new()
        .member("debian-binary", "2.0\n")
        .member("control.tar.gz", b"control-tarball-bytes")
        .member("data.tar.xz", vec![0xFDu8; 1001])
}

/// Writes a source file and returns its path.
pub fn write_source(dir: &Path, name: &str, data: impl AsRef<[u8]>) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("Failed to write source file");
    path
}

/// Sets a file's modification time.
pub fn set_mtime(path: &Path, secs: i64) {
    filetime::set_file_mtime(path, filetime::FileTime::from_unix_time(secs, 0))
        .expect("Failed to set mtime");
}

/// Reads every member of an in-memory archive as (name, payload).
pub fn read_all(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut archive = Archive::open(Cursor::new(bytes)).expect("Failed to open archive");
    let mut members = archive.members();
    let mut out = Vec::new();
    while let Some(member) = members.next() {
        let member = member.expect("Failed to read member");
        let mut data = Vec::new();
        members
            .read_payload(&member, &mut data)
            .expect("Failed to read payload");
        out.push((member.name, data));
    }
    out
}

/// Reads every member of an archive file.
pub fn read_all_path(path: &Path) -> Vec<(String, Vec<u8>)> {
    read_all(&std::fs::read(path).expect("Failed to read archive"))
}
