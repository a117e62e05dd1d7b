//! Listing and extraction tests.

use std::fs;
use std::io::Cursor;

use debpatch::read::{Archive, ExtractOptions, OverwritePolicy};
use debpatch::{Error, extract, is_archive, list_members};
use tempfile::TempDir;

mod common;
use common::{ArchiveBuilder, BUILD_MTIME, deb_archive};

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_list_deb_members() {
    let temp = TempDir::new().unwrap();
    let path = deb_archive().write_to(temp.path(), "pkg.deb");

    assert!(is_archive(&path));
    assert_eq!(
        list_members(&path).unwrap(),
        vec!["debian-binary", "control.tar.gz", "data.tar.xz"]
    );
}

#[test]
fn test_list_strips_gnu_slash_and_keeps_special_members() {
    let temp = TempDir::new().unwrap();
    let path = ArchiveBuilder::new()
        .member_with("/", 0, 0, 0, "0", [0u8; 4])
        .member_with("//", 0, 0, 0, "0", "long-name-table/\n")
        .member_with("short.o/", 0, 0, 0, "100644", "obj")
        .write_to(temp.path(), "lib.a");

    assert_eq!(list_members(&path).unwrap(), vec!["", "/", "short.o"]);
}

#[test]
fn test_member_metadata() {
    let bytes = ArchiveBuilder::new()
        .member_with("script", 1_234_567_890, 1000, 100, "100755", "#!/bin/sh\n")
        .build();
    let mut archive = Archive::open(Cursor::new(&bytes)).unwrap();
    let member = archive.members().next().unwrap().unwrap();

    assert_eq!(member.name, "script");
    assert_eq!(member.mtime, Some(1_234_567_890));
    assert_eq!(member.uid, Some(1000));
    assert_eq!(member.gid, Some(100));
    assert_eq!(member.mode, Some(0o100755));
    assert_eq!(member.size, 10);
    assert_eq!(member.offset, 8);
    assert_eq!(member.data_offset(), 68);
}

#[test]
fn test_members_restart_on_each_call() {
    let bytes = deb_archive().build();
    let mut archive = Archive::open(Cursor::new(&bytes)).unwrap();

    let first: Vec<_> = archive.members().map(|m| m.unwrap().name).collect();
    let second: Vec<_> = archive.members().map(|m| m.unwrap().name).collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}

#[test]
fn test_read_payload_rejects_wrong_member() {
    let bytes = deb_archive().build();
    let mut archive = Archive::open(Cursor::new(&bytes)).unwrap();
    let mut members = archive.members();

    let first = members.next().unwrap().unwrap();
    let second = members.next().unwrap().unwrap();
    let mut sink = Vec::new();
    assert!(members.read_payload(&first, &mut sink).is_err());
    // A fresh pass reaches the same member
    let mut members = archive.members();
    let _ = members.next();
    let again = members.next().unwrap().unwrap();
    assert_eq!(again, second);
    members.read_payload(&again, &mut sink).unwrap();
    assert_eq!(sink, b"control-tarball-bytes");
}

#[test]
fn test_is_archive_on_non_archives() {
    let temp = TempDir::new().unwrap();
    let text = temp.path().join("text");
    fs::write(&text, "hello, world").unwrap();
    let empty = temp.path().join("empty");
    fs::write(&empty, "").unwrap();

    assert!(!is_archive(&text));
    assert!(!is_archive(&empty));
    assert!(!is_archive(temp.path().join("missing")));
    assert!(list_members(&text).unwrap().is_empty());
}

// =============================================================================
// Extraction
// =============================================================================

#[test]
fn test_extract_all() {
    let temp = TempDir::new().unwrap();
    let path = deb_archive().write_to(temp.path(), "pkg.deb");
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();

    let result = extract(&path, None, &out).unwrap();
    assert_eq!(result.members_extracted, 3);
    assert_eq!(result.bytes_extracted, 4 + 21 + 1001);
    assert_eq!(fs::read(out.join("debian-binary")).unwrap(), b"2.0\n");
    assert_eq!(
        fs::read(out.join("control.tar.gz")).unwrap(),
        b"control-tarball-bytes"
    );
    assert_eq!(fs::read(out.join("data.tar.xz")).unwrap(), vec![0xFDu8; 1001]);
}

#[test]
fn test_extract_single_member_after_odd_payload() {
    let temp = TempDir::new().unwrap();
    let path = ArchiveBuilder::new()
        .member("odd", "abc")
        .member("wanted", "payload")
        .member("after", "zz")
        .write_to(temp.path(), "a.a");

    let result = extract(&path, Some("wanted"), temp.path()).unwrap();
    assert_eq!(result.members_extracted, 1);
    assert_eq!(result.paths, vec![temp.path().join("wanted")]);
    assert_eq!(fs::read(temp.path().join("wanted")).unwrap(), b"payload");
    assert!(!temp.path().join("odd").exists());
    assert!(!temp.path().join("after").exists());
}

#[test]
fn test_extract_first_of_duplicates() {
    let temp = TempDir::new().unwrap();
    let path = ArchiveBuilder::new()
        .member("dup", "first")
        .member("dup", "second")
        .write_to(temp.path(), "a.a");

    let _ = extract(&path, Some("dup"), temp.path()).unwrap();
    assert_eq!(fs::read(temp.path().join("dup")).unwrap(), b"first");
}

#[test]
fn test_extract_missing_member() {
    let temp = TempDir::new().unwrap();
    let path = deb_archive().write_to(temp.path(), "pkg.deb");

    let err = extract(&path, Some("nope"), temp.path()).unwrap_err();
    assert!(matches!(err, Error::MemberNotFound { .. }));
    assert_eq!(err.member_name(), Some("nope"));
}

#[test]
fn test_extract_non_archive_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("plain");
    fs::write(&path, "definitely not an archive").unwrap();

    let err = extract(&path, None, temp.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidFormat(_)));
}

#[test]
fn test_extract_all_skips_gnu_tables() {
    let temp = TempDir::new().unwrap();
    let path = ArchiveBuilder::new()
        .member_with("/", 0, 0, 0, "0", [0u8; 4])
        .member("real.o", "obj")
        .write_to(temp.path(), "lib.a");
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();

    let result = extract(&path, None, &out).unwrap();
    assert_eq!(result.members_extracted, 1);
    assert_eq!(result.members_skipped, 1);
    assert_eq!(fs::read_dir(&out).unwrap().count(), 1);
}

#[test]
fn test_extract_rejects_unsafe_names() {
    let temp = TempDir::new().unwrap();
    let path = ArchiveBuilder::new()
        .member("..", "escape")
        .write_to(temp.path(), "evil.a");
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();

    let err = extract(&path, None, &out).unwrap_err();
    assert!(matches!(err, Error::UnsafeMemberName { .. }));
    assert!(err.is_validation_error());
}

#[test]
fn test_extract_preserves_mtime() {
    let temp = TempDir::new().unwrap();
    let path = deb_archive().write_to(temp.path(), "pkg.deb");
    let out = temp.path().join("out");
    fs::create_dir(&out).unwrap();

    let mut archive = Archive::open_path(&path).unwrap();
    let options = ExtractOptions::new().preserve_mtime(true);
    let _ = archive
        .extract(Some("debian-binary"), &out, &options)
        .unwrap();

    let metadata = fs::metadata(out.join("debian-binary")).unwrap();
    let mtime = filetime::FileTime::from_last_modification_time(&metadata);
    assert_eq!(mtime.unix_seconds(), BUILD_MTIME as i64);
}

#[test]
fn test_extract_overwrite_policies() {
    let temp = TempDir::new().unwrap();
    let path = deb_archive().write_to(temp.path(), "pkg.deb");
    let existing = temp.path().join("debian-binary");
    fs::write(&existing, "old").unwrap();

    let mut archive = Archive::open_path(&path).unwrap();

    let skip = ExtractOptions::new().overwrite(OverwritePolicy::Skip);
    let result = archive
        .extract(Some("debian-binary"), temp.path(), &skip)
        .unwrap();
    assert!(result.is_empty());
    assert_eq!(result.members_skipped, 1);
    assert_eq!(fs::read(&existing).unwrap(), b"old");

    let error = ExtractOptions::new().overwrite(OverwritePolicy::Error);
    let err = archive
        .extract(Some("debian-binary"), temp.path(), &error)
        .unwrap_err();
    assert!(err.is_io_error());

    let result = archive
        .extract(Some("debian-binary"), temp.path(), &ExtractOptions::default())
        .unwrap();
    assert_eq!(result.members_extracted, 1);
    assert_eq!(fs::read(&existing).unwrap(), b"2.0\n");
}

#[test]
fn test_read_member_large_payload() {
    let payload: Vec<u8> = (0..100_001u32).map(|i| (i % 251) as u8).collect();
    let bytes = ArchiveBuilder::new()
        .member("big", &payload)
        .member("tail", "t")
        .build();
    let mut archive = Archive::open(Cursor::new(&bytes)).unwrap();
    assert_eq!(archive.read_member("big").unwrap(), payload);
    assert_eq!(archive.read_member("tail").unwrap(), b"t");
}
