//! Fuzz target for member iteration and rewriting with arbitrary input.
//!
//! Run with: cargo +nightly fuzz run members
//!
//! Listing, payload reads and a no-op rewrite must never panic or hang,
//! whatever the bytes after the magic look like.

#![no_main]

use debpatch::edit::{ReplacementSet, rewrite};
use debpatch::read::Archive;
use libfuzzer_sys::fuzz_target;
use std::io::{Cursor, sink};

fuzz_target!(|data: &[u8]| {
    if let Ok(mut archive) = Archive::open(Cursor::new(data)) {
        let mut members = archive.members();
        while let Some(Ok(member)) = members.next() {
            let _ = member.is_special();
            if members.read_payload(&member, &mut sink()).is_err() {
                break;
            }
        }
    }

    // A successful identity rewrite reproduces a prefix of the input,
    // except for a missing final pad byte which is restored.
    let mut output = Vec::new();
    if rewrite(Cursor::new(data), &mut output, ReplacementSet::new()).is_ok() {
        let common = output.len().min(data.len());
        assert_eq!(&output[..common], &data[..common]);
        assert!(output.len() <= data.len() + 1);
    }
});
