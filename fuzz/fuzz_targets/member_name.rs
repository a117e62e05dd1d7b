//! Fuzz target for MemberName::new with arbitrary string input.
//!
//! Run with: cargo +nightly fuzz run member_name
//!
//! An accepted name must fit the 16-byte header field and must not contain
//! bytes that would break the header layout or the GNU name convention.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(name) = debpatch::MemberName::new(s) {
        assert_eq!(name.as_str(), s);
        assert!(name.len() <= 16);
        assert!(!name.as_bytes().contains(&b'/'));
        assert!(!name.as_bytes().contains(&0));
        assert!(!name.as_bytes().contains(&b'\n'));
    }
});
