//! Debian control file fields used to name a package file.
//!
//! Only the three fields that make up the canonical `.deb` file name are
//! read; everything else in the control file is ignored.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Package identity taken from a Debian `control` file.
///
/// # Example
///
/// ```rust
/// use debpatch::ControlInfo;
///
/// let info = ControlInfo::parse(
///     "Package: hello\nVersion: 2.10-3\nArchitecture: amd64\nDescription: greeter\n",
/// ).unwrap();
/// assert_eq!(info.deb_file_name(), "hello_2.10-3_amd64.deb");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlInfo {
    /// The `Package` field.
    pub package: String,
    /// The `Version` field.
    pub version: String,
    /// The `Architecture` field.
    pub architecture: String,
}

impl ControlInfo {
    /// Parses control file text.
    ///
    /// Each field must sit on its own line as `Field: value`, where the value
    /// is a single whitespace-free token. Lines that do not match are
    /// skipped, and a later match for the same field wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidControl`] naming the fields that were not found.
    pub fn parse(text: &str) -> Result<Self> {
        let mut package = None;
        let mut version = None;
        let mut architecture = None;

        for line in text.lines() {
            if let Some(value) = field_value(line, "Package") {
                package = Some(value);
            } else if let Some(value) = field_value(line, "Version") {
                version = Some(value);
            } else if let Some(value) = field_value(line, "Architecture") {
                architecture = Some(value);
            }
        }

        log::debug!(
            "Found package {:?}, version {:?}, architecture {:?}",
            package,
            version,
            architecture
        );

        match (package, version, architecture) {
            (Some(package), Some(version), Some(architecture)) => Ok(Self {
                package: package.to_string(),
                version: version.to_string(),
                architecture: architecture.to_string(),
            }),
            (package, version, architecture) => {
                let missing: Vec<&str> = [
                    ("Package", package.is_none()),
                    ("Version", version.is_none()),
                    ("Architecture", architecture.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(Error::InvalidControl(format!(
                    "missing {}",
                    missing.join(", ")
                )))
            }
        }
    }

    /// Reads and parses a control file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or
    /// [`Error::InvalidControl`] as for [`parse`](Self::parse).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        Self::parse(&text).map_err(|e| match e {
            Error::InvalidControl(reason) => {
                Error::InvalidControl(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })
    }

    /// The canonical package file name, `<package>_<version>_<architecture>.deb`.
    pub fn deb_file_name(&self) -> String {
        format!("{}.deb", self)
    }
}

impl fmt::Display for ControlInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.package, self.version, self.architecture)
    }
}

/// Returns the value of `line` if it reads `<field>: <token>`.
fn field_value<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(field)?.strip_prefix(':')?;
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(value), None) => Some(value),
        _ => None,
    }
}
