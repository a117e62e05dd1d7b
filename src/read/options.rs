//! Extraction options.

/// Policy for handling existing files during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Return an error if the file exists.
    Error,
    /// Skip files that already exist.
    Skip,
    /// Overwrite existing files.
    #[default]
    Overwrite,
}

/// Options for [`Archive::extract`](super::Archive::extract).
///
/// # Example
///
/// ```rust
/// use debpatch::read::{ExtractOptions, OverwritePolicy};
///
/// let options = ExtractOptions::new()
///     .overwrite(OverwritePolicy::Skip)
///     .preserve_mtime(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// What to do when the output file already exists.
    pub overwrite: OverwritePolicy,
    /// Set the extracted file's modification time from the member header.
    pub preserve_mtime: bool,
}

impl ExtractOptions {
    /// Creates default options: overwrite existing files, do not touch
    /// timestamps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overwrite policy.
    pub fn overwrite(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite = policy;
        self
    }

    /// Sets whether member modification times are applied to output files.
    pub fn preserve_mtime(mut self, preserve: bool) -> Self {
        self.preserve_mtime = preserve;
        self
    }
}
