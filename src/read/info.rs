//! Extraction result types.

/// Result of an extraction.
#[must_use = "extract result should be checked to verify members were written"]
#[derive(Debug, Clone, Default)]
pub struct ExtractResult {
    /// Number of members written to disk.
    pub members_extracted: usize,
    /// Number of members skipped (GNU tables, or existing files under
    /// [`OverwritePolicy::Skip`](super::OverwritePolicy::Skip)).
    pub members_skipped: usize,
    /// Total payload bytes written.
    pub bytes_extracted: u64,
    /// Output files, in archive order.
    pub paths: Vec<std::path::PathBuf>,
}

impl ExtractResult {
    /// Returns true if nothing was written.
    pub fn is_empty(&self) -> bool {
        self.members_extracted == 0
    }
}
