//! Exit codes for the CLI tool.

use debpatch::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Nothing to do, or completed with warnings
pub const WARNING: i32 = 1;
/// Fatal error occurred
pub const FATAL_ERROR: i32 = 2;
/// Not an ar archive, or a corrupt one
pub const BAD_ARCHIVE: i32 = 3;
/// Rejected input (names, file pairs, control file)
pub const VALIDATION: i32 = 4;
/// I/O error
pub const IO_ERROR: i32 = 5;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;
/// Invalid command line arguments
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)] // UserInterrupt is only used through the raw constant
pub enum ExitCode {
    Success,
    Warning,
    FatalError,
    BadArchive,
    Validation,
    IoError,
    UserInterrupt,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::Warning => WARNING,
            Self::FatalError => FATAL_ERROR,
            Self::BadArchive => BAD_ARCHIVE,
            Self::Validation => VALIDATION,
            Self::IoError => IO_ERROR,
            Self::UserInterrupt => USER_INTERRUPT,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a debpatch error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    if error.is_format_error() {
        ExitCode::BadArchive
    } else if error.is_validation_error() {
        ExitCode::Validation
    } else if error.is_io_error() {
        ExitCode::IoError
    } else {
        // Future error variants - required by #[non_exhaustive]
        ExitCode::FatalError
    }
}
