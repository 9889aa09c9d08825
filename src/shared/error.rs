use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow batch schedulers to distinguish a clean run from one
/// where individual releases had to be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - every release completed its pipeline run
    Success = 0,
    /// The batch finished but at least one release was aborted
    ReleasesAborted = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (config error, release feed failure, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ReleasesAborted => write!(f, "Releases Aborted (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the release audit pipeline.
///
/// Stage adapters return these (wrapped in `anyhow::Error`) so the controller
/// can tell which stage a release was aborted in.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Failed to fetch releases for {repository}\nDetails: {details}\n\n💡 Hint: Check the repository name and, for private repositories, the GITHUB_TOKEN environment variable")]
    ReleaseFeedError { repository: String, details: String },

    #[error("Failed to download release artifact: {url}\nDetails: {details}\n\n💡 Hint: The tarball URL may be stale or the host unreachable")]
    DownloadFailed { url: String, details: String },

    #[error("Failed to extract release artifact: {path}\nDetails: {details}\n\n💡 Hint: The downloaded file may be truncated or not a gzip-compressed tar archive")]
    ExtractionFailed { path: PathBuf, details: String },

    #[error("External tool '{tool}' failed ({status})\nDetails: {stderr}\n\n💡 Hint: Run the tool manually to inspect its diagnostics")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("External tool '{tool}' produced unusable output: {path}\nDetails: {details}")]
    MalformedToolOutput {
        tool: String,
        path: PathBuf,
        details: String,
    },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid directory")]
    InvalidPath { path: PathBuf, reason: String },

    /// Validation error for value objects and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
