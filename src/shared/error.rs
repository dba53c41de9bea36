use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow build systems to distinguish between an empty
/// inventory, bad arguments and genuine failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the bill of materials was produced
    Success = 0,
    /// No library could be identified and `--fail-on-empty` was given
    NoLibrariesIdentified = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (unsupported platform, file I/O error, etc.)
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
            ExitCode::NoLibrariesIdentified => write!(f, "No Libraries Identified (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while locating, walking and identifying native libraries.
///
/// Every variant except [`BomError::UnsupportedPlatform`] describes a
/// per-artifact failure: it is logged and the artifact is skipped, the run
/// continues.
#[derive(Debug, Error)]
pub enum BomError {
    #[error("Cannot find library '{reference}' on any of {searched} search path(s)")]
    NotFound { reference: String, searched: usize },

    #[error("No collector could identify {path}")]
    UnidentifiedArtifact { path: PathBuf },

    #[error("Required tool '{tool}' is not installed or not on PATH")]
    ToolUnavailable { tool: String },

    #[error("Unexpected output from '{tool}': {details}")]
    MalformedToolOutput { tool: String, details: String },

    #[error("Library resolution is not supported on {platform}\n\n💡 Hint: Only Linux and macOS hosts can be inspected")]
    UnsupportedPlatform { platform: String },

    #[error("Command '{command}' failed: {details}")]
    CommandFailed { command: String, details: String },

    #[error("Command '{command}' did not finish within {timeout:?} and was killed")]
    CommandTimedOut { command: String, timeout: Duration },

    #[error("Invalid package coordinate '{input}': {reason}")]
    InvalidCoordinate { input: String, reason: String },

    #[error("Failed to read file: {path}\nDetails: {details}")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid scan path: {path}\nReason: {reason}\n\n💡 Hint: Please specify an existing directory")]
    InvalidScanPath { path: PathBuf, reason: String },

    /// Validation error for configuration and requests
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl BomError {
    /// Whether this error must abort the whole run instead of a single artifact.
    pub fn is_fatal(&self) -> bool {
        matches!(self, BomError::UnsupportedPlatform { .. })
    }

    /// Returns true when `err` wraps a fatal [`BomError`].
    pub fn is_fatal_error(err: &anyhow::Error) -> bool {
        err.downcast_ref::<BomError>()
            .map(BomError::is_fatal)
            .unwrap_or(false)
    }
}
