// Error types for playlist generation

use std::path::PathBuf;

use thiserror::Error;

use super::extractors::{diagnose_error, error_summary, BlockingReason};

/// Run-level failures. These are the only errors that abort a run.
#[derive(Debug, Error)]
pub enum PlaylistError {
    /// The links file does not exist
    #[error("Missing {}", .0.display())]
    InputMissing(PathBuf),

    /// Reading the links file or writing the playlist failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The generation timestamp could not be formatted
    #[error("Timestamp error: {0}")]
    Timestamp(String),
}

/// Per-entry extraction failures. Never fatal: the entry is listed offline.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    /// yt-dlp ran and reported a definitive error for this resource
    #[error("{}: {message}", .reason.description())]
    Reported {
        reason: BlockingReason,
        message: String,
    },

    /// yt-dlp or python not found in system
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Failed to parse yt-dlp JSON output
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Command could not be spawned or timed out
    #[error("Execution error: {0}")]
    ExecutionError(String),

    /// Unknown error with details
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ExtractError {
    /// Whether the extraction tool itself reported a verdict on the resource
    /// (not live, region-blocked, removed), as opposed to an internal failure.
    pub fn is_definitive(&self) -> bool {
        matches!(self, Self::Reported { .. })
    }

    /// Diagnosed blocking reason, if yt-dlp reported one
    pub fn reason(&self) -> Option<BlockingReason> {
        match self {
            Self::Reported { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}

// yt-dlp stderr -> classified error
impl From<String> for ExtractError {
    fn from(stderr: String) -> Self {
        if stderr.contains("No module named yt_dlp") || stderr.contains("command not found") {
            return Self::ToolNotFound(stderr.trim().to_string());
        }

        // An `ERROR:` line is yt-dlp's own verdict; anything else is a crash or noise
        match error_summary(&stderr) {
            Some(message) => Self::Reported {
                reason: diagnose_error(&message).unwrap_or(BlockingReason::Unknown),
                message,
            },
            None if stderr.trim().is_empty() => {
                Self::Unknown("yt-dlp exited without an error message".to_string())
            }
            None => Self::Unknown(stderr.trim().to_string()),
        }
    }
}
