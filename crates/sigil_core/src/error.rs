use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("Invalid source type: {0}")]
    InvalidSourceType(String),

    #[error("Stream is not readable at offset {offset}")]
    UnreadableStream { offset: u64 },

    #[error("Failed to read {length} bytes at offset {offset}: {source}")]
    ReadFailure {
        offset: u64,
        length: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to restore cursor to position {position}: {source}")]
    CursorRestoreFailure {
        position: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to rewind source: {0}")]
    RewindFailure(#[source] std::io::Error),

    #[error(
        "Invalid image{}: {reason}",
        .path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default()
    )]
    InvalidImage {
        path: Option<PathBuf>,
        reason: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DetectError {
    /// True when the source may have been left at an unknown position.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DetectError::CursorRestoreFailure { .. } | DetectError::RewindFailure(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, DetectError>;
