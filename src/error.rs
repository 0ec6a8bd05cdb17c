use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode {name}: {source}")]
    DecodeFailure {
        name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Target encoder unavailable: {0}")]
    EncodeUnsupported(String),

    #[error("Archive generation failed: {0}")]
    ArchiveGeneration(String),

    #[error("A batch is already being processed")]
    BatchInProgress,

    #[error("Processing task failed: {0}")]
    TaskFailed(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),

    #[error("Walkdir error: {0}")]
    WalkdirError(#[from] walkdir::Error),
}

impl From<zip::result::ZipError> for CompressionError {
    fn from(err: zip::result::ZipError) -> Self {
        CompressionError::ArchiveGeneration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CompressionError>;
