use std::io;
use std::path::{Path, PathBuf};

/// Represents the different types of errors that can occur in the dictionary classifier.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// An unrecognized classifier type or other invalid setting
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// Prediction was attempted before a label dictionary was set
    #[error("Label dictionary not initialized")]
    Uninitialized,
    /// A persisted model file is missing
    #[error("Model file not found: {}", .path.display())]
    NotFound { path: PathBuf },
    /// A persisted model file exists but is not valid JSON for its record
    #[error("Invalid JSON in model file {}: {source}", .path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Creating, reading or writing a model file failed
    #[error("I/O failure at {}: {source}", .path.display())]
    IoFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Serializing a prediction report failed
    #[error("Report error: {0}")]
    Report(#[from] csv::Error),
    /// Encoding a label map as JSON failed
    #[error("Failed to encode label map: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl ClassifierError {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::IoFailure {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::CorruptData {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Maps a failed read to `NotFound` when the file is missing, `IoFailure` otherwise.
    pub(crate) fn read(path: impl AsRef<Path>, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            Self::NotFound {
                path: path.as_ref().to_path_buf(),
            }
        } else {
            Self::io(path, source)
        }
    }
}

pub type Result<T, E = ClassifierError> = std::result::Result<T, E>;
