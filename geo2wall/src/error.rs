use std::path::PathBuf;
use thiserror::Error;

/// Result type for wall extraction
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading geometry files and extracting walls
#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Unsupported or corrupt geometry file {}: {reason}", path.display())]
    Format {
        path: PathBuf,
        reason: String,
        /// Reader error behind the failure, if a format crate reported one
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Layer '{layer}' not found in {}", path.display())]
    LayerNotFound { path: PathBuf, layer: String },

    /// Only ever logged; a degenerate feature is skipped, never fatal.
    #[error("Degenerate geometry in feature '{feature}': {points} distinct point(s)")]
    DegenerateGeometry { feature: String, points: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Format {
            path: path.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// A format failure reported by one of the file readers
    pub(crate) fn reader(
        path: impl Into<PathBuf>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Error::Format {
            path: path.into(),
            reason: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
