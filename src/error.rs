use thiserror::Error;

/// Errors that can occur while reading or writing the archive
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize archive: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to deserialize archive: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("No archive stored under key {0:?}")]
    MissingArchive(&'static str),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Errors that can occur while exporting the canvas to PNG
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: bounds are empty")]
    EmptyBounds,

    #[error("Export of {width}x{height} px exceeds the {max} px limit")]
    TooLarge { width: u32, height: u32, max: u32 },

    #[error("Failed to encode PNG: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to write PNG: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
