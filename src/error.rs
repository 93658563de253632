//! Fotobox Gallery - Error Types

use thiserror::Error;

/// Result type for gallery operations
pub type GalleryResult<T> = Result<T, GalleryError>;

/// Gallery error types
#[derive(Error, Debug)]
pub enum GalleryError {
    // ═══════════════════════════════════════════════════════════════
    // NOT-FOUND ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    #[error("Folder not found: {0}")]
    PartitionNotFound(String),

    #[error("No trashed photo named: {0}")]
    TrashEntryNotFound(String),

    // ═══════════════════════════════════════════════════════════════
    // FILE ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    // ═══════════════════════════════════════════════════════════════
    // METADATA ERRORS
    // ═══════════════════════════════════════════════════════════════

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl GalleryError {
    /// Check if this error means the requested thing simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GalleryError::PhotoNotFound(_)
                | GalleryError::PartitionNotFound(_)
                | GalleryError::TrashEntryNotFound(_)
        )
    }
}

impl From<serde_json::Error> for GalleryError {
    fn from(e: serde_json::Error) -> Self {
        GalleryError::SerializationError(e.to_string())
    }
}
