/// Convenience result type used across Lumina.
pub type LuminaResult<T> = Result<T, LuminaError>;

/// Top-level error taxonomy used by capture, compositing and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum LuminaError {
    /// Invalid user-provided data (catalog entries, canvas sizes, session misuse).
    #[error("validation error: {0}")]
    Validation(String),

    /// No capturable video frame (permission denied, stream absent, decode failure).
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// Unknown frame asset id.
    #[error("frame asset not found: {0}")]
    NotFound(String),

    /// A frame asset failed to load or decode.
    #[error("asset load error: {0}")]
    AssetLoad(String),

    /// The requested export path (native share) is not available.
    #[error("export unsupported: {0}")]
    ExportUnsupported(String),

    /// Encoding or persisting an export failed.
    #[error("export error: {0}")]
    Export(String),

    /// The frame generation service failed or returned unusable markup.
    #[error("generation error: {0}")]
    Generation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LuminaError {
    /// Build a [`LuminaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LuminaError::SourceUnavailable`] value.
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Build a [`LuminaError::NotFound`] value.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    /// Build a [`LuminaError::AssetLoad`] value.
    pub fn asset_load(msg: impl Into<String>) -> Self {
        Self::AssetLoad(msg.into())
    }

    /// Build a [`LuminaError::ExportUnsupported`] value.
    pub fn export_unsupported(msg: impl Into<String>) -> Self {
        Self::ExportUnsupported(msg.into())
    }

    /// Build a [`LuminaError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`LuminaError::Generation`] value.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
