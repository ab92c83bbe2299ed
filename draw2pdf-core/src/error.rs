use std::panic::Location;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Failed opening {} for writing (at {location}): {source}", path.display())]
    DestinationOpenFailed {
        path: PathBuf,
        location: &'static Location<'static>,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Compression error: {0}")]
    CompressionFailed(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Invalid PDF structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid document state: {0}")]
    InvalidState(String),
}

/// Fieldless discriminant of [`PdfError`], for callers that only need to
/// tell resource failures apart from format or internal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DestinationOpenFailed,
    Io,
    CompressionFailed,
    InvalidImage,
    EncodingError,
    InvalidStructure,
    InvalidState,
}

impl PdfError {
    /// Builds a [`PdfError::DestinationOpenFailed`] pointing at the caller.
    #[track_caller]
    pub fn destination_open_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PdfError::DestinationOpenFailed {
            path: path.into(),
            location: Location::caller(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PdfError::DestinationOpenFailed { .. } => ErrorKind::DestinationOpenFailed,
            PdfError::Io(_) => ErrorKind::Io,
            PdfError::CompressionFailed(_) => ErrorKind::CompressionFailed,
            PdfError::InvalidImage(_) => ErrorKind::InvalidImage,
            PdfError::EncodingError(_) => ErrorKind::EncodingError,
            PdfError::InvalidStructure(_) => ErrorKind::InvalidStructure,
            PdfError::InvalidState(_) => ErrorKind::InvalidState,
        }
    }

    /// True for failures of the output destination itself, as opposed to
    /// malformed input or internal inconsistencies.
    pub fn is_resource_failure(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DestinationOpenFailed | ErrorKind::Io
        )
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;
