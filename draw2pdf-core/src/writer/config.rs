//! Session configuration
//!
//! A [`WriterConfig`] carries everything a [`Document`](crate::Document)
//! needs besides its destination and page size. It is cheap to clone and can
//! be reused for any number of sessions.

use crate::compression::Compressor;
use chrono::Utc;
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// What to do when the compressor reports an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionFailurePolicy {
    /// Log a warning and write the data with the uncompressed encoding
    /// (ASCII85 for images, raw bytes for page content).
    #[default]
    Fallback,
    /// Return [`PdfError::CompressionFailed`](crate::PdfError::CompressionFailed).
    Fail,
}

/// Source of the 16-byte file identifier written to the trailer's `/ID`.
pub trait IdSource: Send + Sync {
    fn document_id(&self) -> [u8; 16];
}

/// Timestamp in the high half, random bytes in the low half.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
    fn document_id(&self) -> [u8; 16] {
        let mut id = [0u8; 16];
        let now = Utc::now();
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros());
        id[..8].copy_from_slice(&nanos.to_be_bytes());
        rand::thread_rng().fill(&mut id[8..]);
        id
    }
}

/// Always returns the same identifier; makes output byte-for-byte
/// reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedIdSource(pub [u8; 16]);

impl IdSource for FixedIdSource {
    fn document_id(&self) -> [u8; 16] {
        self.0
    }
}

#[derive(Clone)]
pub struct WriterConfig {
    /// Encode image payloads with the compressor instead of ASCII85.
    pub compress_images: bool,
    /// Compress page content streams.
    pub compress_content: bool,
    pub compression_failure: CompressionFailurePolicy,
    /// Version written to the `%PDF-` header line.
    pub pdf_version: String,
    /// Name written to the generator comment line.
    pub generator: String,
    /// `None` makes every compression request take the failure path.
    pub compressor: Option<Arc<dyn Compressor>>,
    pub id_source: Arc<dyn IdSource>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compress_images: false,
            compress_content: false,
            compression_failure: CompressionFailurePolicy::default(),
            pdf_version: "1.4".to_string(),
            generator: "draw2pdf".to_string(),
            compressor: default_compressor(),
            id_source: Arc::new(RandomIdSource),
        }
    }
}

#[cfg(feature = "compression")]
fn default_compressor() -> Option<Arc<dyn Compressor>> {
    Some(Arc::new(crate::compression::FlateCompressor::default()))
}

#[cfg(not(feature = "compression"))]
fn default_compressor() -> Option<Arc<dyn Compressor>> {
    None
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image_compression(mut self, enabled: bool) -> Self {
        self.compress_images = enabled;
        self
    }

    pub fn with_content_compression(mut self, enabled: bool) -> Self {
        self.compress_content = enabled;
        self
    }

    pub fn with_compression_failure(mut self, policy: CompressionFailurePolicy) -> Self {
        self.compression_failure = policy;
        self
    }

    pub fn with_pdf_version(mut self, version: impl Into<String>) -> Self {
        self.pdf_version = version.into();
        self
    }

    pub fn with_generator(mut self, generator: impl Into<String>) -> Self {
        self.generator = generator.into();
        self
    }

    pub fn with_compressor(mut self, compressor: Arc<dyn Compressor>) -> Self {
        self.compressor = Some(compressor);
        self
    }

    pub fn without_compressor(mut self) -> Self {
        self.compressor = None;
        self
    }

    pub fn with_id_source(mut self, source: Arc<dyn IdSource>) -> Self {
        self.id_source = source;
        self
    }
}

impl fmt::Debug for WriterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterConfig")
            .field("compress_images", &self.compress_images)
            .field("compress_content", &self.compress_content)
            .field("compression_failure", &self.compression_failure)
            .field("pdf_version", &self.pdf_version)
            .field("generator", &self.generator)
            .field("compressor", &self.compressor.is_some())
            .finish_non_exhaustive()
    }
}
