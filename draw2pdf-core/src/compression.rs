//! Compression utilities for PDF streams
//!
//! The deflate implementation is an external collaborator reached through
//! the [`Compressor`] trait, so callers can swap it out (tests use this to
//! inject failures).

use crate::error::{PdfError, Result};

/// A deflate-style compressor producing data for the `FlateDecode` filter.
pub trait Compressor: Send + Sync {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// Zlib compressor backed by `flate2`.
#[cfg(feature = "compression")]
#[derive(Debug, Clone, Copy)]
pub struct FlateCompressor {
    level: u32,
}

#[cfg(feature = "compression")]
impl FlateCompressor {
    /// Creates a compressor with the given level (0-9, clamped).
    pub fn new(level: u32) -> Self {
        Self {
            level: level.min(9),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

#[cfg(feature = "compression")]
impl Default for FlateCompressor {
    fn default() -> Self {
        Self::new(6)
    }
}

#[cfg(feature = "compression")]
impl Compressor for FlateCompressor {
    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        use flate2::write::ZlibEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut encoder = ZlibEncoder::new(
            Vec::with_capacity(data.len() / 2 + 64),
            Compression::new(self.level),
        );
        encoder
            .write_all(data)
            .map_err(|e| PdfError::CompressionFailed(e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| PdfError::CompressionFailed(e.to_string()))
    }
}

/// Compress data using Flate/Zlib compression with the default level
#[cfg(feature = "compression")]
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    FlateCompressor::default().compress(data)
}

/// Decompress data using Flate/Zlib decompression
#[cfg(feature = "compression")]
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| PdfError::CompressionFailed(e.to_string()))?;
    Ok(decompressed)
}
