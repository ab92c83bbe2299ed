//! # draw2pdf
//!
//! An incremental PDF writer for plots and drawings: lines, polygons,
//! rectangles, single-font text and raster images, written page by page to
//! any [`std::io::Write`] destination.
//!
//! Nothing is buffered beyond the page being drawn. Each page's objects are
//! written as soon as the next page starts, and the page tree, the
//! cross-reference table and the trailer are written when the document is
//! closed (or dropped).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use draw2pdf::{Color, Document, FillStyle, LineStyle, Point, RasterImage, Rectangle, Result};
//!
//! # fn main() -> Result<()> {
//! let letter = Rectangle::from_position_and_size(0.0, 0.0, 612.0, 792.0);
//! let mut doc = Document::create("plot.pdf", letter)?;
//!
//! doc.set_line_style(LineStyle::new(Color::black(), 1.0));
//! doc.set_fill_style(FillStyle::new(Color::rgb(0.9, 0.9, 1.0)));
//! doc.draw_rectangle(&Rectangle::from_position_and_size(72.0, 72.0, 468.0, 648.0));
//! doc.draw_text(Point::new(80.0, 700.0), "Results");
//!
//! doc.next_page()?;
//! let gradient: Vec<u8> = (0..=255).collect();
//! doc.draw_image(RasterImage::gray(16, 16, gradient)?, 72.0, 72.0, 144.0, 144.0)?;
//!
//! doc.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`document`] - the writing session and page lifecycle
//! - [`graphics`] - colors, styles, content-stream operators and raster images
//! - [`writer`] - low-level object serialization, cross-reference table and
//!   session configuration
//! - [`objects`] - the PDF value model
//! - [`ascii85`] - printable base-85 encoding of binary data
//! - [`compression`] - the deflate collaborator
//!
//! ## Features
//!
//! - `compression` (default): Flate compression through `flate2`. Without it
//!   images are always ASCII85-encoded and content streams are uncompressed.

pub mod accumulator;
pub mod ascii85;
pub mod compression;
pub mod document;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod objects;
pub mod page;
pub mod writer;

pub use accumulator::StreamAccumulator;
pub use compression::Compressor;
#[cfg(feature = "compression")]
pub use compression::FlateCompressor;
pub use document::{Document, DocumentMetadata};
pub use error::{ErrorKind, PdfError, Result};
pub use geometry::{Point, Rectangle};
pub use graphics::{
    Color, ContentStream, FillStyle, ImageCodec, LineStyle, Operator, Pattern, PixelFormat,
    RasterImage, TextStyle,
};
pub use writer::{CompressionFailurePolicy, FixedIdSource, IdSource, RandomIdSource, WriterConfig};

/// Current version of draw2pdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
