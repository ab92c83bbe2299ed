use crate::ascii85;
use crate::error::{PdfError, Result};
use crate::geometry::{Point, Rectangle};
use crate::graphics::{FillStyle, ImageCodec, LineStyle, RasterImage, TextStyle};
use crate::objects::{Dictionary, Object, ObjectId, Stream};
use crate::page::PageState;
use crate::writer::{format_pdf_date, CompressionFailurePolicy, ObjectAllocator, PdfWriter, WriterConfig};
use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Metadata written to the document information dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Application that created the original content
    pub creator: Option<String>,
    /// Software that produced the file
    pub producer: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        Self {
            title: None,
            author: None,
            subject: None,
            creator: None,
            producer: Some(format!("draw2pdf v{}", env!("CARGO_PKG_VERSION"))),
            creation_date: None,
        }
    }
}

impl DocumentMetadata {
    /// Metadata with every field unset; no information dictionary is written.
    pub fn empty() -> Self {
        Self {
            producer: None,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.subject.is_none()
            && self.creator.is_none()
            && self.producer.is_none()
            && self.creation_date.is_none()
    }

    fn to_dictionary(&self) -> Dictionary {
        let mut info = Dictionary::new();
        if let Some(ref title) = self.title {
            info.set("Title", title.as_str());
        }
        if let Some(ref author) = self.author {
            info.set("Author", author.as_str());
        }
        if let Some(ref subject) = self.subject {
            info.set("Subject", subject.as_str());
        }
        if let Some(ref creator) = self.creator {
            info.set("Creator", creator.as_str());
        }
        if let Some(ref producer) = self.producer {
            info.set("Producer", producer.as_str());
        }
        if let Some(date) = self.creation_date {
            info.set("CreationDate", format_pdf_date(date));
        }
        info
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Open,
    /// A write failed; the output is unusable.
    Poisoned,
    Finished,
}

/// An open document being written.
///
/// The file is produced incrementally: the header and catalog are written
/// when the document is opened, each page is written when the next one
/// starts, and the page tree, cross-reference table and trailer are written
/// by [`Document::close`]. A document that is dropped without being closed
/// is finalized by its destructor.
///
/// `close` consumes the session; to write another file, open a new
/// `Document` with a clone of the same [`WriterConfig`].
///
/// # Example
///
/// ```rust
/// use draw2pdf::{Document, LineStyle, Color, Point, Rectangle, WriterConfig};
///
/// let page = Rectangle::from_position_and_size(0.0, 0.0, 612.0, 792.0);
/// let mut doc = Document::from_writer(Vec::new(), page, WriterConfig::default())?;
/// doc.set_line_style(LineStyle::new(Color::blue(), 2.0));
/// doc.draw_line(Point::new(72.0, 72.0), Point::new(540.0, 720.0));
/// doc.draw_text(Point::new(72.0, 740.0), "Hello");
///
/// let bytes = doc.close()?;
/// assert!(bytes.starts_with(b"%PDF-1.4\r\n"));
/// assert!(bytes.ends_with(b"%%EOF\r\n"));
/// # Ok::<(), draw2pdf::PdfError>(())
/// ```
pub struct Document<W: Write> {
    writer: Option<PdfWriter<W>>,
    state: SessionState,
    config: WriterConfig,
    metadata: DocumentMetadata,
    allocator: ObjectAllocator,
    page_box: Rectangle,
    catalog_id: ObjectId,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    page: PageState,
    line_style: LineStyle,
    fill_style: FillStyle,
    text_style: TextStyle,
    compress_images: bool,
    compress_content: bool,
    /// Streams written uncompressed because compression failed.
    compression_fallbacks: Cell<usize>,
}

impl Document<BufWriter<File>> {
    /// Creates `path` and opens a document on it with the default
    /// configuration.
    #[track_caller]
    pub fn create(path: impl AsRef<Path>, page_box: Rectangle) -> Result<Self> {
        Self::create_with_config(path, page_box, WriterConfig::default())
    }

    #[track_caller]
    pub fn create_with_config(
        path: impl AsRef<Path>,
        page_box: Rectangle,
        config: WriterConfig,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::create(path) {
            Ok(file) => file,
            Err(err) => return Err(PdfError::destination_open_failed(path, err)),
        };
        tracing::debug!(path = %path.display(), "creating document");
        Self::from_writer(BufWriter::new(file), page_box, config)
    }
}

impl<W: Write> Document<W> {
    /// Opens a document on an arbitrary byte sink.
    ///
    /// Writes the header and the catalog and begins the first page.
    pub fn from_writer(writer: W, page_box: Rectangle, config: WriterConfig) -> Result<Self> {
        let mut writer = PdfWriter::new(writer);
        let mut allocator = ObjectAllocator::new();
        let catalog_id = allocator.allocate();
        let pages_id = allocator.allocate();

        writer.write_header(&config.pdf_version, &config.generator)?;
        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::name("Catalog"));
        catalog.set("Pages", pages_id);
        writer.write_object(catalog_id, &Object::Dictionary(catalog))?;

        let page = PageState::begin(&mut allocator);
        tracing::debug!(page = page.id.number(), "document opened");

        Ok(Self {
            writer: Some(writer),
            state: SessionState::Open,
            compress_images: config.compress_images,
            compress_content: config.compress_content,
            config,
            metadata: DocumentMetadata::default(),
            allocator,
            page_box,
            catalog_id,
            pages_id,
            page_ids: vec![page.id],
            page,
            line_style: LineStyle::default(),
            fill_style: FillStyle::default(),
            text_style: TextStyle::default(),
            compression_fallbacks: Cell::new(0),
        })
    }

    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    pub fn page_box(&self) -> Rectangle {
        self.page_box
    }

    /// Pages begun so far, the current one included.
    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Bytes written to the destination so far.
    pub fn bytes_written(&self) -> u64 {
        self.writer.as_ref().map_or(0, PdfWriter::position)
    }

    /// Number of streams written with the uncompressed encoding because the
    /// compressor failed under [`CompressionFailurePolicy::Fallback`].
    pub fn compression_fallbacks(&self) -> usize {
        self.compression_fallbacks.get()
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn set_metadata(&mut self, metadata: DocumentMetadata) {
        self.metadata = metadata;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = Some(title.into());
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.metadata.author = Some(author.into());
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.metadata.subject = Some(subject.into());
    }

    pub fn set_creator(&mut self, creator: impl Into<String>) {
        self.metadata.creator = Some(creator.into());
    }

    pub fn set_creation_date(&mut self, date: DateTime<Utc>) {
        self.metadata.creation_date = Some(date);
    }

    /// Selects Flate (`true`) or ASCII85 (`false`) for images written from
    /// now on, including those already drawn on the current page.
    pub fn set_image_compression(&mut self, enabled: bool) {
        self.compress_images = enabled;
    }

    /// Compresses content streams of pages ended from now on.
    pub fn set_content_compression(&mut self, enabled: bool) {
        self.compress_content = enabled;
    }

    pub fn line_style(&self) -> LineStyle {
        self.line_style
    }

    pub fn fill_style(&self) -> FillStyle {
        self.fill_style
    }

    pub fn text_style(&self) -> TextStyle {
        self.text_style
    }

    /// Sets the style for subsequent lines and polygon outlines.
    ///
    /// The color and width operators are written even for a null style.
    pub fn set_line_style(&mut self, style: LineStyle) {
        self.line_style = style;
        self.page
            .content
            .set_stroke_color(style.color)
            .set_line_width(style.width);
    }

    pub fn set_fill_style(&mut self, style: FillStyle) {
        self.fill_style = style;
        self.page.content.set_fill_color(style.color);
    }

    pub fn set_text_style(&mut self, style: TextStyle) {
        self.text_style = style;
    }

    pub fn draw_line(&mut self, from: Point, to: Point) {
        self.draw_polyline(&[from, to]);
    }

    /// Strokes an open path. Does nothing for fewer than two points or a
    /// null line style.
    pub fn draw_polyline(&mut self, points: &[Point]) {
        if points.len() < 2 || self.line_style.is_null() {
            return;
        }
        self.page.content.path(points).stroke();
    }

    /// Fills and/or strokes a closed path with the even-odd rule.
    ///
    /// Does nothing for fewer than three points or when both the line and
    /// fill styles are null.
    pub fn draw_polygon(&mut self, points: &[Point]) {
        if points.len() < 3 {
            return;
        }
        let stroke = !self.line_style.is_null();
        let fill = !self.fill_style.is_null();
        if !stroke && !fill {
            return;
        }

        let content = &mut self.page.content;
        content.path(points).close_path();
        match (fill, stroke) {
            (true, true) => content.fill_stroke_even_odd(),
            (true, false) => content.fill_even_odd(),
            _ => content.stroke(),
        };
    }

    /// Draws a box as a four-point polygon. Degenerate boxes are skipped.
    pub fn draw_rectangle(&mut self, rect: &Rectangle) {
        if rect.is_degenerate() {
            return;
        }
        self.draw_polygon(&rect.corners());
    }

    /// Writes `text` with its baseline origin at `position` using the
    /// current text style.
    pub fn draw_text(&mut self, position: Point, text: &str) {
        let style = self.text_style;
        self.page.content.text(position, &style, text);
    }

    /// Places `image` with its lower-left corner at `(x, y)`, scaled to
    /// `width` x `height` points.
    ///
    /// The image object number is reserved now; the pixels are encoded and
    /// written when the page ends. Images with no pixels are skipped.
    pub fn draw_image(
        &mut self,
        image: RasterImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<()> {
        self.ensure_open()?;
        if image.is_empty() {
            return Ok(());
        }
        let id = self.allocator.allocate();
        let name = self.page.add_image(id, image);
        self.page.content.image(&name, x, y, width, height);
        Ok(())
    }

    /// Finishes the current page and begins a new one.
    pub fn next_page(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.guarded(Self::end_page)?;

        self.page = PageState::begin(&mut self.allocator);
        self.page_ids.push(self.page.id);
        self.carry_styles();
        tracing::debug!(page = self.page.id.number(), count = self.page_ids.len(), "page begun");
        Ok(())
    }

    /// Finishes the last page and the document, and returns the destination.
    pub fn close(mut self) -> Result<W> {
        self.ensure_open()?;
        self.guarded(Self::finish)?;
        self.state = SessionState::Finished;

        let mut writer = self
            .writer
            .take()
            .ok_or_else(|| PdfError::InvalidState("document already closed".to_string()))?;
        writer.flush()?;
        Ok(writer.into_inner())
    }

    /// Every content stream starts from the viewer's default graphics
    /// state, so the current styles are written again at the top of a new
    /// page.
    fn carry_styles(&mut self) {
        let (line, fill) = (self.line_style, self.fill_style);
        self.page
            .content
            .set_stroke_color(line.color)
            .set_line_width(line.width)
            .set_fill_color(fill.color);
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            SessionState::Open => Ok(()),
            SessionState::Poisoned => Err(PdfError::InvalidState(
                "a previous write failed; the document cannot be continued".to_string(),
            )),
            SessionState::Finished => {
                Err(PdfError::InvalidState("document already closed".to_string()))
            }
        }
    }

    /// Runs a step that writes to the destination, poisoning the session if
    /// it fails.
    fn guarded(&mut self, step: fn(&mut Self) -> Result<()>) -> Result<()> {
        let result = step(self);
        if result.is_err() {
            self.state = SessionState::Poisoned;
        }
        result
    }

    fn writer(&mut self) -> Result<&mut PdfWriter<W>> {
        self.writer
            .as_mut()
            .ok_or_else(|| PdfError::InvalidState("document already closed".to_string()))
    }

    fn end_page(&mut self) -> Result<()> {
        // Encode everything first so a compression error leaves nothing
        // half-written.
        let contents = self.content_stream()?;
        let mut images = Vec::with_capacity(self.page.images.len());
        for pending in &self.page.images {
            let (codec, data) = self.encode_image(&pending.image)?;
            images.push((pending.id, pending.image.to_xobject(&pending.name, codec, data)));
        }

        let page_dict = self.page.page_dictionary(self.pages_id, &self.page_box);
        let xobjects = self.page.xobject_dictionary();
        let (page_id, contents_id, xobjects_id) =
            (self.page.id, self.page.contents_id, self.page.xobjects_id);

        let writer = self.writer()?;
        writer.write_object(page_id, &Object::Dictionary(page_dict))?;
        writer.write_object(contents_id, &Object::Stream(contents))?;
        writer.write_object(xobjects_id, &Object::Dictionary(xobjects))?;
        for (id, stream) in images {
            writer.write_object(id, &Object::Stream(stream))?;
        }

        tracing::debug!(
            page = page_id.number(),
            images = self.page.images.len(),
            content_bytes = self.page.content.len(),
            "page written"
        );
        self.page.content.clear();
        self.page.images.clear();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.end_page()?;

        let info_id = if self.metadata.is_empty() {
            None
        } else {
            let id = self.allocator.allocate();
            let info = self.metadata.to_dictionary();
            self.writer()?.write_object(id, &Object::Dictionary(info))?;
            Some(id)
        };

        let mut pages = Dictionary::new();
        pages.set("Type", Object::name("Pages"));
        pages.set(
            "Kids",
            Object::Array(self.page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        );
        pages.set("Count", self.page_ids.len());
        let pages_id = self.pages_id;
        self.writer()?.write_object(pages_id, &Object::Dictionary(pages))?;

        let allocated = self.allocator.allocated();
        self.writer()?.xref().validate(allocated)?;

        let root = self.catalog_id;
        let document_id = self.config.id_source.document_id();
        let xref_offset = self.writer()?.write_xref_and_trailer(root, info_id, document_id)?;
        tracing::debug!(
            pages = self.page_ids.len(),
            objects = allocated,
            xref_offset,
            "document closed"
        );
        Ok(())
    }

    fn content_stream(&self) -> Result<Stream> {
        let data = self.page.content.data();
        if self.compress_content {
            if let Some(compressed) = self.try_compress(data, "page content")? {
                let mut stream = Stream::new(compressed);
                stream.set_filter("FlateDecode");
                return Ok(stream);
            }
        }
        Ok(Stream::new(data.to_vec()))
    }

    fn encode_image(&self, image: &RasterImage) -> Result<(ImageCodec, Vec<u8>)> {
        let packed = image.repack();
        if self.compress_images {
            if let Some(compressed) = self.try_compress(&packed, "image")? {
                return Ok((ImageCodec::Flate, compressed));
            }
        }
        Ok((ImageCodec::Ascii85, ascii85::encode(&packed)))
    }

    /// Compresses `data`, or returns `None` when the failure policy says to
    /// fall back to the uncompressed encoding.
    fn try_compress(&self, data: &[u8], what: &str) -> Result<Option<Vec<u8>>> {
        let result = match self.config.compressor {
            Some(ref compressor) => compressor.compress(data),
            None => Err(PdfError::CompressionFailed(
                "no compressor configured".to_string(),
            )),
        };
        match (result, self.config.compression_failure) {
            (Ok(compressed), _) => Ok(Some(compressed)),
            (Err(err), CompressionFailurePolicy::Fallback) => {
                tracing::warn!(error = %err, "{what} compression failed, writing uncompressed");
                self.compression_fallbacks.set(self.compression_fallbacks.get() + 1);
                Ok(None)
            }
            (Err(err), CompressionFailurePolicy::Fail) => Err(err),
        }
    }
}

impl<W: Write> Drop for Document<W> {
    fn drop(&mut self) {
        if self.state != SessionState::Open {
            return;
        }
        tracing::debug!("document dropped without close, finalizing");
        if let Err(err) = self.guarded(Self::finish) {
            tracing::error!(error = %err, "failed to finalize document on drop");
            return;
        }
        self.state = SessionState::Finished;
        if let Some(writer) = self.writer.as_mut() {
            if let Err(err) = writer.flush() {
                tracing::error!(error = %err, "failed to flush document on drop");
            }
        }
    }
}
