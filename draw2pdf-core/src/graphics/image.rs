//! Raster image support
//!
//! Images arrive as raw scanlines, possibly padded to a stride and possibly
//! carrying an alpha byte. Before being embedded they are repacked into tight
//! 8-bit-per-component rows and encoded with one [`ImageCodec`].

use crate::objects::{Dictionary, Object, Stream};
use crate::{PdfError, Result};

/// Layout of one pixel in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// One gray byte per pixel.
    Gray8,
    /// Red, green, blue.
    Rgb24,
    /// Red, green, blue, alpha. Alpha is dropped on output.
    Rgba32,
}

impl PixelFormat {
    pub fn from_bits_per_pixel(bpp: u32) -> Result<Self> {
        match bpp {
            8 => Ok(PixelFormat::Gray8),
            24 => Ok(PixelFormat::Rgb24),
            32 => Ok(PixelFormat::Rgba32),
            other => Err(PdfError::InvalidImage(format!(
                "unsupported bits per pixel: {other} (expected 8, 24 or 32)"
            ))),
        }
    }

    pub fn bits_per_pixel(&self) -> u32 {
        self.bytes_per_pixel() as u32 * 8
    }

    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgba32 => 4,
        }
    }

    /// Components per pixel after repacking.
    pub fn output_channels(&self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb24 | PixelFormat::Rgba32 => 3,
        }
    }

    pub fn color_space(&self) -> &'static str {
        match self {
            PixelFormat::Gray8 => "DeviceGray",
            PixelFormat::Rgb24 | PixelFormat::Rgba32 => "DeviceRGB",
        }
    }
}

/// Encoding applied to the packed pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCodec {
    Flate,
    Ascii85,
}

impl ImageCodec {
    pub fn filter_name(&self) -> &'static str {
        match self {
            ImageCodec::Flate => "FlateDecode",
            ImageCodec::Ascii85 => "ASCII85Decode",
        }
    }
}

/// A bitmap supplied by the caller, validated on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    format: PixelFormat,
    stride: usize,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Validates the layout and takes ownership of the pixel buffer.
    ///
    /// `stride` is the distance in bytes between the starts of consecutive
    /// scanlines and must be at least one packed row.
    pub fn new(
        width: u32,
        height: u32,
        bits_per_pixel: u32,
        stride: usize,
        pixels: Vec<u8>,
    ) -> Result<Self> {
        let format = PixelFormat::from_bits_per_pixel(bits_per_pixel)?;
        let overflow = || PdfError::InvalidImage(format!("{width}x{height} image is too large"));
        let row_bytes = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(overflow)?;
        if stride < row_bytes {
            return Err(PdfError::InvalidImage(format!(
                "stride {stride} is shorter than a row of {row_bytes} bytes"
            )));
        }
        if width > 0 && height > 0 {
            let required = (height as usize - 1)
                .checked_mul(stride)
                .and_then(|rows| rows.checked_add(row_bytes))
                .ok_or_else(overflow)?;
            if pixels.len() < required {
                return Err(PdfError::InvalidImage(format!(
                    "pixel buffer holds {} bytes, {width}x{height} needs {required}",
                    pixels.len()
                )));
            }
        }
        Ok(Self {
            width,
            height,
            format,
            stride,
            pixels,
        })
    }

    /// Tightly packed gray image.
    pub fn gray(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        Self::new(width, height, 8, width as usize, pixels)
    }

    /// Tightly packed RGB image.
    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        Self::new(width, height, 24, width as usize * 3, pixels)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Strips stride padding and alpha bytes.
    ///
    /// The result holds `width * height * output_channels` bytes.
    pub fn repack(&self) -> Vec<u8> {
        if self.is_empty() {
            return Vec::new();
        }
        let bpp = self.format.bytes_per_pixel();
        let channels = self.format.output_channels();
        let row_bytes = self.width as usize * bpp;

        let mut packed = Vec::with_capacity(self.width as usize * self.height as usize * channels);
        for row in self.pixels.chunks(self.stride).take(self.height as usize) {
            let row = &row[..row_bytes];
            if bpp == channels {
                packed.extend_from_slice(row);
            } else {
                for pixel in row.chunks_exact(bpp) {
                    packed.extend_from_slice(&pixel[..channels]);
                }
            }
        }
        packed
    }

    /// Builds the image XObject around already encoded data.
    pub fn to_xobject(&self, name: &str, codec: ImageCodec, encoded: Vec<u8>) -> Stream {
        let mut dict = Dictionary::with_capacity(10);
        dict.set("Type", Object::name("XObject"));
        dict.set("Subtype", Object::name("Image"));
        dict.set("Name", Object::name(name));
        dict.set("Width", self.width);
        dict.set("Height", self.height);
        dict.set("BitsPerComponent", 8);
        dict.set("ColorSpace", Object::name(self.format.color_space()));

        let mut stream = Stream::with_dictionary(dict, encoded);
        stream.set_filter(codec.filter_name());
        stream
    }
}
