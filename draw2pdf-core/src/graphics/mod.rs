mod color;
mod image;
mod style;

pub use color::Color;
pub use image::{ImageCodec, PixelFormat, RasterImage};
pub use style::{FillStyle, LineStyle, Pattern, TextStyle};

use crate::accumulator::StreamAccumulator;
use crate::geometry::Point;
use crate::objects::{escape_literal, format_real};

/// Resource name of the font every page declares.
pub const DEFAULT_FONT: &str = "F1";

/// One content-stream operator with its operands.
///
/// Each variant renders to exactly one line terminated by CRLF.
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// `r g b RG`
    SetStrokeColor(Color),
    /// `r g b rg`
    SetFillColor(Color),
    /// `w w`
    SetLineWidth(f64),
    /// `x y m`
    MoveTo(Point),
    /// `x y l`
    LineTo(Point),
    /// `h`
    ClosePath,
    /// `S`
    Stroke,
    /// `f*`
    FillEvenOdd,
    /// `B*`
    FillStrokeEvenOdd,
    /// `q`
    SaveState,
    /// `Q`
    RestoreState,
    /// `a b c d e f cm`
    Transform([f64; 6]),
    /// `BT`
    BeginText,
    /// `ET`
    EndText,
    /// `/name size Tf`
    SetFont { name: String, size: f64 },
    /// `x y Td`
    TextPosition(Point),
    /// `(bytes) Tj`, operand already encoded but not yet escaped.
    ShowText(Vec<u8>),
    /// `/name Do`
    PaintXObject(String),
}

impl Operator {
    pub fn write_to(&self, out: &mut StreamAccumulator) {
        match self {
            Operator::SetStrokeColor(c) => {
                out.append_fmt(format_args!(
                    "{} {} {} RG\r\n",
                    format_real(c.r),
                    format_real(c.g),
                    format_real(c.b)
                ));
            }
            Operator::SetFillColor(c) => {
                out.append_fmt(format_args!(
                    "{} {} {} rg\r\n",
                    format_real(c.r),
                    format_real(c.g),
                    format_real(c.b)
                ));
            }
            Operator::SetLineWidth(w) => {
                out.append_fmt(format_args!("{} w\r\n", format_real(*w)));
            }
            Operator::MoveTo(p) => {
                out.append_fmt(format_args!("{} {} m\r\n", format_real(p.x), format_real(p.y)));
            }
            Operator::LineTo(p) => {
                out.append_fmt(format_args!("{} {} l\r\n", format_real(p.x), format_real(p.y)));
            }
            Operator::ClosePath => out.append_text("h\r\n"),
            Operator::Stroke => out.append_text("S\r\n"),
            Operator::FillEvenOdd => out.append_text("f*\r\n"),
            Operator::FillStrokeEvenOdd => out.append_text("B*\r\n"),
            Operator::SaveState => out.append_text("q\r\n"),
            Operator::RestoreState => out.append_text("Q\r\n"),
            Operator::Transform(m) => {
                let operands: Vec<String> = m.iter().map(|v| format_real(*v)).collect();
                out.append_fmt(format_args!("{} cm\r\n", operands.join(" ")));
            }
            Operator::BeginText => out.append_text("BT\r\n"),
            Operator::EndText => out.append_text("ET\r\n"),
            Operator::SetFont { name, size } => {
                out.append_fmt(format_args!("/{name} {} Tf\r\n", format_real(*size)));
            }
            Operator::TextPosition(p) => {
                out.append_fmt(format_args!("{} {} Td\r\n", format_real(p.x), format_real(p.y)));
            }
            Operator::ShowText(bytes) => {
                out.append_bytes(b"(");
                out.append_bytes(&escape_literal(bytes));
                out.append_bytes(b") Tj\r\n");
            }
            Operator::PaintXObject(name) => {
                out.append_fmt(format_args!("/{name} Do\r\n"));
            }
        }
    }
}

/// Builder for one page's content stream.
#[derive(Debug, Clone, Default)]
pub struct ContentStream {
    buffer: StreamAccumulator,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: Operator) -> &mut Self {
        op.write_to(&mut self.buffer);
        self
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.push(Operator::SetStrokeColor(color))
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.push(Operator::SetFillColor(color))
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.push(Operator::SetLineWidth(width))
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.push(Operator::MoveTo(point))
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.push(Operator::LineTo(point))
    }

    /// `m` to the first point, `l` to each following one.
    pub fn path(&mut self, points: &[Point]) -> &mut Self {
        if let Some((first, rest)) = points.split_first() {
            self.move_to(*first);
            for point in rest {
                self.line_to(*point);
            }
        }
        self
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.push(Operator::ClosePath)
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.push(Operator::Stroke)
    }

    pub fn fill_even_odd(&mut self) -> &mut Self {
        self.push(Operator::FillEvenOdd)
    }

    pub fn fill_stroke_even_odd(&mut self) -> &mut Self {
        self.push(Operator::FillStrokeEvenOdd)
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.push(Operator::SaveState)
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.push(Operator::RestoreState)
    }

    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.push(Operator::Transform([a, b, c, d, e, f]))
    }

    /// Writes a text run in its own graphics state, so the fill color it
    /// sets does not leak into later fills.
    pub fn text(&mut self, position: Point, style: &TextStyle, text: &str) -> &mut Self {
        self.save_state()
            .push(Operator::BeginText)
            .push(Operator::SetFont {
                name: DEFAULT_FONT.to_string(),
                size: style.height,
            })
            .set_fill_color(style.color)
            .push(Operator::TextPosition(position))
            .push(Operator::ShowText(encode_latin1(text)))
            .push(Operator::EndText)
            .restore_state()
    }

    /// Places XObject `name` scaled to `width` x `height` with its lower-left
    /// corner at `(x, y)`.
    pub fn image(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.save_state()
            .transform(width, 0.0, 0.0, height, x, y)
            .push(Operator::PaintXObject(name.to_string()))
            .restore_state()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn data(&self) -> &[u8] {
        self.buffer.data()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_inner()
    }
}

/// Encodes text for the default font: one byte per character, characters
/// outside Latin-1 replaced by `?`.
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
