/// An RGB color with an alpha component.
///
/// All channels are in 0.0 to 1.0. Alpha is carried for callers that track
/// it but is never written: the output has no transparency support.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Creates an opaque RGB color with values clamped to 0.0-1.0.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates an RGB color with alpha, values clamped to 0.0-1.0.
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
            a: clamp_unit(a),
        }
    }

    /// Creates a gray color with value clamped to 0.0-1.0.
    pub fn gray(value: f64) -> Self {
        Self::rgb(value, value, value)
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    pub fn black() -> Self {
        Self::gray(0.0)
    }

    pub fn white() -> Self {
        Self::gray(1.0)
    }

    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    pub fn green() -> Self {
        Self::rgb(0.0, 1.0, 0.0)
    }

    pub fn blue() -> Self {
        Self::rgb(0.0, 0.0, 1.0)
    }

    pub fn yellow() -> Self {
        Self::rgb(1.0, 1.0, 0.0)
    }

    pub fn cyan() -> Self {
        Self::rgb(0.0, 1.0, 1.0)
    }

    pub fn magenta() -> Self {
        Self::rgb(1.0, 0.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

// NaN would otherwise survive `clamp` and end up as `0` with a warning on
// every use.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
