use crate::graphics::Color;

/// Whether a stroke or fill is painted at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pattern {
    #[default]
    Solid,
    /// Nothing is painted.
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub pattern: Pattern,
    pub color: Color,
    /// Width in points. Zero means the thinnest line the device can render.
    pub width: f64,
}

impl LineStyle {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            pattern: Pattern::Solid,
            color,
            width,
        }
    }

    /// A line style that paints nothing.
    pub fn null() -> Self {
        Self {
            pattern: Pattern::Null,
            ..Self::default()
        }
    }

    pub fn is_null(&self) -> bool {
        self.pattern == Pattern::Null
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::new(Color::black(), 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillStyle {
    pub pattern: Pattern,
    pub color: Color,
}

impl FillStyle {
    pub fn new(color: Color) -> Self {
        Self {
            pattern: Pattern::Solid,
            color,
        }
    }

    pub fn null() -> Self {
        Self {
            pattern: Pattern::Null,
            color: Color::black(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.pattern == Pattern::Null
    }
}

impl Default for FillStyle {
    fn default() -> Self {
        Self::new(Color::black())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub height: f64,
    pub color: Color,
}

impl TextStyle {
    pub fn new(height: f64, color: Color) -> Self {
        Self { height, color }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(10.0, Color::black())
    }
}
