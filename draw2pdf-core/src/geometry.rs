//! Basic geometric types

/// A point in 2D space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin point (0, 0)
    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box given by its minimum and maximum corners.
///
/// Page sizes are boxes too: a page's media box is `[min.x min.y max.x max.y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub min: Point,
    pub max: Point,
}

impl Rectangle {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Create a rectangle from position and size
    pub fn from_position_and_size(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: Point::new(x, y),
            max: Point::new(x + width, y + height),
        }
    }

    /// The empty box: `min` above and right of `max`, so that extending it by
    /// any point yields exactly that point.
    pub fn degenerate() -> Self {
        Self {
            min: Point::new(f64::MAX, f64::MAX),
            max: Point::new(f64::MIN, f64::MIN),
        }
    }

    /// True when the box encloses no point at all. Zero-area boxes where
    /// `min == max` on an axis are not degenerate.
    pub fn is_degenerate(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Swaps coordinates so that `min <= max` on both axes.
    pub fn normalize(&self) -> Self {
        Self {
            min: Point::new(self.min.x.min(self.max.x), self.min.y.min(self.max.y)),
            max: Point::new(self.min.x.max(self.max.x), self.min.y.max(self.max.y)),
        }
    }

    /// Grows the box to contain `point`.
    pub fn extend_by(&mut self, point: Point) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    pub fn extend_by_points(&mut self, points: &[Point]) {
        for point in points {
            self.extend_by(*point);
        }
    }

    /// Smallest box containing every point; degenerate for an empty slice.
    pub fn bounding(points: &[Point]) -> Self {
        let mut rect = Self::degenerate();
        rect.extend_by_points(points);
        rect
    }

    pub fn extent_x(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn extent_y(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn width(&self) -> f64 {
        self.extent_x()
    }

    pub fn height(&self) -> f64 {
        self.extent_y()
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Corners counter-clockwise from `min`.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            Point::new(self.max.x, self.min.y),
            self.max,
            Point::new(self.min.x, self.max.y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point() {
        let p = Point::new(10.0, 20.0);
        assert_eq!(p.x, 10.0);
        assert_eq!(p.y, 20.0);
        assert_eq!(Point::origin(), Point::default());
        assert_eq!(Point::from((1.0, 2.0)), Point::new(1.0, 2.0));
    }

    #[test]
    fn test_rectangle() {
        let rect = Rectangle::new(Point::new(10.0, 20.0), Point::new(110.0, 120.0));

        assert_eq!(rect.width(), 100.0);
        assert_eq!(rect.height(), 100.0);
        assert!(!rect.is_degenerate());

        let center = rect.center();
        assert_eq!(center.x, 60.0);
        assert_eq!(center.y, 70.0);
    }

    #[test]
    fn test_rectangle_from_position_and_size() {
        let rect = Rectangle::from_position_and_size(10.0, 20.0, 50.0, 30.0);
        assert_eq!(rect.min, Point::new(10.0, 20.0));
        assert_eq!(rect.max, Point::new(60.0, 50.0));
    }

    #[test]
    fn test_degenerate() {
        let rect = Rectangle::degenerate();
        assert!(rect.is_degenerate());

        // Inverted on one axis only.
        let rect = Rectangle::new(Point::new(0.0, 5.0), Point::new(10.0, 1.0));
        assert!(rect.is_degenerate());
        assert!(!rect.normalize().is_degenerate());

        let line = Rectangle::new(Point::new(0.0, 5.0), Point::new(10.0, 5.0));
        assert!(!line.is_degenerate());
    }

    #[test]
    fn test_extend_by() {
        let mut rect = Rectangle::degenerate();
        rect.extend_by(Point::new(3.0, 4.0));
        assert_eq!(rect.min, Point::new(3.0, 4.0));
        assert_eq!(rect.max, Point::new(3.0, 4.0));
        assert!(!rect.is_degenerate());

        rect.extend_by_points(&[Point::new(-1.0, 10.0), Point::new(5.0, 0.0)]);
        assert_eq!(rect.min, Point::new(-1.0, 0.0));
        assert_eq!(rect.max, Point::new(5.0, 10.0));
        assert_eq!(rect.extent_x(), 6.0);
        assert_eq!(rect.extent_y(), 10.0);
    }

    #[test]
    fn test_bounding() {
        assert!(Rectangle::bounding(&[]).is_degenerate());
        let rect = Rectangle::bounding(&[Point::new(2.0, 2.0), Point::new(0.0, 4.0)]);
        assert_eq!(rect, Rectangle::new(Point::new(0.0, 2.0), Point::new(2.0, 4.0)));
    }

    #[test]
    fn test_corners() {
        let rect = Rectangle::new(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        assert_eq!(
            rect.corners(),
            [
                Point::new(1.0, 2.0),
                Point::new(3.0, 2.0),
                Point::new(3.0, 4.0),
                Point::new(1.0, 4.0),
            ]
        );
    }
}
