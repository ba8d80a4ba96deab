use super::point::Point;

/// Axis-aligned rectangle over integer placement coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub min: Point<u64>,
    pub max: Point<u64>,
}

impl Rect {
    pub fn new(min: Point<u64>, max: Point<u64>) -> Self {
        Self { min, max }
    }

    pub fn from_extent(x1: u64, y1: u64, width: u64, height: u64) -> Self {
        Self::new(Point::new(x1, y1), Point::new(x1 + width, y1 + height))
    }

    pub fn width(&self) -> u64 {
        self.max.x - self.min.x
    }
    pub fn height(&self) -> u64 {
        self.max.y - self.min.y
    }
    pub fn area(&self) -> u64 {
        self.width() * self.height()
    }

    /// Strict inequalities: rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn center(&self) -> Point<f64> {
        Point::new(
            (self.min.x + self.max.x) as f64 / 2.0,
            (self.min.y + self.max.y) as f64 / 2.0,
        )
    }
}
