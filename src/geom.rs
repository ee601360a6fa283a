//! Geometric primitives, like points and segments.

/// A two-dimensional point.
#[derive(Clone, Copy, PartialEq)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    ///
    /// Unlike in most graphics formats, larger values are up: the grid
    /// generator talks about segments' "bottom" and "top" endpoints.
    pub y: f64,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite());
        debug_assert!(y.is_finite());
        Point { x, y }
    }

    /// Compute an affine combination between `self` and `other`; that is, `(1 - t) * self + t * other`.
    pub fn affine(&self, other: &Self, t: f64) -> Self {
        Point {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
        }
    }

    /// Convert to a `kurbo` point.
    pub fn to_kurbo(self) -> kurbo::Point {
        kurbo::Point::new(self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<kurbo::Point> for Point {
    fn from(p: kurbo::Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// A straight line segment.
///
/// The endpoints are kept in the order they were written in (or read from) a
/// file; nothing here normalizes them.
#[derive(Clone, Copy, PartialEq)]
pub struct Segment {
    /// The first endpoint, written as `x0 y0`.
    pub p0: Point,
    /// The second endpoint, written as `x1 y1`.
    pub p1: Point,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Segment { p0, p1 } = self;
        write!(f, "{p0:?} -- {p1:?}")
    }
}

impl Segment {
    /// Create a new segment.
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self {
            p0: p0.into(),
            p1: p1.into(),
        }
    }

    /// The four coordinates in file order: `x0 y0 x1 y1`.
    pub fn coords(&self) -> [f64; 4] {
        [self.p0.x, self.p0.y, self.p1.x, self.p1.y]
    }

    /// Convert to a `kurbo` line.
    pub fn to_kurbo(&self) -> kurbo::Line {
        kurbo::Line::new(self.p0.to_kurbo(), self.p1.to_kurbo())
    }

    /// The smaller of the two `y` coordinates.
    pub fn min_y(&self) -> f64 {
        self.p0.y.min(self.p1.y)
    }

    /// The larger of the two `y` coordinates.
    pub fn max_y(&self) -> f64 {
        self.p0.y.max(self.p1.y)
    }

    /// Our `x` coordinate at the given `y` coordinate.
    ///
    /// Horizontal segments return the `x` coordinate of their first endpoint.
    pub fn at_y(&self, y: f64) -> f64 {
        if self.p0.y == self.p1.y {
            self.p0.x
        } else {
            let t = (y - self.p0.y) / (self.p1.y - self.p0.y);
            self.p0.affine(&self.p1, t).x
        }
    }
}
