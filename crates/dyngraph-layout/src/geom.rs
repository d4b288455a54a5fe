use nalgebra::Vector2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<Vector2<f64>> for Point {
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for Vector2<f64> {
    fn from(p: Point) -> Self {
        Vector2::new(p.x, p.y)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Interiors overlap. Rectangles that only share an edge or a corner do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right() > other.x
            && other.right() > self.x
            && self.bottom() > other.y
            && other.bottom() > self.y
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Drawing area the layout has to fit into. The origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 800.0,
        }
    }
}

impl Canvas {
    /// Negative or non-finite extents are clamped to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: extent(width),
            height: extent(height),
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rect().contains(p)
    }
}

fn extent(v: f64) -> f64 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// Extent of a point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn of(points: impl IntoIterator<Item = Point>) -> Option<Bounds> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut b = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        for p in points {
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rects_sharing_an_edge_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 5.0, 5.0);
        let corner = Rect::new(10.0, 10.0, 5.0, 5.0);
        let inside = Rect::new(9.0, 9.0, 5.0, 5.0);

        assert!(!a.intersects(&right));
        assert!(!a.intersects(&corner));
        assert!(a.intersects(&inside));
        assert!(inside.intersects(&a));
    }

    #[test]
    fn bounds_of_empty_cloud_is_none() {
        assert_eq!(Bounds::of(std::iter::empty()), None);
        let b = Bounds::of([Point::new(3.0, -1.0), Point::new(-2.0, 4.0)]).unwrap();
        assert_eq!((b.width(), b.height()), (5.0, 5.0));
    }

    #[test]
    fn canvas_clamps_negative_extents() {
        let c = Canvas::new(-5.0, f64::NAN);
        assert_eq!((c.width, c.height), (0.0, 0.0));
    }

    #[test]
    fn canvas_clamps_infinite_extents() {
        let c = Canvas::new(f64::INFINITY, 600.0);
        assert_eq!((c.width, c.height), (0.0, 600.0));
        let c = Canvas::new(300.0, f64::NEG_INFINITY);
        assert_eq!((c.width, c.height), (300.0, 0.0));
    }
}
