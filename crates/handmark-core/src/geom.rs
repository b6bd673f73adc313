pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Vector = euclid::Vector2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// Angle of `v` in degrees, measured from +X towards +Y (SVG's y-down frame).
pub fn vector_degrees(v: Vector) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// Axis-aligned box anchored at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBox {
    pub top_left: Point,
    pub width: f64,
    pub height: f64,
}

impl GeoBox {
    pub fn new(top_left: Point, width: f64, height: f64) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.top_left.x + self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn to_vector(&self) -> Vector {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.to_vector().length()
    }
}
