/// One coordinate tuple.
///
/// A vertex always carries all four ordinates; the [`Dimension`][crate::datatypes::Dimension]
/// of the buffer it is stored in decides which of `z` and `m` are meaningful. Ordinates a buffer
/// does not store read back as `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    /// X ordinate
    pub x: f64,
    /// Y ordinate
    pub y: f64,
    /// Z ordinate
    pub z: f64,
    /// M ordinate
    pub m: f64,
}

/// Which side of a directed line a vertex lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Negative cross product
    Left,
    /// Positive cross product
    Right,
    /// Exactly collinear
    On,
}

impl Vertex {
    /// A 2D vertex.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }

    /// A vertex with a Z ordinate.
    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, m: 0.0 }
    }

    /// A vertex with an M ordinate.
    pub fn xym(x: f64, y: f64, m: f64) -> Self {
        Self { x, y, z: 0.0, m }
    }

    /// A vertex with both Z and M ordinates.
    pub fn xyzm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self { x, y, z, m }
    }

    /// Planar distance to `other`.
    pub fn distance(&self, other: &Vertex) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared planar distance to `other`.
    pub fn distance_squared(&self, other: &Vertex) -> f64 {
        (self.x - other.x) * (self.x - other.x) + (self.y - other.y) * (self.y - other.y)
    }

    /// Squared planar distance to the segment `p1`-`p2`.
    pub fn distance_squared_to_segment(&self, p1: &Vertex, p2: &Vertex) -> f64 {
        let closest = closest_point_on_segment(self, p1, p2);
        self.distance_squared(&closest)
    }

    /// Whether the planar positions are identical, ignoring Z and M.
    pub fn xy_eq(&self, other: &Vertex) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Classify this vertex against the directed line through `p1` and `p2`.
    pub fn side_of_line(&self, p1: &Vertex, p2: &Vertex) -> Side {
        let side = (self.x - p1.x) * (p2.y - p1.y) - (p2.x - p1.x) * (self.y - p1.y);
        if side == 0.0 {
            Side::On
        } else if side < 0.0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Whether a vertex already known to be collinear with `p1`-`p2` falls on that segment.
    ///
    /// The range test is half-open on each axis, so the end vertex of an axis-aligned segment is
    /// not on it.
    pub fn is_on_segment(&self, p1: &Vertex, p2: &Vertex) -> bool {
        ((p1.x <= self.x && self.x < p2.x) || (p1.x >= self.x && self.x > p2.x))
            || ((p1.y <= self.y && self.y < p2.y) || (p1.y >= self.y && self.y > p2.y))
    }
}

/// The point on segment `p1`-`p2` closest to `p`.
///
/// `p` is projected onto the infinite line and the parameter clamped to `[0, 1]`. A degenerate
/// segment yields `p1`.
pub fn closest_point_on_segment(p: &Vertex, p1: &Vertex, p2: &Vertex) -> Vertex {
    if p1.xy_eq(p2) {
        return *p1;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let r = ((p.x - p1.x) * dx + (p.y - p1.y) * dy) / (dx * dx + dy * dy);
    if r <= 0.0 {
        return *p1;
    }
    if r >= 1.0 {
        return *p2;
    }
    Vertex::new(p1.x + r * dx, p1.y + r * dy)
}
