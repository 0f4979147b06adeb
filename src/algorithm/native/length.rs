use itertools::Itertools;

use crate::coord::VertexBuffer;
use crate::scalar::{Geometry, LineString, MultiLineString, MultiPolygon, Polygon};

/// Planar length of the linear parts of a geometry.
///
/// Points and polygons have zero length; collections sum the lengths of their members.
pub trait Length {
    fn length(&self) -> f64;
}

impl Length for VertexBuffer<'_> {
    fn length(&self) -> f64 {
        self.iter()
            .tuple_windows()
            .map(|(a, b)| a.distance(&b))
            .sum()
    }
}

impl Length for LineString<'_> {
    fn length(&self) -> f64 {
        self.coords().length()
    }
}

impl Length for MultiLineString<'_> {
    fn length(&self) -> f64 {
        self.iter().map(|line| line.length()).sum()
    }
}

impl Length for Geometry<'_> {
    fn length(&self) -> f64 {
        match self {
            Geometry::LineString(g) => g.length(),
            Geometry::MultiLineString(g) => g.length(),
            Geometry::GeometryCollection(g) => g.iter().map(|part| part.length()).sum(),
            Geometry::Point(_)
            | Geometry::Polygon(_)
            | Geometry::MultiPoint(_)
            | Geometry::MultiPolygon(_) => 0.0,
        }
    }
}

/// Total planar length of every polygon ring, holes included.
pub trait Perimeter {
    fn perimeter(&self) -> f64;
}

impl Perimeter for Polygon<'_> {
    fn perimeter(&self) -> f64 {
        self.rings().iter().map(|ring| ring.length()).sum()
    }
}

impl Perimeter for MultiPolygon<'_> {
    fn perimeter(&self) -> f64 {
        self.iter().map(|polygon| polygon.perimeter()).sum()
    }
}

impl Perimeter for Geometry<'_> {
    fn perimeter(&self) -> f64 {
        match self {
            Geometry::Polygon(g) => g.perimeter(),
            Geometry::MultiPolygon(g) => g.perimeter(),
            Geometry::GeometryCollection(g) => g.iter().map(|part| part.perimeter()).sum(),
            Geometry::Point(_)
            | Geometry::LineString(_)
            | Geometry::MultiPoint(_)
            | Geometry::MultiLineString(_) => 0.0,
        }
    }
}
