use itertools::Itertools;

use crate::coord::{Vertex, VertexBuffer};
use crate::scalar::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

/// Calculation of the centroid.
///
/// Lines are weighted by segment length and polygons by area, with holes subtracted. A
/// collection only considers the members of its highest geometric dimension, so a
/// `GEOMETRYCOLLECTION (POINT (0 0), POLYGON (...))` has the centroid of its polygon.
///
/// Returns `None` for empty geometries. Zero-length lines fall back to the average of their
/// vertices and zero-area polygons to the centroid of their shell as a line.
pub trait Centroid {
    fn centroid(&self) -> Option<Vertex>;
}

/// Weighted sum of centroids, tracking the geometric dimension that contributed to it.
#[derive(Debug, Clone, Copy, Default)]
struct CentroidOperation {
    sum_x: f64,
    sum_y: f64,
    weight: f64,
    dimension: Option<usize>,
}

impl CentroidOperation {
    fn centroid(&self) -> Option<Vertex> {
        (self.weight != 0.0).then(|| Vertex::new(self.sum_x / self.weight, self.sum_y / self.weight))
    }

    /// Add a weighted centroid, discarding everything of a lower dimension.
    fn add(&mut self, dimension: usize, x: f64, y: f64, weight: f64) {
        match self.dimension {
            Some(current) if current > dimension => return,
            Some(current) if current == dimension => {}
            _ => *self = Self::default(),
        }
        self.dimension = Some(dimension);
        self.sum_x += x * weight;
        self.sum_y += y * weight;
        self.weight += weight;
    }

    fn add_point(&mut self, point: &Point) {
        if let Some(v) = point.vertex() {
            self.add(0, v.x, v.y, 1.0);
        }
    }

    /// Length-weighted segment midpoints, or the vertex average for a zero-length line.
    fn add_line(&mut self, line: &VertexBuffer) {
        if line.is_empty() {
            return;
        }
        let mut segments = CentroidOperation::default();
        for (a, b) in line.iter().tuple_windows() {
            segments.add(1, (a.x + b.x) * 0.5, (a.y + b.y) * 0.5, a.distance(&b));
        }
        match segments.centroid() {
            Some(c) => self.add(1, c.x, c.y, segments.weight),
            None => {
                for v in line.iter() {
                    self.add(0, v.x, v.y, 1.0);
                }
            }
        }
    }

    fn add_polygon(&mut self, polygon: &Polygon) {
        let Some(shell) = polygon.exterior() else {
            return;
        };
        let mut rings = CentroidOperation::default();
        for (i, ring) in polygon.rings().iter().enumerate() {
            if let Some((x, y, area)) = ring_centroid(ring) {
                let weight = if i == 0 { area.abs() } else { -area.abs() };
                rings.sum_x += x * weight;
                rings.sum_y += y * weight;
                rings.weight += weight;
            }
        }
        match rings.centroid() {
            Some(c) => self.add(2, c.x, c.y, rings.weight),
            None => self.add_line(shell),
        }
    }

    fn add_geometry(&mut self, geom: &Geometry) {
        match geom {
            Geometry::Point(g) => self.add_point(g),
            Geometry::LineString(g) => self.add_line(g.coords()),
            Geometry::Polygon(g) => self.add_polygon(g),
            Geometry::MultiPoint(g) => g.iter().for_each(|p| self.add_point(p)),
            Geometry::MultiLineString(g) => g.iter().for_each(|l| self.add_line(l.coords())),
            Geometry::MultiPolygon(g) => g.iter().for_each(|p| self.add_polygon(p)),
            Geometry::GeometryCollection(g) => g.iter().for_each(|part| self.add_geometry(part)),
        }
    }
}

/// Centroid and signed area of one ring, by triangle fan from the origin.
fn ring_centroid(ring: &VertexBuffer) -> Option<(f64, f64, f64)> {
    let (mut cx, mut cy, mut twice_area) = (0.0, 0.0, 0.0);
    for (a, b) in ring.iter().tuple_windows() {
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
        twice_area += cross;
    }
    if twice_area == 0.0 {
        return None;
    }
    let area = twice_area * 0.5;
    Some((cx / (6.0 * area), cy / (6.0 * area), area))
}

macro_rules! impl_centroid {
    ($type:ident, $add:ident) => {
        impl Centroid for $type<'_> {
            fn centroid(&self) -> Option<Vertex> {
                let mut op = CentroidOperation::default();
                op.$add(self);
                op.centroid()
            }
        }
    };
}

impl_centroid!(Point, add_point);
impl_centroid!(Polygon, add_polygon);
impl_centroid!(Geometry, add_geometry);

impl Centroid for LineString<'_> {
    fn centroid(&self) -> Option<Vertex> {
        let mut op = CentroidOperation::default();
        op.add_line(self.coords());
        op.centroid()
    }
}

impl Centroid for MultiPoint<'_> {
    fn centroid(&self) -> Option<Vertex> {
        let mut op = CentroidOperation::default();
        self.iter().for_each(|p| op.add_point(p));
        op.centroid()
    }
}

impl Centroid for MultiLineString<'_> {
    fn centroid(&self) -> Option<Vertex> {
        let mut op = CentroidOperation::default();
        self.iter().for_each(|l| op.add_line(l.coords()));
        op.centroid()
    }
}

impl Centroid for MultiPolygon<'_> {
    fn centroid(&self) -> Option<Vertex> {
        let mut op = CentroidOperation::default();
        self.iter().for_each(|p| op.add_polygon(p));
        op.centroid()
    }
}

impl Centroid for GeometryCollection<'_> {
    fn centroid(&self) -> Option<Vertex> {
        let mut op = CentroidOperation::default();
        self.iter().for_each(|part| op.add_geometry(part));
        op.centroid()
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use geo::Centroid as GeoCentroid;

    use super::*;
    use crate::arena::Arena;
    use crate::datatypes::Dimension;
    use crate::io::geo::geometry_to_geo;
    use crate::test::geometrycollection::nested_collection;
    use crate::test::linestring::ls0;
    use crate::test::multilinestring::mls0;
    use crate::test::multipoint::mp0;
    use crate::test::multipolygon::mpoly0;
    use crate::test::polygon::{ring, square_with_hole, unit_square};

    fn assert_matches_geo(geom: Geometry) {
        let expected = geometry_to_geo(&geom).unwrap().centroid().unwrap();
        let actual = geom.centroid().unwrap();
        assert_relative_eq!(actual.x, expected.x(), epsilon = 1e-9);
        assert_relative_eq!(actual.y, expected.y(), epsilon = 1e-9);
    }

    #[test]
    fn simple_centroids() {
        let arena = Arena::new();
        assert_eq!(unit_square(&arena).centroid(), Some(Vertex::new(0.5, 0.5)));
        assert_eq!(mp0(&arena).centroid(), Some(Vertex::new(0.5, 1.5)));
        assert_eq!(Point::empty(Dimension::XY).centroid(), None);
        assert_eq!(
            Polygon::empty(&arena, Dimension::XY).unwrap().centroid(),
            None
        );
    }

    #[test]
    fn weighted_centroids_match_geo() {
        let arena = Arena::new();
        assert_matches_geo(ls0(&arena).into());
        assert_matches_geo(mls0(&arena).into());
        assert_matches_geo(square_with_hole(&arena).into());
        assert_matches_geo(mpoly0(&arena).into());
    }

    #[test]
    fn collection_uses_highest_dimension() {
        let arena = Arena::new();
        // The point members are ignored in favour of the line.
        assert_eq!(
            nested_collection(&arena).centroid(),
            ls0(&arena).centroid()
        );
    }

    #[test]
    fn degenerate_fallbacks() {
        let arena = Arena::new();
        let line = LineString::new(ring(&arena, &[2., 2., 2., 2.]));
        assert_eq!(line.centroid(), Some(Vertex::new(2., 2.)));

        let mut flat = Polygon::with_capacity(&arena, 1, Dimension::XY).unwrap();
        flat.push_ring(ring(&arena, &[0., 0., 2., 0., 4., 0., 0., 0.]))
            .unwrap();
        let c = flat.centroid().unwrap();
        assert_relative_eq!(c.x, 2.0);
        assert_relative_eq!(c.y, 0.0);
    }
}
