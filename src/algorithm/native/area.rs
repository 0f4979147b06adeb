use itertools::Itertools;

use crate::coord::VertexBuffer;
use crate::scalar::{Geometry, MultiPolygon, Polygon};

/// Signed and unsigned planar area of a geometry.
///
/// The signed area of a ring is positive when its vertices run counter-clockwise. A polygon's
/// area is the area of its shell minus the areas of its holes, carrying the sign of the shell.
/// Points and lines have zero area.
///
/// # Examples
///
/// ```
/// use geoarena::algorithm::native::Area;
/// use geoarena::arena::Arena;
/// use geoarena::io::wkt::read_wkt;
///
/// let arena = Arena::new();
/// let square = read_wkt(&arena, "POLYGON ((0 0, 5 0, 5 6, 0 6, 0 0))").unwrap();
/// let reversed = read_wkt(&arena, "POLYGON ((0 0, 0 6, 5 6, 5 0, 0 0))").unwrap();
///
/// assert_eq!(square.signed_area(), 30.);
/// assert_eq!(reversed.signed_area(), -30.);
/// assert_eq!(reversed.unsigned_area(), 30.);
/// ```
pub trait Area {
    fn signed_area(&self) -> f64;

    fn unsigned_area(&self) -> f64 {
        self.signed_area().abs()
    }
}

impl Area for VertexBuffer<'_> {
    /// Shoelace formula with the x range shifted to start at the first vertex.
    ///
    /// Zero for fewer than three vertices.
    fn signed_area(&self) -> f64 {
        if self.len() < 3 {
            return 0.0;
        }
        let x0 = self.first().map_or(0.0, |v| v.x);
        let twice_area: f64 = self
            .iter()
            .tuple_windows()
            .map(|(prev, cur, next)| (cur.x - x0) * (next.y - prev.y))
            .sum();
        twice_area * 0.5
    }
}

impl Area for Polygon<'_> {
    fn signed_area(&self) -> f64 {
        let Some(shell) = self.exterior() else {
            return 0.0;
        };
        let shell_area = shell.signed_area();
        let holes_area: f64 = self.interiors().map(|hole| hole.unsigned_area()).sum();
        let area = shell_area.abs() - holes_area;
        if shell_area < 0.0 {
            -area
        } else {
            area
        }
    }
}

impl Area for MultiPolygon<'_> {
    fn signed_area(&self) -> f64 {
        self.iter().map(|polygon| polygon.signed_area()).sum()
    }

    fn unsigned_area(&self) -> f64 {
        self.iter().map(|polygon| polygon.unsigned_area()).sum()
    }
}

impl Area for Geometry<'_> {
    fn signed_area(&self) -> f64 {
        match self {
            Geometry::Point(_)
            | Geometry::LineString(_)
            | Geometry::MultiPoint(_)
            | Geometry::MultiLineString(_) => 0.0,
            Geometry::Polygon(g) => g.signed_area(),
            Geometry::MultiPolygon(g) => g.signed_area(),
            Geometry::GeometryCollection(g) => g.iter().map(|part| part.signed_area()).sum(),
        }
    }

    fn unsigned_area(&self) -> f64 {
        match self {
            Geometry::Point(_)
            | Geometry::LineString(_)
            | Geometry::MultiPoint(_)
            | Geometry::MultiLineString(_) => 0.0,
            Geometry::Polygon(g) => g.unsigned_area(),
            Geometry::MultiPolygon(g) => g.unsigned_area(),
            Geometry::GeometryCollection(g) => g.iter().map(|part| part.unsigned_area()).sum(),
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use geo::Area as GeoArea;

    use super::*;
    use crate::arena::Arena;
    use crate::io::geo::geometry_to_geo;
    use crate::test::linestring::ls0;
    use crate::test::multipolygon::mpoly0;
    use crate::test::polygon::{ring, square_with_hole, unit_square};

    #[test]
    fn unit_square_area() {
        let arena = Arena::new();
        let square = unit_square(&arena);
        assert_eq!(square.signed_area(), 1.0);

        let reversed = ring(&arena, &[0., 0., 0., 1., 1., 1., 1., 0., 0., 0.]);
        assert_eq!(reversed.signed_area(), -1.0);
        assert_eq!(reversed.unsigned_area(), 1.0);
    }

    #[test]
    fn holes_are_subtracted() {
        let arena = Arena::new();
        assert_eq!(square_with_hole(&arena).unsigned_area(), 96.0);
        assert_eq!(mpoly0(&arena).unsigned_area(), 97.0);
    }

    #[test]
    fn degenerate_inputs() {
        let arena = Arena::new();
        assert_eq!(ring(&arena, &[0., 0., 1., 1.]).signed_area(), 0.0);
        assert_eq!(Geometry::from(ls0(&arena)).unsigned_area(), 0.0);
    }

    #[test]
    fn matches_geo() {
        let arena = Arena::new();
        let geom = Geometry::from(mpoly0(&arena));
        let expected = geometry_to_geo(&geom).unwrap().unsigned_area();
        assert_relative_eq!(geom.unsigned_area(), expected);

        let far = ring(
            &arena,
            &[1e7, 1e7, 1e7 + 3., 1e7, 1e7 + 3., 1e7 + 2., 1e7, 1e7, 1e7, 1e7],
        );
        assert_relative_eq!(far.signed_area(), 3.0);
    }
}
