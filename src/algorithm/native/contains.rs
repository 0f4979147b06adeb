use itertools::Itertools;

use crate::coord::{Side, Vertex, VertexBuffer};
use crate::error::{GeometryError, Result};
use crate::scalar::{Geometry, MultiPolygon, Polygon};

/// Where a point lies relative to an areal geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointLocation {
    Inside,
    Outside,
    OnEdge,
}

/// Point-in-polygon classification by winding number.
///
/// With `ensure_closed`, every ring must end on its first vertex or the call fails with
/// [`GeometryError::InvalidGeometryStructure`]. Self-intersecting rings give unspecified
/// results.
pub trait LocatePoint {
    fn locate_point(&self, point: &Vertex, ensure_closed: bool) -> Result<PointLocation>;

    /// Whether `point` lies strictly inside, with closed rings required.
    fn contains_point(&self, point: &Vertex) -> Result<bool> {
        Ok(self.locate_point(point, true)? == PointLocation::Inside)
    }
}

impl LocatePoint for VertexBuffer<'_> {
    fn locate_point(&self, point: &Vertex, ensure_closed: bool) -> Result<PointLocation> {
        let (Some(first), Some(last)) = (self.first(), self.last()) else {
            return Ok(PointLocation::Outside);
        };
        if ensure_closed && !first.xy_eq(&last) {
            return Err(GeometryError::InvalidGeometryStructure(
                "ring is not closed".to_string(),
            ));
        }

        let mut winding_number = 0i64;
        // Only the stored edges are walked; an open ring is not closed implicitly.
        for (p1, p2) in self.iter().tuple_windows() {
            if p1.xy_eq(&p2) {
                continue;
            }
            let y_min = p1.y.min(p2.y);
            let y_max = p1.y.max(p2.y);
            if point.y > y_max || point.y < y_min {
                continue;
            }

            match point.side_of_line(&p1, &p2) {
                Side::On if point.is_on_segment(&p1, &p2) => return Ok(PointLocation::OnEdge),
                Side::Left if p1.y < point.y && point.y <= p2.y => winding_number += 1,
                Side::Right if p2.y <= point.y && point.y < p1.y => winding_number -= 1,
                _ => {}
            }
        }

        if winding_number == 0 {
            Ok(PointLocation::Outside)
        } else {
            Ok(PointLocation::Inside)
        }
    }
}

impl LocatePoint for Polygon<'_> {
    /// A point on the boundary of the shell or of any hole is [`PointLocation::OnEdge`]; a
    /// point inside a hole is outside the polygon.
    fn locate_point(&self, point: &Vertex, ensure_closed: bool) -> Result<PointLocation> {
        let Some(shell) = self.exterior() else {
            return Ok(PointLocation::Outside);
        };
        match shell.locate_point(point, ensure_closed)? {
            PointLocation::Inside => {}
            other => return Ok(other),
        }
        for hole in self.interiors() {
            match hole.locate_point(point, ensure_closed)? {
                PointLocation::Outside => {}
                PointLocation::Inside => return Ok(PointLocation::Outside),
                PointLocation::OnEdge => return Ok(PointLocation::OnEdge),
            }
        }
        Ok(PointLocation::Inside)
    }
}

impl LocatePoint for MultiPolygon<'_> {
    /// Inside any member wins over lying on the edge of another.
    fn locate_point(&self, point: &Vertex, ensure_closed: bool) -> Result<PointLocation> {
        let mut location = PointLocation::Outside;
        for polygon in self.iter() {
            match polygon.locate_point(point, ensure_closed)? {
                PointLocation::Inside => return Ok(PointLocation::Inside),
                PointLocation::OnEdge => location = PointLocation::OnEdge,
                PointLocation::Outside => {}
            }
        }
        Ok(location)
    }
}

impl LocatePoint for Geometry<'_> {
    /// Only polygons and multipolygons can be queried.
    fn locate_point(&self, point: &Vertex, ensure_closed: bool) -> Result<PointLocation> {
        match self {
            Geometry::Polygon(g) => g.locate_point(point, ensure_closed),
            Geometry::MultiPolygon(g) => g.locate_point(point, ensure_closed),
            other => Err(GeometryError::InvalidGeometryStructure(format!(
                "cannot locate a point in a {}",
                other.geometry_type()
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use geo::Contains;

    use super::*;
    use crate::arena::Arena;
    use crate::io::geo::polygon_to_geo;
    use crate::test::linestring::ls0;
    use crate::test::multipolygon::mpoly0;
    use crate::test::polygon::{ring, square_with_hole, unit_square};

    #[test]
    fn unit_square_locations() {
        let arena = Arena::new();
        let square = unit_square(&arena);
        let locate = |x, y| square.locate_point(&Vertex::new(x, y), true).unwrap();
        assert_eq!(locate(0.5, 0.5), PointLocation::Inside);
        assert_eq!(locate(2., 2.), PointLocation::Outside);
        assert_eq!(locate(0., 0.5), PointLocation::OnEdge);
        assert_eq!(locate(0.5, 1.), PointLocation::OnEdge);
        assert_eq!(locate(-1., 0.5), PointLocation::Outside);
    }

    #[test]
    fn holes() {
        let arena = Arena::new();
        let polygon = square_with_hole(&arena);
        let locate = |x, y| polygon.locate_point(&Vertex::new(x, y), true).unwrap();
        assert_eq!(locate(3., 3.), PointLocation::Outside);
        assert_eq!(locate(2., 3.), PointLocation::OnEdge);
        assert_eq!(locate(1., 1.), PointLocation::Inside);
        assert_eq!(locate(6., 8.), PointLocation::Inside);
    }

    #[test]
    fn agrees_with_geo_on_interior_points() {
        let arena = Arena::new();
        let polygon = square_with_hole(&arena);
        let oracle = polygon_to_geo(&polygon);
        for x in [0.5, 1.5, 2.5, 3.5, 4.5, 9.5, 11.5] {
            for y in [0.5, 3.5, 7.5, -0.5] {
                let expected = oracle.contains(&geo::Point::new(x, y));
                assert_eq!(
                    polygon.contains_point(&Vertex::new(x, y)).unwrap(),
                    expected,
                    "({x}, {y})"
                );
            }
        }
    }

    #[test]
    fn multipolygon_and_geometry() {
        let arena = Arena::new();
        let multi = mpoly0(&arena);
        assert!(multi.contains_point(&Vertex::new(21., 1.)).unwrap());
        assert!(!multi.contains_point(&Vertex::new(23., 3.)).unwrap());
        assert_eq!(
            Geometry::from(multi)
                .locate_point(&Vertex::new(1., 0.5), true)
                .unwrap(),
            PointLocation::OnEdge
        );
        assert!(Geometry::from(ls0(&arena))
            .locate_point(&Vertex::new(0., 0.), true)
            .is_err());
    }

    #[test]
    fn closure_check() {
        let arena = Arena::new();
        let open = ring(&arena, &[0., 0., 1., 0., 1., 1., 0., 1.]);
        let p = Vertex::new(0.5, 0.5);
        assert!(matches!(
            open.locate_point(&p, true),
            Err(GeometryError::InvalidGeometryStructure(_))
        ));
        assert_eq!(open.locate_point(&p, false).unwrap(), PointLocation::Inside);

        // The missing closing edge from (0 1) back to (0 0) is not walked.
        assert_eq!(
            open.locate_point(&Vertex::new(0., 0.5), false).unwrap(),
            PointLocation::Inside
        );
        assert_eq!(
            open.locate_point(&Vertex::new(1., 0.5), false).unwrap(),
            PointLocation::OnEdge
        );
    }
}
