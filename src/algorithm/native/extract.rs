use crate::arena::Arena;
use crate::datatypes::GeometryType;
use crate::error::{GeometryError, Result};
use crate::scalar::{
    Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

macro_rules! impl_extract {
    ($fn_name:ident, $leaf:ident, $multi:ident) => {
        /// Every leaf of this kind, depth-first, including members of multi-geometries.
        fn $fn_name<'g, 'a>(geom: &'g Geometry<'a>, out: &mut Vec<&'g $leaf<'a>>) {
            match geom {
                Geometry::$leaf(g) => out.push(g),
                Geometry::$multi(g) => out.extend(g.iter()),
                Geometry::GeometryCollection(g) => {
                    g.iter().for_each(|part| $fn_name(part, &mut *out))
                }
                _ => {}
            }
        }
    };
}

impl_extract!(extract_points, Point, MultiPoint);
impl_extract!(extract_line_strings, LineString, MultiLineString);
impl_extract!(extract_polygons, Polygon, MultiPolygon);

/// Gather every point, linestring or polygon of a geometry into one multi-geometry.
///
/// `kind` must be [`GeometryType::Point`], [`GeometryType::LineString`] or
/// [`GeometryType::Polygon`]. A geometry that already is of that kind, or of its multi kind, is
/// returned as is. A geometry collection yields the matching multi-geometry, empty if nothing
/// matched. Any other geometry yields an empty geometry of `kind`.
///
/// ```
/// use geoarena::algorithm::native::collection_extract;
/// use geoarena::arena::Arena;
/// use geoarena::datatypes::GeometryType;
/// use geoarena::io::wkt::read_wkt;
///
/// let arena = Arena::new();
/// let geom = read_wkt(
///     &arena,
///     "GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 1 1), MULTIPOINT ((3 4)))",
/// )
/// .unwrap();
/// let points = collection_extract(&arena, &geom, GeometryType::Point).unwrap();
/// assert_eq!(points.to_string(), "MULTIPOINT ((1 2), (3 4))");
/// ```
pub fn collection_extract<'a>(
    arena: &'a Arena,
    geom: &Geometry<'a>,
    kind: GeometryType,
) -> Result<Geometry<'a>> {
    let dim = geom.dimension();
    let out = match kind {
        GeometryType::Point => match geom {
            Geometry::Point(_) | Geometry::MultiPoint(_) => geom.clone(),
            Geometry::GeometryCollection(_) => {
                let mut points = Vec::new();
                extract_points(geom, &mut points);
                let mut multi = MultiPoint::with_capacity(arena, points.len(), dim)?;
                for point in points {
                    multi.push(point.clone())?;
                }
                multi.into()
            }
            _ => Point::empty(dim).into(),
        },
        GeometryType::LineString => match geom {
            Geometry::LineString(_) | Geometry::MultiLineString(_) => geom.clone(),
            Geometry::GeometryCollection(_) => {
                let mut lines = Vec::new();
                extract_line_strings(geom, &mut lines);
                let mut multi = MultiLineString::with_capacity(arena, lines.len(), dim)?;
                for line in lines {
                    multi.push(line.clone())?;
                }
                multi.into()
            }
            _ => LineString::empty(dim).into(),
        },
        GeometryType::Polygon => match geom {
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => geom.clone(),
            Geometry::GeometryCollection(_) => {
                let mut polygons = Vec::new();
                extract_polygons(geom, &mut polygons);
                let mut multi = MultiPolygon::with_capacity(arena, polygons.len(), dim)?;
                for polygon in polygons {
                    multi.push(polygon.clone())?;
                }
                multi.into()
            }
            _ => Polygon::empty(arena, dim)?.into(),
        },
        other => {
            return Err(GeometryError::InvalidGeometryStructure(format!(
                "can only extract POINT, LINESTRING or POLYGON, not {other}"
            )))
        }
    };
    Ok(out)
}

/// Extract the members of the highest geometric dimension from a non-empty geometry collection.
///
/// Any other geometry, including an empty collection, is returned as is.
pub fn collection_extract_auto<'a>(arena: &'a Arena, geom: &Geometry<'a>) -> Result<Geometry<'a>> {
    if !matches!(geom, Geometry::GeometryCollection(_)) || geom.is_empty() {
        return Ok(geom.clone());
    }
    let kind = match geom.geometric_dimension() {
        0 => GeometryType::Point,
        1 => GeometryType::LineString,
        _ => GeometryType::Polygon,
    };
    collection_extract(arena, geom, kind)
}
