use crate::arena::Arena;
use crate::coord::{Vertex, VertexBuffer};
use crate::datatypes::Dimension;
use crate::error::{GeometryError, Result};
use crate::scalar::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

/// Convert a vertex to a [`geo::Coord`].
///
/// Only the first two dimensions will be kept.
pub fn vertex_to_geo(vertex: &Vertex) -> geo::Coord {
    geo::Coord {
        x: vertex.x,
        y: vertex.y,
    }
}

fn buffer_to_geo(buffer: &VertexBuffer) -> geo::LineString {
    geo::LineString::new(buffer.iter().map(|v| vertex_to_geo(&v)).collect())
}

/// Convert a Point to a [`geo::Point`].
///
/// `geo` has no empty point, so an empty point is an error.
pub fn point_to_geo(point: &Point) -> Result<geo::Point> {
    let vertex = point.vertex().ok_or_else(|| {
        GeometryError::InvalidGeometryStructure("cannot convert an empty point to geo".to_string())
    })?;
    Ok(geo::Point(vertex_to_geo(&vertex)))
}

/// Convert a LineString to a [`geo::LineString`].
///
/// Only the first two dimensions will be kept.
pub fn line_string_to_geo(line_string: &LineString) -> geo::LineString {
    buffer_to_geo(line_string.coords())
}

/// Convert a Polygon to a [`geo::Polygon`].
///
/// A polygon without rings becomes one with an empty exterior.
pub fn polygon_to_geo(polygon: &Polygon) -> geo::Polygon {
    let exterior = polygon
        .exterior()
        .map(buffer_to_geo)
        .unwrap_or_else(|| geo::LineString::new(vec![]));
    let interiors = polygon.interiors().map(buffer_to_geo).collect();
    geo::Polygon::new(exterior, interiors)
}

/// Convert a MultiPoint to a [`geo::MultiPoint`], failing on empty member points.
pub fn multi_point_to_geo(multi_point: &MultiPoint) -> Result<geo::MultiPoint> {
    Ok(geo::MultiPoint::new(
        multi_point
            .iter()
            .map(point_to_geo)
            .collect::<Result<Vec<_>>>()?,
    ))
}

pub fn multi_line_string_to_geo(multi_line_string: &MultiLineString) -> geo::MultiLineString {
    geo::MultiLineString::new(multi_line_string.iter().map(line_string_to_geo).collect())
}

pub fn multi_polygon_to_geo(multi_polygon: &MultiPolygon) -> geo::MultiPolygon {
    geo::MultiPolygon::new(multi_polygon.iter().map(polygon_to_geo).collect())
}

pub fn geometry_collection_to_geo(
    geometry_collection: &GeometryCollection,
) -> Result<geo::GeometryCollection> {
    Ok(geo::GeometryCollection::new_from(
        geometry_collection
            .iter()
            .map(geometry_to_geo)
            .collect::<Result<Vec<_>>>()?,
    ))
}

/// Convert any Geometry to a [`geo::Geometry`].
///
/// Only the first two dimensions will be kept.
pub fn geometry_to_geo(geometry: &Geometry) -> Result<geo::Geometry> {
    let out = match geometry {
        Geometry::Point(g) => geo::Geometry::Point(point_to_geo(g)?),
        Geometry::LineString(g) => geo::Geometry::LineString(line_string_to_geo(g)),
        Geometry::Polygon(g) => geo::Geometry::Polygon(polygon_to_geo(g)),
        Geometry::MultiPoint(g) => geo::Geometry::MultiPoint(multi_point_to_geo(g)?),
        Geometry::MultiLineString(g) => {
            geo::Geometry::MultiLineString(multi_line_string_to_geo(g))
        }
        Geometry::MultiPolygon(g) => geo::Geometry::MultiPolygon(multi_polygon_to_geo(g)),
        Geometry::GeometryCollection(g) => {
            geo::Geometry::GeometryCollection(geometry_collection_to_geo(g)?)
        }
    };
    Ok(out)
}

fn buffer_from_geo<'a>(arena: &'a Arena, line: &geo::LineString) -> Result<VertexBuffer<'a>> {
    let mut buffer = VertexBuffer::with_capacity(arena, line.0.len(), Dimension::XY)?;
    for coord in &line.0 {
        buffer.push(Vertex::new(coord.x, coord.y))?;
    }
    Ok(buffer)
}

fn polygon_from_geo<'a>(arena: &'a Arena, polygon: &geo::Polygon) -> Result<Polygon<'a>> {
    if polygon.exterior().0.is_empty() && polygon.interiors().is_empty() {
        return Polygon::empty(arena, Dimension::XY);
    }
    let mut out = Polygon::with_capacity(arena, 1 + polygon.interiors().len(), Dimension::XY)?;
    out.push_ring(buffer_from_geo(arena, polygon.exterior())?)?;
    for interior in polygon.interiors() {
        out.push_ring(buffer_from_geo(arena, interior)?)?;
    }
    Ok(out)
}

/// Copy a [`geo::Geometry`] into `arena` as a two-dimensional geometry.
///
/// `Line`, `Rect` and `Triangle` become a LineString and Polygons respectively.
pub fn geometry_from_geo<'a>(arena: &'a Arena, geometry: &geo::Geometry) -> Result<Geometry<'a>> {
    let dim = Dimension::XY;
    let out: Geometry<'a> = match geometry {
        geo::Geometry::Point(p) => Point::new(arena, Vertex::new(p.x(), p.y()), dim)?.into(),
        geo::Geometry::Line(line) => {
            let coords = [line.start.x, line.start.y, line.end.x, line.end.y];
            LineString::new(VertexBuffer::from_interleaved(arena, &coords, dim)?).into()
        }
        geo::Geometry::LineString(line) => LineString::new(buffer_from_geo(arena, line)?).into(),
        geo::Geometry::Polygon(polygon) => polygon_from_geo(arena, polygon)?.into(),
        geo::Geometry::MultiPoint(multi) => {
            let mut out = MultiPoint::with_capacity(arena, multi.0.len(), dim)?;
            for p in multi.iter() {
                out.push(Point::new(arena, Vertex::new(p.x(), p.y()), dim)?)?;
            }
            out.into()
        }
        geo::Geometry::MultiLineString(multi) => {
            let mut out = MultiLineString::with_capacity(arena, multi.0.len(), dim)?;
            for line in multi.iter() {
                out.push(LineString::new(buffer_from_geo(arena, line)?))?;
            }
            out.into()
        }
        geo::Geometry::MultiPolygon(multi) => {
            let mut out = MultiPolygon::with_capacity(arena, multi.0.len(), dim)?;
            for polygon in multi.iter() {
                out.push(polygon_from_geo(arena, polygon)?)?;
            }
            out.into()
        }
        geo::Geometry::GeometryCollection(gc) => {
            let mut out = GeometryCollection::with_capacity(arena, gc.0.len(), dim)?;
            for part in gc.iter() {
                out.push(geometry_from_geo(arena, part)?)?;
            }
            out.into()
        }
        geo::Geometry::Rect(rect) => polygon_from_geo(arena, &rect.to_polygon())?.into(),
        geo::Geometry::Triangle(triangle) => {
            polygon_from_geo(arena, &triangle.to_polygon())?.into()
        }
    };
    Ok(out)
}
