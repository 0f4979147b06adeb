//! [`Display`] implementations that write geometries as WKT.
//!
//! Every keyword carries the `Z`, `M` or `ZM` tag, including the members of a geometry
//! collection.

use std::fmt::{Display, Formatter, Result};

use crate::coord::{Vertex, VertexBuffer};
use crate::datatypes::{Dimension, GeometryType};
use crate::scalar::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

fn write_keyword(f: &mut Formatter<'_>, geometry_type: GeometryType, dim: Dimension) -> Result {
    f.write_str(geometry_type.wkt_name())?;
    match dim {
        Dimension::XY => {}
        Dimension::XYZ => f.write_str(" Z")?,
        Dimension::XYM => f.write_str(" M")?,
        Dimension::XYZM => f.write_str(" ZM")?,
    }
    f.write_str(" ")
}

fn write_vertex(f: &mut Formatter<'_>, vertex: &Vertex, dim: Dimension) -> Result {
    write!(f, "{} {}", vertex.x, vertex.y)?;
    if dim.has_z() {
        write!(f, " {}", vertex.z)?;
    }
    if dim.has_m() {
        write!(f, " {}", vertex.m)?;
    }
    Ok(())
}

fn write_vertices(f: &mut Formatter<'_>, buffer: &VertexBuffer) -> Result {
    if buffer.is_empty() {
        return f.write_str("EMPTY");
    }
    f.write_str("(")?;
    for (i, vertex) in buffer.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_vertex(f, &vertex, buffer.dimension())?;
    }
    f.write_str(")")
}

/// Write `EMPTY` or the parenthesized, comma-separated parts.
fn write_parts<T>(
    f: &mut Formatter<'_>,
    parts: &[T],
    mut write_part: impl FnMut(&mut Formatter<'_>, &T) -> Result,
) -> Result {
    if parts.is_empty() {
        return f.write_str("EMPTY");
    }
    f.write_str("(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_part(f, part)?;
    }
    f.write_str(")")
}

fn write_point(f: &mut Formatter<'_>, point: &Point) -> Result {
    write_vertices(f, point.coords())
}

fn write_line_string(f: &mut Formatter<'_>, line: &LineString) -> Result {
    write_vertices(f, line.coords())
}

fn write_polygon(f: &mut Formatter<'_>, polygon: &Polygon) -> Result {
    write_parts(f, polygon.rings(), |f, ring| write_vertices(f, ring))
}

fn write_multi_point(f: &mut Formatter<'_>, multi: &MultiPoint) -> Result {
    write_parts(f, multi.parts(), |f, point| write_point(f, point))
}

fn write_multi_line_string(f: &mut Formatter<'_>, multi: &MultiLineString) -> Result {
    write_parts(f, multi.parts(), |f, line| write_line_string(f, line))
}

fn write_multi_polygon(f: &mut Formatter<'_>, multi: &MultiPolygon) -> Result {
    write_parts(f, multi.parts(), |f, polygon| write_polygon(f, polygon))
}

fn write_geometry_collection(f: &mut Formatter<'_>, gc: &GeometryCollection) -> Result {
    write_parts(f, gc.parts(), |f, part| {
        write_keyword(f, part.geometry_type(), part.dimension())?;
        write_body(f, part)
    })
}

fn write_body(f: &mut Formatter<'_>, geom: &Geometry) -> Result {
    match geom {
        Geometry::Point(g) => write_point(f, g),
        Geometry::LineString(g) => write_line_string(f, g),
        Geometry::Polygon(g) => write_polygon(f, g),
        Geometry::MultiPoint(g) => write_multi_point(f, g),
        Geometry::MultiLineString(g) => write_multi_line_string(f, g),
        Geometry::MultiPolygon(g) => write_multi_polygon(f, g),
        Geometry::GeometryCollection(g) => write_geometry_collection(f, g),
    }
}

impl Display for Geometry<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write_keyword(f, self.geometry_type(), self.dimension())?;
        write_body(f, self)
    }
}

macro_rules! impl_display {
    ($type:ident, $write_body:ident) => {
        impl Display for $type<'_> {
            fn fmt(&self, f: &mut Formatter<'_>) -> Result {
                write_keyword(f, GeometryType::$type, self.dimension())?;
                $write_body(f, self)
            }
        }
    };
}

impl_display!(Point, write_point);
impl_display!(LineString, write_line_string);
impl_display!(Polygon, write_polygon);
impl_display!(MultiPoint, write_multi_point);
impl_display!(MultiLineString, write_multi_line_string);
impl_display!(MultiPolygon, write_multi_polygon);
impl_display!(GeometryCollection, write_geometry_collection);
