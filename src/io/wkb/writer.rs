use std::io::{Cursor, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::coord::{Vertex, VertexBuffer};
use crate::datatypes::{Dimension, GeometryType};
use crate::error::Result;
use crate::io::wkb::common::{Endianness, WkbType, COUNT_SIZE, HEADER_SIZE};
use crate::scalar::{Geometry, LineString, Point, Polygon};

/// The byte length of the WKB encoding of `geom`.
pub fn wkb_size(geom: &Geometry) -> usize {
    match geom {
        Geometry::Point(g) => point_size(g),
        Geometry::LineString(g) => line_string_size(g),
        Geometry::Polygon(g) => polygon_size(g),
        Geometry::MultiPoint(g) => {
            HEADER_SIZE + COUNT_SIZE + g.iter().map(point_size).sum::<usize>()
        }
        Geometry::MultiLineString(g) => {
            HEADER_SIZE + COUNT_SIZE + g.iter().map(line_string_size).sum::<usize>()
        }
        Geometry::MultiPolygon(g) => {
            HEADER_SIZE + COUNT_SIZE + g.iter().map(polygon_size).sum::<usize>()
        }
        Geometry::GeometryCollection(g) => {
            HEADER_SIZE + COUNT_SIZE + g.iter().map(wkb_size).sum::<usize>()
        }
    }
}

fn point_size(geom: &Point) -> usize {
    HEADER_SIZE + geom.dimension().vertex_byte_size()
}

fn line_string_size(geom: &LineString) -> usize {
    HEADER_SIZE + buffer_size(geom.coords())
}

fn polygon_size(geom: &Polygon) -> usize {
    HEADER_SIZE + COUNT_SIZE + geom.rings().iter().map(buffer_size).sum::<usize>()
}

fn buffer_size(buffer: &VertexBuffer) -> usize {
    COUNT_SIZE + buffer.len() * buffer.dimension().vertex_byte_size()
}

/// Encode `geom` as little-endian ISO WKB into a new byte vector.
pub fn to_wkb(geom: &Geometry) -> Result<Vec<u8>> {
    let mut writer = Cursor::new(Vec::with_capacity(wkb_size(geom)));
    write_wkb(&mut writer, geom)?;
    Ok(writer.into_inner())
}

/// Write `geom` to a Writer as little-endian ISO WKB.
pub fn write_wkb<W: Write>(mut writer: W, geom: &Geometry) -> Result<()> {
    write_geometry(&mut writer, geom)
}

fn write_geometry<W: Write>(writer: &mut W, geom: &Geometry) -> Result<()> {
    match geom {
        Geometry::Point(g) => write_point(writer, g),
        Geometry::LineString(g) => write_line_string(writer, g),
        Geometry::Polygon(g) => write_polygon(writer, g),
        Geometry::MultiPoint(g) => {
            write_header(writer, GeometryType::MultiPoint, g.dimension())?;
            write_count(writer, g.num_parts())?;
            g.iter().try_for_each(|part| write_point(writer, part))
        }
        Geometry::MultiLineString(g) => {
            write_header(writer, GeometryType::MultiLineString, g.dimension())?;
            write_count(writer, g.num_parts())?;
            g.iter().try_for_each(|part| write_line_string(writer, part))
        }
        Geometry::MultiPolygon(g) => {
            write_header(writer, GeometryType::MultiPolygon, g.dimension())?;
            write_count(writer, g.num_parts())?;
            g.iter().try_for_each(|part| write_polygon(writer, part))
        }
        Geometry::GeometryCollection(g) => {
            write_header(writer, GeometryType::GeometryCollection, g.dimension())?;
            write_count(writer, g.num_parts())?;
            g.iter().try_for_each(|part| write_geometry(writer, part))
        }
    }
}

fn write_header<W: Write>(
    writer: &mut W,
    geometry_type: GeometryType,
    dim: Dimension,
) -> Result<()> {
    writer.write_u8(Endianness::LittleEndian.into())?;
    writer.write_u32::<LittleEndian>(WkbType::iso_code(geometry_type, dim))?;
    Ok(())
}

fn write_count<W: Write>(writer: &mut W, count: usize) -> Result<()> {
    writer.write_u32::<LittleEndian>(count as u32)?;
    Ok(())
}

/// An empty point has NaN ordinates.
fn write_point<W: Write>(writer: &mut W, geom: &Point) -> Result<()> {
    let dim = geom.dimension();
    write_header(writer, GeometryType::Point, dim)?;
    let nan = Vertex::xyzm(f64::NAN, f64::NAN, f64::NAN, f64::NAN);
    write_vertex(writer, &geom.vertex().unwrap_or(nan), dim)
}

fn write_line_string<W: Write>(writer: &mut W, geom: &LineString) -> Result<()> {
    write_header(writer, GeometryType::LineString, geom.dimension())?;
    write_vertices(writer, geom.coords())
}

fn write_polygon<W: Write>(writer: &mut W, geom: &Polygon) -> Result<()> {
    write_header(writer, GeometryType::Polygon, geom.dimension())?;
    write_count(writer, geom.num_rings())?;
    geom.rings()
        .iter()
        .try_for_each(|ring| write_vertices(writer, ring))
}

fn write_vertices<W: Write>(writer: &mut W, buffer: &VertexBuffer) -> Result<()> {
    write_count(writer, buffer.len())?;
    buffer
        .iter()
        .try_for_each(|vertex| write_vertex(writer, &vertex, buffer.dimension()))
}

fn write_vertex<W: Write>(writer: &mut W, vertex: &Vertex, dim: Dimension) -> Result<()> {
    writer.write_f64::<LittleEndian>(vertex.x)?;
    writer.write_f64::<LittleEndian>(vertex.y)?;
    if dim.has_z() {
        writer.write_f64::<LittleEndian>(vertex.z)?;
    }
    if dim.has_m() {
        writer.write_f64::<LittleEndian>(vertex.m)?;
    }
    Ok(())
}
