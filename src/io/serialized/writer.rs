use std::io::{Cursor, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::algorithm::native::BoundingRect;
use crate::coord::VertexBuffer;
use crate::datatypes::MAX_NESTING_DEPTH;
use crate::error::{GeometryError, Result};
use crate::io::serialized::common::{Flags, BBOX_SIZE, COUNT_SIZE, HEADER_SIZE};
use crate::io::serialized::SerializeOptions;
use crate::scalar::{Geometry, LineString, Point, Polygon};

/// The byte length of the serialized form of `geom`.
pub fn serialized_size(geom: &Geometry, options: &SerializeOptions) -> usize {
    let bbox_size = if stores_bbox(geom, options) {
        BBOX_SIZE
    } else {
        0
    };
    HEADER_SIZE + bbox_size + body_size(geom)
}

/// Serialize `geom` into a new byte vector.
pub fn serialize(geom: &Geometry, options: &SerializeOptions) -> Result<Vec<u8>> {
    let size = serialized_size(geom, options);
    let mut writer = Cursor::new(Vec::with_capacity(size));
    write_geometry(&mut writer, geom, options)?;
    let buf = writer.into_inner();
    tracing::trace!(
        geometry_type = %geom.geometry_type(),
        dimension = %geom.dimension(),
        bytes = buf.len(),
        "serialized geometry"
    );
    Ok(buf)
}

/// Write the serialized form of `geom` to a Writer.
///
/// Values are little-endian: a type tag, a flags byte, the optional bounding box, then the body.
pub fn write_geometry<W: Write>(
    mut writer: W,
    geom: &Geometry,
    options: &SerializeOptions,
) -> Result<()> {
    let max_depth = options.max_nesting_depth.min(MAX_NESTING_DEPTH);
    if geom.nesting_depth() > max_depth {
        return Err(GeometryError::NestingTooDeep(max_depth));
    }

    let bbox = if stores_bbox(geom, options) {
        geom.bounding_rect()
    } else {
        None
    };

    writer.write_u8(geom.geometry_type().tag())?;
    writer.write_u8(Flags::new(geom.dimension(), bbox.is_some()).byte())?;
    if let Some(bbox) = bbox {
        writer.write_f64::<LittleEndian>(bbox.minx)?;
        writer.write_f64::<LittleEndian>(bbox.miny)?;
        writer.write_f64::<LittleEndian>(bbox.maxx)?;
        writer.write_f64::<LittleEndian>(bbox.maxy)?;
    }
    write_body(&mut writer, geom)
}

/// Points carry their single vertex instead of a bounding box.
fn stores_bbox(geom: &Geometry, options: &SerializeOptions) -> bool {
    options.write_bounding_box && !matches!(geom, Geometry::Point(_)) && !geom.is_empty()
}

fn body_size(geom: &Geometry) -> usize {
    match geom {
        Geometry::Point(g) => point_size(g),
        Geometry::LineString(g) => line_string_size(g),
        Geometry::Polygon(g) => polygon_size(g),
        Geometry::MultiPoint(g) => COUNT_SIZE + g.iter().map(point_size).sum::<usize>(),
        Geometry::MultiLineString(g) => {
            COUNT_SIZE + g.iter().map(line_string_size).sum::<usize>()
        }
        Geometry::MultiPolygon(g) => COUNT_SIZE + g.iter().map(polygon_size).sum::<usize>(),
        Geometry::GeometryCollection(g) => {
            COUNT_SIZE + g.iter().map(|part| 1 + body_size(part)).sum::<usize>()
        }
    }
}

fn vertices_size(buffer: &VertexBuffer) -> usize {
    COUNT_SIZE + buffer.len() * buffer.dimension().vertex_byte_size()
}

fn point_size(geom: &Point) -> usize {
    vertices_size(geom.coords())
}

fn line_string_size(geom: &LineString) -> usize {
    vertices_size(geom.coords())
}

fn polygon_size(geom: &Polygon) -> usize {
    COUNT_SIZE + geom.rings().iter().map(vertices_size).sum::<usize>()
}

fn write_body<W: Write>(writer: &mut W, geom: &Geometry) -> Result<()> {
    match geom {
        Geometry::Point(g) => write_vertices(writer, g.coords()),
        Geometry::LineString(g) => write_vertices(writer, g.coords()),
        Geometry::Polygon(g) => write_polygon(writer, g),
        Geometry::MultiPoint(g) => {
            write_count(writer, g.num_parts())?;
            g.iter().try_for_each(|p| write_vertices(writer, p.coords()))
        }
        Geometry::MultiLineString(g) => {
            write_count(writer, g.num_parts())?;
            g.iter().try_for_each(|l| write_vertices(writer, l.coords()))
        }
        Geometry::MultiPolygon(g) => {
            write_count(writer, g.num_parts())?;
            g.iter().try_for_each(|p| write_polygon(writer, p))
        }
        Geometry::GeometryCollection(g) => {
            write_count(writer, g.num_parts())?;
            for part in g.iter() {
                writer.write_u8(part.geometry_type().tag())?;
                write_body(writer, part)?;
            }
            Ok(())
        }
    }
}

fn write_polygon<W: Write>(writer: &mut W, geom: &Polygon) -> Result<()> {
    write_count(writer, geom.num_rings())?;
    geom.rings()
        .iter()
        .try_for_each(|ring| write_vertices(writer, ring))
}

fn write_count<W: Write>(writer: &mut W, count: usize) -> Result<()> {
    let count: u32 = count.try_into().map_err(|_| {
        GeometryError::InvalidGeometryStructure(format!("{count} items exceed the u32 count field"))
    })?;
    writer.write_u32::<LittleEndian>(count)?;
    Ok(())
}

/// Write a vertex count followed by the interleaved ordinates.
fn write_vertices<W: Write>(writer: &mut W, buffer: &VertexBuffer) -> Result<()> {
    write_count(writer, buffer.len())?;
    // A view already holds exactly the serialized ordinates.
    if let Some(bytes) = buffer.view_bytes() {
        writer.write_all(bytes)?;
        return Ok(());
    }
    let dim = buffer.dimension();
    for vertex in buffer.iter() {
        writer.write_f64::<LittleEndian>(vertex.x)?;
        writer.write_f64::<LittleEndian>(vertex.y)?;
        if dim.has_z() {
            writer.write_f64::<LittleEndian>(vertex.z)?;
        }
        if dim.has_m() {
            writer.write_f64::<LittleEndian>(vertex.m)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arena::Arena;
    use crate::coord::Vertex;
    use crate::datatypes::Dimension;
    use crate::scalar::GeometryCollection;
    use crate::test::linestring::ls0;
    use crate::test::point::p_zm;

    #[test]
    fn size_matches_output() {
        let arena = Arena::new();
        let geom: Geometry = ls0(&arena).into();
        let options = SerializeOptions::default();
        let buf = serialize(&geom, &options).unwrap();
        // header + bbox + count + 3 * (x, y)
        assert_eq!(buf.len(), 2 + 32 + 4 + 48);
        assert_eq!(serialized_size(&geom, &options), buf.len());
        assert_eq!(&buf[..2], &[2, 0b100]);
    }

    #[test]
    fn point_layout() {
        let arena = Arena::new();
        let buf = serialize(&p_zm(&arena).into(), &SerializeOptions::default()).unwrap();
        assert_eq!(buf.len(), 2 + 4 + 32);
        assert_eq!(&buf[..6], &[1, 0b011, 1, 0, 0, 0]);
        assert_eq!(&buf[6..14], &1f64.to_le_bytes());
        assert_eq!(&buf[30..38], &4f64.to_le_bytes());
    }

    #[test]
    fn collection_layout() {
        let arena = Arena::new();
        let mut gc = GeometryCollection::with_capacity(&arena, 1, Dimension::XY).unwrap();
        gc.push(
            Point::new(&arena, Vertex::new(1., 2.), Dimension::XY)
                .unwrap()
                .into(),
        )
        .unwrap();
        let buf = serialize(&gc.into(), &SerializeOptions::default()).unwrap();
        // header, bbox, part count, member tag, point count, x, y
        assert_eq!(buf.len(), 2 + 32 + 4 + 1 + 4 + 16);
        assert_eq!(buf[0], 7);
        assert_eq!(&buf[34..38], &1u32.to_le_bytes());
        assert_eq!(buf[38], 1);
    }

    #[test]
    fn depth_limit() {
        let arena = Arena::new();
        let mut outer = GeometryCollection::with_capacity(&arena, 1, Dimension::XY).unwrap();
        outer
            .push(GeometryCollection::empty(&arena, Dimension::XY).unwrap().into())
            .unwrap();
        let options = SerializeOptions {
            max_nesting_depth: 1,
            ..Default::default()
        };
        assert!(matches!(
            serialize(&outer.into(), &options),
            Err(GeometryError::NestingTooDeep(1))
        ));
    }
}
