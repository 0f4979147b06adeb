use std::io::{Cursor, ErrorKind};

use byteorder::{BigEndian, ByteOrder, LittleEndian, ReadBytesExt};

use crate::arena::Arena;
use crate::coord::{Vertex, VertexBuffer};
use crate::datatypes::{Dimension, GeometryType, MAX_NESTING_DEPTH};
use crate::error::{GeometryError, Result};
use crate::io::serialized::DeserializeOptions;
use crate::io::wkb::common::{Endianness, WkbType, COUNT_SIZE, HEADER_SIZE};
use crate::scalar::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

/// Read a WKB value, copying every vertex into `arena`.
pub fn read_wkb<'a>(arena: &'a Arena, bytes: &[u8]) -> Result<Geometry<'a>> {
    read_wkb_with_options(arena, bytes, &Default::default())
}

/// Read a WKB value with an explicit nesting limit.
pub fn read_wkb_with_options<'a>(
    arena: &'a Arena,
    bytes: &[u8],
    options: &DeserializeOptions,
) -> Result<Geometry<'a>> {
    let mut reader = WkbReader {
        arena,
        cursor: Cursor::new(bytes),
        max_depth: options.max_nesting_depth.min(MAX_NESTING_DEPTH),
    };
    let geom = reader.read_geometry(None, 0)?;

    let remaining = reader.remaining();
    if remaining != 0 {
        return Err(GeometryError::InvalidGeometryStructure(format!(
            "{remaining} trailing bytes after WKB {}",
            geom.geometry_type()
        )));
    }
    tracing::trace!(
        geometry_type = %geom.geometry_type(),
        dimension = %geom.dimension(),
        bytes = bytes.len(),
        "read WKB geometry"
    );
    Ok(geom)
}

struct WkbReader<'a, 'b> {
    arena: &'a Arena,
    cursor: Cursor<&'b [u8]>,
    max_depth: usize,
}

impl<'a> WkbReader<'a, '_> {
    /// Read one value, byte order marker included. Members must match the dimension of their
    /// `parent`.
    fn read_geometry(&mut self, parent: Option<Dimension>, depth: usize) -> Result<Geometry<'a>> {
        match Endianness::from_byte(self.cursor.read_u8()?)? {
            Endianness::BigEndian => self.read_body::<BigEndian>(parent, depth),
            Endianness::LittleEndian => self.read_body::<LittleEndian>(parent, depth),
        }
    }

    fn read_body<B: ByteOrder>(
        &mut self,
        parent: Option<Dimension>,
        depth: usize,
    ) -> Result<Geometry<'a>> {
        let wkb_type = WkbType::decode(self.cursor.read_u32::<B>()?)?;
        if wkb_type.has_srid {
            self.cursor.read_u32::<B>()?;
        }
        let WkbType {
            geometry_type, dim, ..
        } = wkb_type;
        if let Some(parent) = parent {
            parent.check(dim)?;
        }

        let geom = match geometry_type {
            GeometryType::Point => Geometry::Point(self.read_point::<B>(dim)?),
            GeometryType::LineString => {
                Geometry::LineString(LineString::new(self.read_vertices::<B>(dim)?))
            }
            GeometryType::Polygon => Geometry::Polygon(self.read_polygon::<B>(dim)?),
            GeometryType::MultiPoint => {
                let num_parts = self.read_count::<B>(HEADER_SIZE)?;
                let mut multi = MultiPoint::with_capacity(self.arena, num_parts, dim)?;
                for _ in 0..num_parts {
                    match self.read_geometry(Some(dim), depth)? {
                        Geometry::Point(part) => multi.push(part)?,
                        other => return Err(unexpected_member(GeometryType::Point, &other)),
                    }
                }
                Geometry::MultiPoint(multi)
            }
            GeometryType::MultiLineString => {
                let num_parts = self.read_count::<B>(HEADER_SIZE + COUNT_SIZE)?;
                let mut multi = MultiLineString::with_capacity(self.arena, num_parts, dim)?;
                for _ in 0..num_parts {
                    match self.read_geometry(Some(dim), depth)? {
                        Geometry::LineString(part) => multi.push(part)?,
                        other => return Err(unexpected_member(GeometryType::LineString, &other)),
                    }
                }
                Geometry::MultiLineString(multi)
            }
            GeometryType::MultiPolygon => {
                let num_parts = self.read_count::<B>(HEADER_SIZE + COUNT_SIZE)?;
                let mut multi = MultiPolygon::with_capacity(self.arena, num_parts, dim)?;
                for _ in 0..num_parts {
                    match self.read_geometry(Some(dim), depth)? {
                        Geometry::Polygon(part) => multi.push(part)?,
                        other => return Err(unexpected_member(GeometryType::Polygon, &other)),
                    }
                }
                Geometry::MultiPolygon(multi)
            }
            GeometryType::GeometryCollection => {
                if depth >= self.max_depth {
                    return Err(GeometryError::NestingTooDeep(self.max_depth));
                }
                let num_parts = self.read_count::<B>(HEADER_SIZE)?;
                let mut gc = GeometryCollection::with_capacity(self.arena, num_parts, dim)?;
                for _ in 0..num_parts {
                    gc.push(self.read_geometry(Some(dim), depth + 1)?)?;
                }
                Geometry::GeometryCollection(gc)
            }
        };
        Ok(geom)
    }

    /// A point whose X and Y are both NaN is empty.
    fn read_point<B: ByteOrder>(&mut self, dim: Dimension) -> Result<Point<'a>> {
        let vertex = self.read_vertex::<B>(dim)?;
        if vertex.x.is_nan() && vertex.y.is_nan() {
            Ok(Point::empty(dim))
        } else {
            Point::new(self.arena, vertex, dim)
        }
    }

    fn read_polygon<B: ByteOrder>(&mut self, dim: Dimension) -> Result<Polygon<'a>> {
        let num_rings = self.read_count::<B>(COUNT_SIZE)?;
        let mut polygon = Polygon::with_capacity(self.arena, num_rings, dim)?;
        for _ in 0..num_rings {
            polygon.push_ring(self.read_vertices::<B>(dim)?)?;
        }
        Ok(polygon)
    }

    fn read_vertices<B: ByteOrder>(&mut self, dim: Dimension) -> Result<VertexBuffer<'a>> {
        let count = self.read_count::<B>(dim.vertex_byte_size())?;
        let mut buffer = VertexBuffer::with_capacity(self.arena, count, dim)?;
        for _ in 0..count {
            buffer.push(self.read_vertex::<B>(dim)?)?;
        }
        Ok(buffer)
    }

    fn read_vertex<B: ByteOrder>(&mut self, dim: Dimension) -> Result<Vertex> {
        let x = self.cursor.read_f64::<B>()?;
        let y = self.cursor.read_f64::<B>()?;
        let mut vertex = Vertex::new(x, y);
        if dim.has_z() {
            vertex.z = self.cursor.read_f64::<B>()?;
        }
        if dim.has_m() {
            vertex.m = self.cursor.read_f64::<B>()?;
        }
        Ok(vertex)
    }

    /// Read a `u32` count of items that each occupy at least `min_item_size` bytes, rejecting
    /// counts that cannot fit in the remaining input.
    fn read_count<B: ByteOrder>(&mut self, min_item_size: usize) -> Result<usize> {
        let count = self.cursor.read_u32::<B>()? as usize;
        if count.saturating_mul(min_item_size) > self.remaining() {
            return Err(GeometryError::IOError(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("count {count} exceeds the {} remaining bytes", self.remaining()),
            )));
        }
        Ok(count)
    }

    fn remaining(&self) -> usize {
        self.cursor
            .get_ref()
            .len()
            .saturating_sub(self.cursor.position() as usize)
    }
}

fn unexpected_member(expected: GeometryType, found: &Geometry) -> GeometryError {
    GeometryError::InvalidGeometryStructure(format!(
        "expected {expected} member, found {}",
        found.geometry_type()
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::io::wkt::read_wkt;

    fn point_wkb<B: ByteOrder>(order: u8, code: u32, ordinates: &[f64]) -> Vec<u8> {
        let mut buf = vec![order, 0, 0, 0, 0];
        B::write_u32(&mut buf[1..], code);
        for value in ordinates {
            let mut bytes = [0u8; 8];
            B::write_f64(&mut bytes, *value);
            buf.extend(bytes);
        }
        buf
    }

    #[test]
    fn both_byte_orders() {
        let arena = Arena::new();
        let little = point_wkb::<LittleEndian>(1, 1, &[1., 2.]);
        let big = point_wkb::<BigEndian>(0, 1, &[1., 2.]);
        let expected = read_wkt(&arena, "POINT (1 2)").unwrap();
        assert_eq!(read_wkb(&arena, &little).unwrap(), expected);
        assert_eq!(read_wkb(&arena, &big).unwrap(), expected);
    }

    #[test]
    fn ewkb_flags_and_srid() {
        let arena = Arena::new();
        // POINT Z with SRID 4326
        let mut buf = vec![1];
        buf.extend((0x8000_0000u32 | 0x2000_0000 | 1).to_le_bytes());
        buf.extend(4326u32.to_le_bytes());
        for value in [1f64, 2., 3.] {
            buf.extend(value.to_le_bytes());
        }
        let geom = read_wkb(&arena, &buf).unwrap();
        assert_eq!(geom, read_wkt(&arena, "POINT Z (1 2 3)").unwrap());
    }

    #[test]
    fn nan_point_is_empty() {
        let arena = Arena::new();
        let buf = point_wkb::<LittleEndian>(1, 2001, &[f64::NAN, f64::NAN, 5.]);
        let geom = read_wkb(&arena, &buf).unwrap();
        assert!(geom.is_empty());
        assert_eq!(geom.dimension(), Dimension::XYM);
    }

    #[test]
    fn members_must_match() {
        let arena = Arena::new();
        // MULTIPOINT holding a POINT Z
        let mut buf = vec![1];
        buf.extend(4u32.to_le_bytes());
        buf.extend(1u32.to_le_bytes());
        buf.extend(point_wkb::<LittleEndian>(1, 1001, &[1., 2., 3.]));
        assert!(matches!(
            read_wkb(&arena, &buf),
            Err(GeometryError::DimensionalityMismatch(_))
        ));

        // MULTIPOINT holding a LINESTRING
        let mut buf = vec![1];
        buf.extend(4u32.to_le_bytes());
        buf.extend(1u32.to_le_bytes());
        buf.push(1);
        buf.extend(2u32.to_le_bytes());
        buf.extend(0u32.to_le_bytes());
        assert!(matches!(
            read_wkb(&arena, &buf),
            Err(GeometryError::InvalidGeometryStructure(_))
        ));
    }

    #[test]
    fn malformed_input() {
        let arena = Arena::new();
        assert!(matches!(
            read_wkb(&arena, &[2, 1, 0, 0, 0]),
            Err(GeometryError::InvalidGeometryStructure(_))
        ));
        assert!(matches!(
            read_wkb(&arena, &[1, 9, 0, 0, 0]),
            Err(GeometryError::UnknownWkbType(9))
        ));
        // LINESTRING claiming u32::MAX vertices
        assert!(matches!(
            read_wkb(&arena, &[1, 2, 0, 0, 0, 255, 255, 255, 255]),
            Err(GeometryError::IOError(_))
        ));

        let mut trailing = point_wkb::<LittleEndian>(1, 1, &[1., 2.]);
        trailing.push(0);
        assert!(matches!(
            read_wkb(&arena, &trailing),
            Err(GeometryError::InvalidGeometryStructure(_))
        ));
    }

    #[test]
    fn nesting_limit() {
        let arena = Arena::new();
        // Three collections, each holding the next
        let mut buf = Vec::new();
        for count in [1u32, 1, 0] {
            buf.push(1);
            buf.extend(7u32.to_le_bytes());
            buf.extend(count.to_le_bytes());
        }
        let options = DeserializeOptions {
            max_nesting_depth: 2,
        };
        assert!(matches!(
            read_wkb_with_options(&arena, &buf, &options),
            Err(GeometryError::NestingTooDeep(2))
        ));
        assert_eq!(read_wkb(&arena, &buf).unwrap().nesting_depth(), 3);
    }
}
