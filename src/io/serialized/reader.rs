use std::io::{Cursor, ErrorKind};
use std::marker::PhantomData;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::arena::Arena;
use crate::coord::VertexBuffer;
use crate::datatypes::{Dimension, GeometryType, MAX_NESTING_DEPTH};
use crate::error::{GeometryError, Result};
use crate::io::serialized::common::COUNT_SIZE;
use crate::io::serialized::header::read_header_from;
use crate::io::serialized::DeserializeOptions;
use crate::scalar::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

/// How vertex data is materialized while reading serialized bytes with lifetime `'b` into
/// geometries with lifetime `'a`.
pub trait ReadMode<'a, 'b> {
    fn vertices(
        arena: &'a Arena,
        bytes: &'b [u8],
        len: usize,
        dim: Dimension,
    ) -> Result<VertexBuffer<'a>>;
}

/// Vertex buffers are zero-copy views over the input, which must outlive the geometry.
#[derive(Debug)]
pub struct View;

impl<'a, 'b: 'a> ReadMode<'a, 'b> for View {
    fn vertices(
        _arena: &'a Arena,
        bytes: &'b [u8],
        len: usize,
        dim: Dimension,
    ) -> Result<VertexBuffer<'a>> {
        VertexBuffer::view(bytes, len, dim)
    }
}

/// Vertex data is copied into the arena; the input may be dropped after reading.
#[derive(Debug)]
pub struct Owned;

impl<'a, 'b> ReadMode<'a, 'b> for Owned {
    fn vertices(
        arena: &'a Arena,
        bytes: &'b [u8],
        len: usize,
        dim: Dimension,
    ) -> Result<VertexBuffer<'a>> {
        VertexBuffer::copy_from_bytes(arena, bytes, len, dim)
    }
}

/// Read a serialized geometry whose vertex buffers view `bytes` in place.
///
/// Ring and part lists are still allocated from `arena`. Use [`Geometry::deep_copy`] to detach
/// the result from `bytes`.
pub fn deserialize<'a>(
    arena: &'a Arena,
    bytes: &'a [u8],
    options: &DeserializeOptions,
) -> Result<Geometry<'a>> {
    read_geometry::<View>(arena, bytes, options)
}

/// Read a serialized geometry, copying every vertex into `arena`.
pub fn deserialize_owned<'a>(
    arena: &'a Arena,
    bytes: &[u8],
    options: &DeserializeOptions,
) -> Result<Geometry<'a>> {
    read_geometry::<Owned>(arena, bytes, options)
}

/// Read a whole serialized value, rejecting trailing bytes.
pub fn read_geometry<'a, 'b, M: ReadMode<'a, 'b>>(
    arena: &'a Arena,
    bytes: &'b [u8],
    options: &DeserializeOptions,
) -> Result<Geometry<'a>> {
    let mut cursor = Cursor::new(bytes);
    let header = read_header_from(&mut cursor)?;
    let mut reader = Reader::<M> {
        arena,
        cursor,
        dim: header.dimension,
        max_depth: options.max_nesting_depth.min(MAX_NESTING_DEPTH),
        mode: PhantomData,
    };
    let geom = reader.read_body(header.geometry_type, 0)?;

    let remaining = reader.remaining();
    if remaining != 0 {
        return Err(GeometryError::InvalidGeometryStructure(format!(
            "{remaining} trailing bytes after {}",
            header.geometry_type
        )));
    }

    tracing::trace!(
        geometry_type = %header.geometry_type,
        dimension = %header.dimension,
        bytes = bytes.len(),
        "deserialized geometry"
    );
    Ok(geom)
}

struct Reader<'a, 'b, M> {
    arena: &'a Arena,
    cursor: Cursor<&'b [u8]>,
    dim: Dimension,
    max_depth: usize,
    mode: PhantomData<M>,
}

impl<'a, 'b, M: ReadMode<'a, 'b>> Reader<'a, 'b, M> {
    /// Read the body of a geometry nested `depth` collections deep.
    fn read_body(&mut self, geometry_type: GeometryType, depth: usize) -> Result<Geometry<'a>> {
        let dim = self.dim;
        let geom = match geometry_type {
            GeometryType::Point => Geometry::Point(self.read_point()?),
            GeometryType::LineString => Geometry::LineString(self.read_line_string()?),
            GeometryType::Polygon => Geometry::Polygon(self.read_polygon()?),
            GeometryType::MultiPoint => {
                let num_parts = self.read_count(COUNT_SIZE)?;
                let mut multi = MultiPoint::with_capacity(self.arena, num_parts, dim)?;
                for _ in 0..num_parts {
                    multi.push(self.read_point()?)?;
                }
                Geometry::MultiPoint(multi)
            }
            GeometryType::MultiLineString => {
                let num_parts = self.read_count(COUNT_SIZE)?;
                let mut multi = MultiLineString::with_capacity(self.arena, num_parts, dim)?;
                for _ in 0..num_parts {
                    multi.push(self.read_line_string()?)?;
                }
                Geometry::MultiLineString(multi)
            }
            GeometryType::MultiPolygon => {
                let num_parts = self.read_count(COUNT_SIZE)?;
                let mut multi = MultiPolygon::with_capacity(self.arena, num_parts, dim)?;
                for _ in 0..num_parts {
                    multi.push(self.read_polygon()?)?;
                }
                Geometry::MultiPolygon(multi)
            }
            GeometryType::GeometryCollection => {
                if depth >= self.max_depth {
                    return Err(GeometryError::NestingTooDeep(self.max_depth));
                }
                // Every member is at least a type tag and a count.
                let num_parts = self.read_count(1 + COUNT_SIZE)?;
                let mut gc = GeometryCollection::with_capacity(self.arena, num_parts, dim)?;
                for _ in 0..num_parts {
                    let member_type = GeometryType::from_tag(self.cursor.read_u8()?)?;
                    gc.push(self.read_body(member_type, depth + 1)?)?;
                }
                Geometry::GeometryCollection(gc)
            }
        };
        Ok(geom)
    }

    fn read_point(&mut self) -> Result<Point<'a>> {
        let count = self.read_count(self.dim.vertex_byte_size())?;
        if count > 1 {
            return Err(GeometryError::InvalidGeometryStructure(format!(
                "a point holds at most one vertex, got {count}"
            )));
        }
        Point::try_from_buffer(self.read_vertices(count)?)
    }

    fn read_line_string(&mut self) -> Result<LineString<'a>> {
        let count = self.read_count(self.dim.vertex_byte_size())?;
        Ok(LineString::new(self.read_vertices(count)?))
    }

    fn read_polygon(&mut self) -> Result<Polygon<'a>> {
        let num_rings = self.read_count(COUNT_SIZE)?;
        let mut polygon = Polygon::with_capacity(self.arena, num_rings, self.dim)?;
        for _ in 0..num_rings {
            let count = self.read_count(self.dim.vertex_byte_size())?;
            polygon.push_ring(self.read_vertices(count)?)?;
        }
        Ok(polygon)
    }

    /// Read a `u32` count of items that each occupy at least `min_item_size` bytes.
    ///
    /// Counts that cannot fit in the remaining input are rejected before anything is allocated.
    fn read_count(&mut self, min_item_size: usize) -> Result<usize> {
        let count = self.cursor.read_u32::<LittleEndian>()? as usize;
        if count.saturating_mul(min_item_size) > self.remaining() {
            return Err(truncated(format!(
                "count {count} exceeds the {} remaining bytes",
                self.remaining()
            )));
        }
        Ok(count)
    }

    fn read_vertices(&mut self, count: usize) -> Result<VertexBuffer<'a>> {
        let bytes: &'b [u8] = *self.cursor.get_ref();
        let start = self.cursor.position() as usize;
        let end = start + count * self.dim.vertex_byte_size();
        let slice = bytes
            .get(start..end)
            .ok_or_else(|| truncated(format!("{count} vertices exceed the input")))?;
        self.cursor.set_position(end as u64);
        M::vertices(self.arena, slice, count, self.dim)
    }

    fn remaining(&self) -> usize {
        self.cursor
            .get_ref()
            .len()
            .saturating_sub(self.cursor.position() as usize)
    }
}

fn truncated(message: String) -> GeometryError {
    GeometryError::IOError(std::io::Error::new(ErrorKind::UnexpectedEof, message))
}
