use bumpalo::collections::Vec as BumpVec;
use byteorder::{ByteOrder, LittleEndian};

use crate::arena::Arena;
use crate::coord::Vertex;
use crate::datatypes::Dimension;
use crate::error::{GeometryError, Result};

/// Where the ordinates of a [`VertexBuffer`] live.
#[derive(Debug, Clone)]
enum Storage<'a> {
    /// Interleaved ordinates copied into the arena.
    Owned(BumpVec<'a, f64>),

    /// Little-endian interleaved ordinates borrowed from serialized bytes.
    View(&'a [u8]),
}

/// A fixed-capacity, interleaved array of vertices of one [`Dimension`].
///
/// A buffer either owns its ordinates (allocated from an [`Arena`]) or is a read-only view over
/// serialized little-endian bytes. Views cannot be modified; [`deep_copy`][Self::deep_copy]
/// turns one into an owned buffer.
#[derive(Debug, Clone)]
pub struct VertexBuffer<'a> {
    dim: Dimension,
    len: usize,
    capacity: usize,
    storage: Storage<'a>,
}

impl<'a> VertexBuffer<'a> {
    /// An empty buffer that references no memory and cannot grow.
    pub fn empty(dim: Dimension) -> Self {
        Self {
            dim,
            len: 0,
            capacity: 0,
            storage: Storage::View(&[]),
        }
    }

    /// Allocate an empty buffer that holds up to `capacity` vertices.
    pub fn with_capacity(arena: &'a Arena, capacity: usize, dim: Dimension) -> Result<Self> {
        let num_ordinates = capacity
            .checked_mul(dim.size())
            .ok_or(GeometryError::OutOfMemory(usize::MAX))?;
        let data = arena.vec_with_capacity(num_ordinates)?;
        Ok(Self {
            dim,
            len: 0,
            capacity,
            storage: Storage::Owned(data),
        })
    }

    /// Copy `vertices` into a new owned buffer.
    pub fn from_vertices(arena: &'a Arena, vertices: &[Vertex], dim: Dimension) -> Result<Self> {
        let mut buffer = Self::with_capacity(arena, vertices.len(), dim)?;
        for vertex in vertices {
            buffer.push(*vertex)?;
        }
        Ok(buffer)
    }

    /// Copy interleaved ordinates into a new owned buffer.
    pub fn from_interleaved(arena: &'a Arena, coords: &[f64], dim: Dimension) -> Result<Self> {
        if coords.len() % dim.size() != 0 {
            return Err(GeometryError::DimensionalityMismatch(format!(
                "{} ordinates do not form whole {dim} vertices",
                coords.len()
            )));
        }
        let len = coords.len() / dim.size();
        let mut data = arena.vec_with_capacity(coords.len())?;
        data.extend_from_slice(coords);
        Ok(Self {
            dim,
            len,
            capacity: len,
            storage: Storage::Owned(data),
        })
    }

    /// Reference `len` little-endian vertices stored in `bytes` without copying them.
    pub fn view(bytes: &'a [u8], len: usize, dim: Dimension) -> Result<Self> {
        check_byte_len(bytes, len, dim)?;
        Ok(Self {
            dim,
            len,
            capacity: len,
            storage: Storage::View(bytes),
        })
    }

    /// Copy `len` little-endian vertices stored in `bytes` into a new owned buffer.
    pub fn copy_from_bytes(
        arena: &'a Arena,
        bytes: &[u8],
        len: usize,
        dim: Dimension,
    ) -> Result<Self> {
        check_byte_len(bytes, len, dim)?;
        let mut data = arena.vec_with_capacity(len * dim.size())?;
        data.extend(bytes.chunks_exact(8).map(LittleEndian::read_f64));
        Ok(Self {
            dim,
            len,
            capacity: len,
            storage: Storage::Owned(data),
        })
    }

    /// Copy this buffer, view or not, into `arena`.
    pub fn deep_copy<'b>(&self, arena: &'b Arena) -> Result<VertexBuffer<'b>> {
        let mut data = arena.vec_with_capacity(self.len * self.dim.size())?;
        match &self.storage {
            Storage::Owned(coords) => data.extend_from_slice(coords),
            Storage::View(bytes) => data.extend(bytes.chunks_exact(8).map(LittleEndian::read_f64)),
        }
        Ok(VertexBuffer {
            dim: self.dim,
            len: self.len,
            capacity: self.len,
            storage: Storage::Owned(data),
        })
    }

    /// Copy this buffer into `arena` with every vertex rewritten to `dim`.
    ///
    /// Ordinates the source lacks are filled with `default_z` / `default_m`; ordinates the
    /// target lacks are dropped.
    pub fn with_dimension<'b>(
        &self,
        arena: &'b Arena,
        dim: Dimension,
        default_z: f64,
        default_m: f64,
    ) -> Result<VertexBuffer<'b>> {
        let mut out = VertexBuffer::with_capacity(arena, self.len, dim)?;
        for mut vertex in self.iter() {
            if !self.dim.has_z() {
                vertex.z = default_z;
            }
            if !self.dim.has_m() {
                vertex.m = default_m;
            }
            out.push(vertex)?;
        }
        Ok(out)
    }

    /// Append a vertex, writing only the ordinates this buffer's dimension stores.
    pub fn push(&mut self, vertex: Vertex) -> Result<()> {
        if self.len == self.capacity {
            return Err(GeometryError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let dim = self.dim;
        let data = self.owned_mut()?;
        data.push(vertex.x);
        data.push(vertex.y);
        if dim.has_z() {
            data.push(vertex.z);
        }
        if dim.has_m() {
            data.push(vertex.m);
        }
        self.len += 1;
        Ok(())
    }

    /// Access the vertex at `i`, or `None` if out of bounds.
    pub fn get(&self, i: usize) -> Option<Vertex> {
        if i >= self.len {
            return None;
        }
        let base = i * self.dim.size();
        let mut vertex = Vertex::new(self.ordinate(base), self.ordinate(base + 1));
        let mut next = base + 2;
        if self.dim.has_z() {
            vertex.z = self.ordinate(next);
            next += 1;
        }
        if self.dim.has_m() {
            vertex.m = self.ordinate(next);
        }
        Some(vertex)
    }

    /// Overwrite the vertex at `i`.
    pub fn set(&mut self, i: usize, vertex: Vertex) -> Result<()> {
        if i >= self.len {
            return Err(GeometryError::IndexOutOfBounds {
                index: i,
                len: self.len,
            });
        }
        let dim = self.dim;
        let base = i * dim.size();
        let data = self.owned_mut()?;
        data[base] = vertex.x;
        data[base + 1] = vertex.y;
        let mut next = base + 2;
        if dim.has_z() {
            data[next] = vertex.z;
            next += 1;
        }
        if dim.has_m() {
            data[next] = vertex.m;
        }
        Ok(())
    }

    /// Swap the X and Y ordinates of every vertex in place.
    pub fn swap_xy(&mut self) -> Result<()> {
        if self.len == 0 {
            return Ok(());
        }
        let stride = self.dim.size();
        let data = self.owned_mut()?;
        for vertex in data.chunks_exact_mut(stride) {
            vertex.swap(0, 1);
        }
        Ok(())
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.len
    }

    /// The number of vertices this buffer can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer holds no vertices.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The coordinate dimension of every vertex in this buffer.
    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Whether the ordinates live in the arena rather than in borrowed serialized bytes.
    ///
    /// An empty buffer references no memory and reports `true`.
    pub fn owns_memory(&self) -> bool {
        match &self.storage {
            Storage::Owned(_) => true,
            Storage::View(bytes) => bytes.is_empty(),
        }
    }

    /// Whether the first and last vertex share a planar position.
    ///
    /// An empty buffer is not closed; a single vertex is.
    pub fn is_closed(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => first.xy_eq(&last),
            _ => false,
        }
    }

    /// The first vertex, if any.
    pub fn first(&self) -> Option<Vertex> {
        self.get(0)
    }

    /// The last vertex, if any.
    pub fn last(&self) -> Option<Vertex> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// An iterator over the vertices in this buffer.
    pub fn iter(&self) -> VertexIter<'_, 'a> {
        VertexIter {
            buffer: self,
            index: 0,
            end: self.len,
        }
    }

    /// The borrowed serialized bytes if this buffer is a view.
    pub(crate) fn view_bytes(&self) -> Option<&'a [u8]> {
        match self.storage {
            Storage::View(bytes) => Some(bytes),
            Storage::Owned(_) => None,
        }
    }

    /// Read the `i`th interleaved ordinate. The caller guarantees `i` is in bounds.
    fn ordinate(&self, i: usize) -> f64 {
        match &self.storage {
            Storage::Owned(data) => data[i],
            Storage::View(bytes) => LittleEndian::read_f64(&bytes[i * 8..]),
        }
    }

    fn owned_mut(&mut self) -> Result<&mut BumpVec<'a, f64>> {
        match &mut self.storage {
            Storage::Owned(data) => Ok(data),
            Storage::View(_) => Err(GeometryError::InvalidGeometryStructure(
                "cannot modify a zero-copy view; deep copy it into an arena first".to_string(),
            )),
        }
    }
}

impl PartialEq for VertexBuffer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.dim == other.dim && self.len == other.len && self.iter().eq(other.iter())
    }
}

fn check_byte_len(bytes: &[u8], len: usize, dim: Dimension) -> Result<()> {
    let expected = len.checked_mul(dim.vertex_byte_size());
    if expected != Some(bytes.len()) {
        return Err(GeometryError::InvalidGeometryStructure(format!(
            "{} bytes cannot hold {len} {dim} vertices",
            bytes.len()
        )));
    }
    Ok(())
}

/// An iterator over the vertices of a [`VertexBuffer`].
#[derive(Debug, Clone)]
pub struct VertexIter<'b, 'a> {
    buffer: &'b VertexBuffer<'a>,
    index: usize,
    end: usize,
}

impl Iterator for VertexIter<'_, '_> {
    type Item = Vertex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            return None;
        }
        let old = self.index;
        self.index += 1;
        self.buffer.get(old)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.end - self.index, Some(self.end - self.index))
    }
}

impl DoubleEndedIterator for VertexIter<'_, '_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index == self.end {
            None
        } else {
            self.end -= 1;
            self.buffer.get(self.end)
        }
    }
}

impl ExactSizeIterator for VertexIter<'_, '_> {}

#[cfg(test)]
mod test {
    use byteorder::WriteBytesExt;

    use super::*;

    fn le_bytes(coords: &[f64]) -> Vec<u8> {
        let mut buf = vec![];
        for c in coords {
            buf.write_f64::<LittleEndian>(*c).unwrap();
        }
        buf
    }

    #[test]
    fn push_get_set() {
        let arena = Arena::new();
        let mut buffer = VertexBuffer::with_capacity(&arena, 2, Dimension::XYZ).unwrap();
        buffer.push(Vertex::xyz(1., 2., 3.)).unwrap();
        buffer.push(Vertex::xyz(4., 5., 6.)).unwrap();

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(1), Some(Vertex::xyz(4., 5., 6.)));
        assert_eq!(buffer.get(2), None);

        buffer.set(0, Vertex::xyz(7., 8., 9.)).unwrap();
        assert_eq!(buffer.first(), Some(Vertex::xyz(7., 8., 9.)));

        assert!(matches!(
            buffer.set(2, Vertex::default()),
            Err(GeometryError::IndexOutOfBounds { index: 2, len: 2 })
        ));
    }

    #[test]
    fn push_past_capacity() {
        let arena = Arena::new();
        let mut buffer = VertexBuffer::with_capacity(&arena, 1, Dimension::XY).unwrap();
        buffer.push(Vertex::new(0., 0.)).unwrap();
        assert!(matches!(
            buffer.push(Vertex::new(1., 1.)),
            Err(GeometryError::CapacityExceeded { capacity: 1 })
        ));
    }

    #[test]
    fn drops_unstored_ordinates() {
        let arena = Arena::new();
        let mut buffer = VertexBuffer::with_capacity(&arena, 1, Dimension::XYM).unwrap();
        buffer.push(Vertex::xyzm(1., 2., 3., 4.)).unwrap();
        assert_eq!(buffer.get(0), Some(Vertex::xym(1., 2., 4.)));
    }

    #[test]
    fn closed() {
        let arena = Arena::new();
        assert!(!VertexBuffer::empty(Dimension::XY).is_closed());

        let single = VertexBuffer::from_vertices(&arena, &[Vertex::new(1., 1.)], Dimension::XY)
            .unwrap();
        assert!(single.is_closed());

        let ring = VertexBuffer::from_interleaved(
            &arena,
            &[0., 0., 1., 0., 1., 1., 0., 0.],
            Dimension::XY,
        )
        .unwrap();
        assert!(ring.is_closed());

        let line =
            VertexBuffer::from_interleaved(&arena, &[0., 0., 1., 0.], Dimension::XY).unwrap();
        assert!(!line.is_closed());
    }

    #[test]
    fn view_is_read_only() {
        let bytes = le_bytes(&[1., 2., 3., 4.]);
        let mut view = VertexBuffer::view(&bytes, 2, Dimension::XY).unwrap();
        assert!(!view.owns_memory());
        assert_eq!(view.get(1), Some(Vertex::new(3., 4.)));
        assert!(matches!(
            view.set(0, Vertex::default()),
            Err(GeometryError::InvalidGeometryStructure(_))
        ));
        assert!(view.swap_xy().is_err());

        let arena = Arena::new();
        let mut owned = view.deep_copy(&arena).unwrap();
        assert!(owned.owns_memory());
        assert_eq!(owned, view);
        owned.swap_xy().unwrap();
        assert_eq!(owned.get(0), Some(Vertex::new(2., 1.)));
    }

    #[test]
    fn view_length_must_match() {
        let bytes = le_bytes(&[1., 2., 3.]);
        assert!(VertexBuffer::view(&bytes, 2, Dimension::XY).is_err());
        assert!(VertexBuffer::view(&bytes, 1, Dimension::XYZ).is_ok());
    }

    #[test]
    fn copy_matches_view() {
        let arena = Arena::new();
        let bytes = le_bytes(&[1., 2., 3., 4., 5., 6., 7., 8.]);
        let copied = VertexBuffer::copy_from_bytes(&arena, &bytes, 2, Dimension::XYZM).unwrap();
        let view = VertexBuffer::view(&bytes, 2, Dimension::XYZM).unwrap();
        assert!(copied.owns_memory());
        assert_eq!(copied, view);
        assert_eq!(copied.last(), Some(Vertex::xyzm(5., 6., 7., 8.)));
    }

    #[test]
    fn change_dimension() {
        let arena = Arena::new();
        let xym = VertexBuffer::from_vertices(&arena, &[Vertex::xym(1., 2., 9.)], Dimension::XYM)
            .unwrap();

        let xyzm = xym.with_dimension(&arena, Dimension::XYZM, 5., 0.).unwrap();
        assert_eq!(xyzm.get(0), Some(Vertex::xyzm(1., 2., 5., 9.)));

        let xy = xyzm.with_dimension(&arena, Dimension::XY, 0., 0.).unwrap();
        assert_eq!(xy.dimension(), Dimension::XY);
        assert_eq!(xy.get(0), Some(Vertex::new(1., 2.)));
    }

    #[test]
    fn iterates_both_ways() {
        let arena = Arena::new();
        let buffer =
            VertexBuffer::from_interleaved(&arena, &[0., 0., 1., 1., 2., 2.], Dimension::XY)
                .unwrap();
        let xs: Vec<f64> = buffer.iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![0., 1., 2.]);
        let xs: Vec<f64> = buffer.iter().rev().map(|v| v.x).collect();
        assert_eq!(xs, vec![2., 1., 0.]);
        assert_eq!(buffer.iter().len(), 3);
    }
}
