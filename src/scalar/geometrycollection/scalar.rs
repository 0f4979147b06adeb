use crate::arena::Arena;
use crate::datatypes::{Dimension, MAX_NESTING_DEPTH};
use crate::error::{GeometryError, Result};
use crate::scalar::parts::{PartList, VertexStorage};
use crate::scalar::Geometry;

/// An ordered, possibly nested, collection of geometries of any kind.
///
/// Every member shares the collection's dimension, and nesting is bounded by
/// [`MAX_NESTING_DEPTH`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection<'a> {
    dim: Dimension,
    depth: usize,
    parts: PartList<'a, Geometry<'a>>,
}

impl<'a> GeometryCollection<'a> {
    /// An empty collection with room for `num_parts` members.
    pub fn with_capacity(arena: &'a Arena, num_parts: usize, dim: Dimension) -> Result<Self> {
        Ok(Self {
            dim,
            depth: 1,
            parts: PartList::with_capacity(arena, num_parts)?,
        })
    }

    pub fn empty(arena: &'a Arena, dim: Dimension) -> Result<Self> {
        Self::with_capacity(arena, 0, dim)
    }

    /// Append a member of the same dimension.
    ///
    /// Fails with [`GeometryError::NestingTooDeep`] if the collection would become nested more
    /// than [`MAX_NESTING_DEPTH`] levels deep.
    pub fn push(&mut self, part: Geometry<'a>) -> Result<()> {
        self.dim.check(part.dimension())?;
        let depth = self.depth.max(part.nesting_depth() + 1);
        if depth > MAX_NESTING_DEPTH {
            return Err(GeometryError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        self.parts.push(part)?;
        self.depth = depth;
        Ok(())
    }

    pub fn part(&self, i: usize) -> Option<&Geometry<'a>> {
        self.parts.get(i)
    }

    pub fn parts(&self) -> &[Geometry<'a>] {
        self.parts.as_slice()
    }

    pub(crate) fn parts_mut(&mut self) -> impl Iterator<Item = &mut Geometry<'a>> {
        self.parts.iter_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Geometry<'a>> {
        self.parts.iter()
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn part_capacity(&self) -> usize {
        self.parts.capacity()
    }

    pub fn num_vertices(&self) -> usize {
        self.parts.iter().map(|part| part.num_vertices()).sum()
    }

    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Whether every member is empty.
    pub fn is_empty(&self) -> bool {
        self.parts.iter().all(|part| part.is_empty())
    }

    /// The number of collection levels, counting this one.
    pub fn nesting_depth(&self) -> usize {
        self.depth
    }

    pub fn validate(&self) -> Result<()> {
        self.parts.iter().try_for_each(|part| part.validate())
    }

    pub fn deep_copy<'b>(&self, arena: &'b Arena) -> Result<GeometryCollection<'b>> {
        let mut out = GeometryCollection::with_capacity(arena, self.num_parts(), self.dim)?;
        for part in self.parts.iter() {
            out.push(part.deep_copy(arena)?)?;
        }
        Ok(out)
    }
}

impl<'b, 'a> IntoIterator for &'b GeometryCollection<'a> {
    type Item = &'b Geometry<'a>;
    type IntoIter = std::slice::Iter<'b, Geometry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl VertexStorage for GeometryCollection<'_> {
    fn vertex_storage(&self) -> Option<bool> {
        self.parts.storage()
    }
}
