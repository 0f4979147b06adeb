use bumpalo::collections::Vec as BumpVec;

use crate::arena::Arena;
use crate::coord::VertexBuffer;
use crate::error::{GeometryError, Result};

/// Where the vertices of a value live.
pub(crate) trait VertexStorage {
    /// `Some(true)` for arena-owned vertices, `Some(false)` for a view into serialized bytes and
    /// `None` when there are no vertices at all.
    fn vertex_storage(&self) -> Option<bool>;
}

impl VertexStorage for VertexBuffer<'_> {
    fn vertex_storage(&self) -> Option<bool> {
        (!self.is_empty()).then(|| self.owns_memory())
    }
}

/// A pre-sized, arena-backed list of rings or child geometries.
///
/// The capacity is fixed at creation: parts allocated later in the same arena cannot be used to
/// grow an earlier list, so callers count parts before filling them.
#[derive(Debug, Clone)]
pub(crate) struct PartList<'a, T> {
    items: BumpVec<'a, T>,
    capacity: usize,

    /// Storage of the first part pushed that has vertices.
    storage: Option<bool>,
}

impl<'a, T> PartList<'a, T> {
    pub(crate) fn with_capacity(arena: &'a Arena, capacity: usize) -> Result<Self> {
        Ok(Self {
            items: arena.vec_with_capacity(capacity)?,
            capacity,
            storage: None,
        })
    }

    /// Append `item`. Arena-owned and borrowed vertices cannot be mixed in one list; parts
    /// without vertices fit either.
    pub(crate) fn push(&mut self, item: T) -> Result<()>
    where
        T: VertexStorage,
    {
        if self.items.len() == self.capacity {
            return Err(GeometryError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let storage = item.vertex_storage();
        if let (Some(held), Some(new)) = (self.storage, storage) {
            if held != new {
                return Err(GeometryError::InvalidGeometryStructure(
                    "cannot mix arena-owned and borrowed vertices in one geometry".to_string(),
                ));
            }
        }
        self.storage = self.storage.or(storage);
        self.items.push(item);
        Ok(())
    }

    pub(crate) fn storage(&self) -> Option<bool> {
        self.storage
    }

    pub(crate) fn get(&self, i: usize) -> Option<&T> {
        self.items.get(i)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T: PartialEq> PartialEq for PartList<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

/// Implement construction and access shared by the homogeneous multi-geometries.
///
/// The target struct must have a `dim: Dimension` field and a `parts: PartList<'a, $part>` field.
macro_rules! impl_multi_geometry {
    ($type:ident, $part:ident) => {
        impl crate::scalar::parts::VertexStorage for $type<'_> {
            fn vertex_storage(&self) -> Option<bool> {
                self.parts.storage()
            }
        }

        impl<'a> $type<'a> {
            /// An empty collection with room for `num_parts` parts.
            pub fn with_capacity(
                arena: &'a crate::arena::Arena,
                num_parts: usize,
                dim: crate::datatypes::Dimension,
            ) -> crate::error::Result<Self> {
                Ok(Self {
                    dim,
                    parts: crate::scalar::parts::PartList::with_capacity(arena, num_parts)?,
                })
            }

            /// A collection without parts.
            pub fn empty(
                arena: &'a crate::arena::Arena,
                dim: crate::datatypes::Dimension,
            ) -> crate::error::Result<Self> {
                Self::with_capacity(arena, 0, dim)
            }

            /// Append a part of the same dimension.
            ///
            /// Fails with [`crate::error::GeometryError::InvalidGeometryStructure`] if the part
            /// views serialized bytes while earlier parts own their vertices, or the reverse.
            pub fn push(&mut self, part: $part<'a>) -> crate::error::Result<()> {
                self.dim.check(part.dimension())?;
                self.parts.push(part)
            }

            pub fn part(&self, i: usize) -> Option<&$part<'a>> {
                self.parts.get(i)
            }

            pub fn parts(&self) -> &[$part<'a>] {
                self.parts.as_slice()
            }

            pub(crate) fn parts_mut(&mut self) -> impl Iterator<Item = &mut $part<'a>> {
                self.parts.iter_mut()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $part<'a>> {
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

            pub fn dimension(&self) -> crate::datatypes::Dimension {
                self.dim
            }

            /// Whether every part is empty.
            pub fn is_empty(&self) -> bool {
                self.parts.iter().all(|part| part.is_empty())
            }

            pub fn deep_copy<'b>(
                &self,
                arena: &'b crate::arena::Arena,
            ) -> crate::error::Result<$type<'b>> {
                let mut out = $type::with_capacity(arena, self.num_parts(), self.dim)?;
                for part in self.parts.iter() {
                    out.push(part.deep_copy(arena)?)?;
                }
                Ok(out)
            }
        }

        impl<'b, 'a> IntoIterator for &'b $type<'a> {
            type Item = &'b $part<'a>;
            type IntoIter = std::slice::Iter<'b, $part<'a>>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }
    };
}

pub(crate) use impl_multi_geometry;
