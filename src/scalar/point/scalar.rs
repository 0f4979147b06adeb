use crate::arena::Arena;
use crate::coord::{Vertex, VertexBuffer};
use crate::datatypes::Dimension;
use crate::error::{GeometryError, Result};
use crate::scalar::parts::VertexStorage;

/// A single position, or an empty point.
#[derive(Debug, Clone, PartialEq)]
pub struct Point<'a> {
    coords: VertexBuffer<'a>,
}

impl<'a> Point<'a> {
    /// A point holding `vertex`, stored in `arena`.
    pub fn new(arena: &'a Arena, vertex: Vertex, dim: Dimension) -> Result<Self> {
        let mut coords = VertexBuffer::with_capacity(arena, 1, dim)?;
        coords.push(vertex)?;
        Ok(Self { coords })
    }

    /// A point with no position.
    pub fn empty(dim: Dimension) -> Self {
        Self {
            coords: VertexBuffer::empty(dim),
        }
    }

    /// Wrap a buffer of zero or one vertex.
    pub fn try_from_buffer(coords: VertexBuffer<'a>) -> Result<Self> {
        if coords.len() > 1 {
            return Err(GeometryError::InvalidGeometryStructure(format!(
                "a point holds at most one vertex, got {}",
                coords.len()
            )));
        }
        Ok(Self { coords })
    }

    /// The position, or `None` for an empty point.
    pub fn vertex(&self) -> Option<Vertex> {
        self.coords.first()
    }

    pub fn coords(&self) -> &VertexBuffer<'a> {
        &self.coords
    }

    pub(crate) fn coords_mut(&mut self) -> &mut VertexBuffer<'a> {
        &mut self.coords
    }

    pub fn num_vertices(&self) -> usize {
        self.coords.len()
    }

    pub fn dimension(&self) -> Dimension {
        self.coords.dimension()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Copy this point into `arena`.
    pub fn deep_copy<'b>(&self, arena: &'b Arena) -> Result<Point<'b>> {
        Ok(Point {
            coords: self.coords.deep_copy(arena)?,
        })
    }
}

impl VertexStorage for Point<'_> {
    fn vertex_storage(&self) -> Option<bool> {
        self.coords.vertex_storage()
    }
}
