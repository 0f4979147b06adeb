use crate::arena::Arena;
use crate::coord::VertexBuffer;
use crate::datatypes::Dimension;
use crate::error::{GeometryError, Result};
use crate::scalar::parts::{PartList, VertexStorage};

/// A shell ring followed by zero or more hole rings.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<'a> {
    dim: Dimension,
    rings: PartList<'a, VertexBuffer<'a>>,
}

impl<'a> Polygon<'a> {
    /// An empty polygon with room for `num_rings` rings.
    pub fn with_capacity(arena: &'a Arena, num_rings: usize, dim: Dimension) -> Result<Self> {
        Ok(Self {
            dim,
            rings: PartList::with_capacity(arena, num_rings)?,
        })
    }

    /// A polygon without rings.
    pub fn empty(arena: &'a Arena, dim: Dimension) -> Result<Self> {
        Self::with_capacity(arena, 0, dim)
    }

    /// Append a ring. The first ring pushed is the shell.
    pub fn push_ring(&mut self, ring: VertexBuffer<'a>) -> Result<()> {
        self.dim.check(ring.dimension())?;
        self.rings.push(ring)
    }

    pub fn exterior(&self) -> Option<&VertexBuffer<'a>> {
        self.rings.get(0)
    }

    pub fn interiors(&self) -> impl Iterator<Item = &VertexBuffer<'a>> {
        self.rings.iter().skip(1)
    }

    pub fn ring(&self, i: usize) -> Option<&VertexBuffer<'a>> {
        self.rings.get(i)
    }

    /// All rings, shell first.
    pub fn rings(&self) -> &[VertexBuffer<'a>] {
        self.rings.as_slice()
    }

    pub(crate) fn rings_mut(&mut self) -> impl Iterator<Item = &mut VertexBuffer<'a>> {
        self.rings.iter_mut()
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn num_interiors(&self) -> usize {
        self.rings.len().saturating_sub(1)
    }

    pub fn ring_capacity(&self) -> usize {
        self.rings.capacity()
    }

    pub fn num_vertices(&self) -> usize {
        self.rings.iter().map(|ring| ring.len()).sum()
    }

    pub fn dimension(&self) -> Dimension {
        self.dim
    }

    /// Whether the polygon has no vertices at all.
    pub fn is_empty(&self) -> bool {
        self.rings.iter().all(|ring| ring.is_empty())
    }

    /// Fail unless every non-empty ring is closed and has at least four vertices.
    pub fn validate(&self) -> Result<()> {
        for (i, ring) in self.rings.iter().enumerate() {
            validate_ring(ring).map_err(|err| match err {
                GeometryError::InvalidGeometryStructure(msg) => {
                    GeometryError::InvalidGeometryStructure(format!("ring {i}: {msg}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    pub fn deep_copy<'b>(&self, arena: &'b Arena) -> Result<Polygon<'b>> {
        let mut out = Polygon::with_capacity(arena, self.num_rings(), self.dim)?;
        for ring in self.rings.iter() {
            out.push_ring(ring.deep_copy(arena)?)?;
        }
        Ok(out)
    }
}

/// Fail unless `ring` is empty, or closed with at least four vertices.
pub(crate) fn validate_ring(ring: &VertexBuffer) -> Result<()> {
    if ring.is_empty() {
        return Ok(());
    }
    if ring.len() < 4 {
        return Err(GeometryError::InvalidGeometryStructure(format!(
            "a ring needs at least 4 vertices, got {}",
            ring.len()
        )));
    }
    if !ring.is_closed() {
        return Err(GeometryError::InvalidGeometryStructure(
            "ring is not closed".to_string(),
        ));
    }
    Ok(())
}

impl VertexStorage for Polygon<'_> {
    fn vertex_storage(&self) -> Option<bool> {
        self.rings.storage()
    }
}
