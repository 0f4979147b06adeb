use crate::arena::Arena;
use crate::coord::{Vertex, VertexBuffer};
use crate::datatypes::Dimension;
use crate::error::{GeometryError, Result};
use crate::scalar::parts::VertexStorage;

/// A sequence of vertices joined by straight segments.
///
/// A valid linestring is empty or has at least two vertices; see [`LineString::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct LineString<'a> {
    coords: VertexBuffer<'a>,
}

impl<'a> LineString<'a> {
    pub fn new(coords: VertexBuffer<'a>) -> Self {
        Self { coords }
    }

    pub fn empty(dim: Dimension) -> Self {
        Self::new(VertexBuffer::empty(dim))
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

    /// Whether the first and last vertex coincide.
    pub fn is_closed(&self) -> bool {
        self.coords.is_closed()
    }

    /// The first vertex, if any.
    pub fn start_point(&self) -> Option<Vertex> {
        self.coords.first()
    }

    /// The last vertex, if any.
    pub fn end_point(&self) -> Option<Vertex> {
        self.coords.last()
    }

    /// Fail unless the linestring is empty or has at least two vertices.
    pub fn validate(&self) -> Result<()> {
        if self.coords.len() == 1 {
            return Err(GeometryError::InvalidGeometryStructure(
                "a linestring must have zero or at least two vertices".to_string(),
            ));
        }
        Ok(())
    }

    pub fn deep_copy<'b>(&self, arena: &'b Arena) -> Result<LineString<'b>> {
        Ok(LineString::new(self.coords.deep_copy(arena)?))
    }
}

impl VertexStorage for LineString<'_> {
    fn vertex_storage(&self) -> Option<bool> {
        self.coords.vertex_storage()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn start_end() {
        let arena = Arena::new();
        let coords =
            VertexBuffer::from_interleaved(&arena, &[0., 0., 3., 0., 3., 4.], Dimension::XY)
                .unwrap();
        let line = LineString::new(coords);
        assert_eq!(line.start_point(), Some(Vertex::new(0., 0.)));
        assert_eq!(line.end_point(), Some(Vertex::new(3., 4.)));
        assert!(!line.is_closed());
        assert!(line.validate().is_ok());

        let empty = LineString::empty(Dimension::XY);
        assert_eq!(empty.start_point(), None);
        assert!(empty.validate().is_ok());
    }

    #[test]
    fn single_vertex_is_invalid() {
        let arena = Arena::new();
        let coords = VertexBuffer::from_interleaved(&arena, &[1., 1.], Dimension::XY).unwrap();
        assert!(LineString::new(coords).validate().is_err());
    }
}
