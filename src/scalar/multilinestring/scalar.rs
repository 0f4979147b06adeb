use crate::datatypes::Dimension;
use crate::error::Result;
use crate::scalar::parts::{impl_multi_geometry, PartList};
use crate::scalar::LineString;

/// A collection of linestrings sharing one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString<'a> {
    dim: Dimension,
    parts: PartList<'a, LineString<'a>>,
}

impl_multi_geometry!(MultiLineString, LineString);

impl MultiLineString<'_> {
    pub fn validate(&self) -> Result<()> {
        self.parts.iter().try_for_each(|line| line.validate())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arena::Arena;
    use crate::coord::VertexBuffer;

    #[test]
    fn validate_parts() {
        let arena = Arena::new();
        let mut multi = MultiLineString::with_capacity(&arena, 2, Dimension::XY).unwrap();
        let line =
            VertexBuffer::from_interleaved(&arena, &[0., 0., 1., 1.], Dimension::XY).unwrap();
        multi.push(LineString::new(line)).unwrap();
        assert!(multi.validate().is_ok());

        let single = VertexBuffer::from_interleaved(&arena, &[0., 0.], Dimension::XY).unwrap();
        multi.push(LineString::new(single)).unwrap();
        assert!(multi.validate().is_err());
        assert_eq!(multi.num_vertices(), 3);
    }
}
