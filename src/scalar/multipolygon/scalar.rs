use crate::datatypes::Dimension;
use crate::error::Result;
use crate::scalar::parts::{impl_multi_geometry, PartList};
use crate::scalar::Polygon;

/// A collection of polygons sharing one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon<'a> {
    dim: Dimension,
    parts: PartList<'a, Polygon<'a>>,
}

impl_multi_geometry!(MultiPolygon, Polygon);

impl MultiPolygon<'_> {
    pub fn validate(&self) -> Result<()> {
        self.parts.iter().try_for_each(|polygon| polygon.validate())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arena::Arena;
    use crate::test::polygon::{square_with_hole, unit_square};

    #[test]
    fn counts() {
        let arena = Arena::new();
        let mut multi = MultiPolygon::with_capacity(&arena, 2, Dimension::XY).unwrap();
        multi.push(unit_square(&arena)).unwrap();
        multi.push(square_with_hole(&arena)).unwrap();
        assert_eq!(multi.num_parts(), 2);
        assert_eq!(multi.num_vertices(), 15);
        assert!(multi.validate().is_ok());
        assert_eq!(multi.iter().map(|p| p.num_rings()).sum::<usize>(), 3);
    }
}
