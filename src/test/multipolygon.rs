use crate::arena::Arena;
use crate::datatypes::Dimension;
use crate::scalar::{MultiPolygon, Polygon};
use crate::test::polygon::{ring, square_with_hole, unit_square};

/// The unit square and the holed 10x10 square shifted 20 units right.
pub(crate) fn mpoly0(arena: &Arena) -> MultiPolygon<'_> {
    let mut shifted = Polygon::with_capacity(arena, 2, Dimension::XY).unwrap();
    for r in square_with_hole(arena).rings() {
        let coords: Vec<f64> = r.iter().flat_map(|v| [v.x + 20., v.y]).collect();
        shifted.push_ring(ring(arena, &coords)).unwrap();
    }

    let mut multi = MultiPolygon::with_capacity(arena, 2, Dimension::XY).unwrap();
    multi.push(unit_square(arena)).unwrap();
    multi.push(shifted).unwrap();
    multi
}
