use crate::arena::Arena;
use crate::coord::VertexBuffer;
use crate::datatypes::Dimension;
use crate::scalar::Polygon;

pub(crate) fn ring<'a>(arena: &'a Arena, coords: &[f64]) -> VertexBuffer<'a> {
    VertexBuffer::from_interleaved(arena, coords, Dimension::XY).unwrap()
}

/// Counter-clockwise unit square.
pub(crate) fn unit_square(arena: &Arena) -> Polygon<'_> {
    let mut polygon = Polygon::with_capacity(arena, 1, Dimension::XY).unwrap();
    polygon
        .push_ring(ring(arena, &[0., 0., 1., 0., 1., 1., 0., 1., 0., 0.]))
        .unwrap();
    polygon
}

/// A counter-clockwise 10x10 square with a clockwise 2x2 hole from (2 2) to (4 4).
pub(crate) fn square_with_hole(arena: &Arena) -> Polygon<'_> {
    let mut polygon = Polygon::with_capacity(arena, 2, Dimension::XY).unwrap();
    polygon
        .push_ring(ring(arena, &[0., 0., 10., 0., 10., 10., 0., 10., 0., 0.]))
        .unwrap();
    polygon
        .push_ring(ring(arena, &[2., 2., 2., 4., 4., 4., 4., 2., 2., 2.]))
        .unwrap();
    polygon
}
