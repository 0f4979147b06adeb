use crate::arena::Arena;
use crate::datatypes::Dimension;
use crate::scalar::MultiPoint;
use crate::test::point::{p0, p1};

pub(crate) fn mp0(arena: &Arena) -> MultiPoint<'_> {
    let mut multi = MultiPoint::with_capacity(arena, 2, Dimension::XY).unwrap();
    multi.push(p0(arena)).unwrap();
    multi.push(p1(arena)).unwrap();
    multi
}
