use crate::arena::Arena;
use crate::datatypes::Dimension;
use crate::scalar::MultiLineString;
use crate::test::linestring::{ls0, ls1};

pub(crate) fn mls0(arena: &Arena) -> MultiLineString<'_> {
    let mut multi = MultiLineString::with_capacity(arena, 2, Dimension::XY).unwrap();
    multi.push(ls0(arena)).unwrap();
    multi.push(ls1(arena)).unwrap();
    multi
}
