use crate::datatypes::Dimension;
use crate::scalar::parts::{impl_multi_geometry, PartList};
use crate::scalar::Point;

/// A collection of points sharing one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint<'a> {
    dim: Dimension,
    parts: PartList<'a, Point<'a>>,
}

impl_multi_geometry!(MultiPoint, Point);
