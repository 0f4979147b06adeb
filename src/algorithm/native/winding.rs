use crate::algorithm::native::Area;
use crate::coord::VertexBuffer;
use crate::scalar::LineString;

/// The direction a ring's vertices run in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindingOrder {
    Clockwise,
    CounterClockwise,
}

/// Determine the winding order of a ring from the sign of its area.
///
/// A ring with zero area, including any ring with fewer than three vertices, reports
/// [`WindingOrder::Clockwise`].
pub trait Winding {
    fn winding_order(&self) -> WindingOrder;

    fn is_cw(&self) -> bool {
        self.winding_order() == WindingOrder::Clockwise
    }

    fn is_ccw(&self) -> bool {
        self.winding_order() == WindingOrder::CounterClockwise
    }
}

impl Winding for VertexBuffer<'_> {
    fn winding_order(&self) -> WindingOrder {
        if self.signed_area() > 0.0 {
            WindingOrder::CounterClockwise
        } else {
            WindingOrder::Clockwise
        }
    }
}

impl Winding for LineString<'_> {
    fn winding_order(&self) -> WindingOrder {
        self.coords().winding_order()
    }
}
