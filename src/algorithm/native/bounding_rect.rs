use geo::{coord, Rect};
use serde::{Deserialize, Serialize};

use crate::coord::{Vertex, VertexBuffer};
use crate::scalar::{Geometry, LineString, Polygon};

/// An axis-aligned planar extent.
///
/// A freshly created box is inverted (min = +∞, max = −∞) and becomes valid once it has been
/// updated with at least one vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub minx: f64,
    pub miny: f64,
    pub maxx: f64,
    pub maxy: f64,
}

impl BoundingBox {
    /// New
    pub fn new() -> Self {
        BoundingBox {
            minx: f64::INFINITY,
            miny: f64::INFINITY,
            maxx: -f64::INFINITY,
            maxy: -f64::INFINITY,
        }
    }

    /// Whether no vertex has been added yet.
    pub fn is_empty(&self) -> bool {
        self.minx > self.maxx || self.miny > self.maxy
    }

    pub fn update(&mut self, vertex: &Vertex) {
        if vertex.x < self.minx {
            self.minx = vertex.x;
        }
        if vertex.y < self.miny {
            self.miny = vertex.y;
        }
        if vertex.x > self.maxx {
            self.maxx = vertex.x;
        }
        if vertex.y > self.maxy {
            self.maxy = vertex.y;
        }
    }

    pub fn add_buffer(&mut self, buffer: &VertexBuffer) {
        for vertex in buffer.iter() {
            self.update(&vertex);
        }
    }

    pub fn add_geometry(&mut self, geom: &Geometry) {
        geom.for_each_buffer(&mut |buffer| self.add_buffer(buffer));
    }

    /// `Some(self)` if at least one vertex was added.
    fn valid(self) -> Option<Self> {
        (!self.is_empty()).then_some(self)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BoundingBox> for Rect {
    fn from(value: BoundingBox) -> Self {
        let min_coord = coord! { x: value.minx, y: value.miny };
        let max_coord = coord! { x: value.maxx, y: value.maxy };
        Rect::new(min_coord, max_coord)
    }
}

/// Computes the planar extent of every vertex, holes and nested members included.
pub trait BoundingRect {
    /// `None` for a geometry without vertices.
    fn bounding_rect(&self) -> Option<BoundingBox>;
}

impl BoundingRect for VertexBuffer<'_> {
    fn bounding_rect(&self) -> Option<BoundingBox> {
        let mut rect = BoundingBox::new();
        rect.add_buffer(self);
        rect.valid()
    }
}

impl BoundingRect for LineString<'_> {
    fn bounding_rect(&self) -> Option<BoundingBox> {
        self.coords().bounding_rect()
    }
}

impl BoundingRect for Polygon<'_> {
    fn bounding_rect(&self) -> Option<BoundingBox> {
        let mut rect = BoundingBox::new();
        for ring in self.rings() {
            rect.add_buffer(ring);
        }
        rect.valid()
    }
}

impl BoundingRect for Geometry<'_> {
    fn bounding_rect(&self) -> Option<BoundingBox> {
        let mut rect = BoundingBox::new();
        rect.add_geometry(self);
        rect.valid()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arena::Arena;
    use crate::test::geometrycollection::nested_collection;
    use crate::test::multipolygon::mpoly0;

    #[test]
    fn nested_bounds() {
        let arena = Arena::new();
        let rect = nested_collection(&arena).bounding_rect().unwrap();
        assert_eq!(
            rect,
            BoundingBox {
                minx: 0.,
                miny: 0.,
                maxx: 3.,
                maxy: 4.
            }
        );

        let rect: Rect = Geometry::from(mpoly0(&arena)).bounding_rect().unwrap().into();
        assert_eq!(rect.min(), coord! { x: 0., y: 0. });
        assert_eq!(rect.max(), coord! { x: 30., y: 10. });
    }

    #[test]
    fn empty_has_no_bounds() {
        let arena = Arena::new();
        let polygon = Polygon::empty(&arena, crate::datatypes::Dimension::XY).unwrap();
        assert_eq!(polygon.bounding_rect(), None);
        assert!(BoundingBox::new().is_empty());
    }
}
