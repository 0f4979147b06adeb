use crate::arena::Arena;
use crate::coord::VertexBuffer;
use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeometryError, Result};
use crate::scalar::parts::VertexStorage;
use crate::scalar::*;

/// A Geometry is an enum over the seven geometry kinds.
///
/// Every vertex buffer and child geometry of one value lives in the same [`Arena`], or every
/// vertex buffer is a view over the same serialized bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry<'a> {
    Point(Point<'a>),
    LineString(LineString<'a>),
    Polygon(Polygon<'a>),
    MultiPoint(MultiPoint<'a>),
    MultiLineString(MultiLineString<'a>),
    MultiPolygon(MultiPolygon<'a>),
    GeometryCollection(GeometryCollection<'a>),
}

macro_rules! impl_as_type {
    ($fn_name:ident, $variant:ident) => {
        /// Borrow the inner value, failing with [`GeometryError::InvalidGeometryStructure`] if
        /// this geometry is of another kind.
        pub fn $fn_name(&self) -> Result<&$variant<'a>> {
            match self {
                Geometry::$variant(g) => Ok(g),
                other => Err(other.wrong_type(GeometryType::$variant)),
            }
        }
    };
}

impl<'a> Geometry<'a> {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Geometry::Point(_) => GeometryType::Point,
            Geometry::LineString(_) => GeometryType::LineString,
            Geometry::Polygon(_) => GeometryType::Polygon,
            Geometry::MultiPoint(_) => GeometryType::MultiPoint,
            Geometry::MultiLineString(_) => GeometryType::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryType::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryType::GeometryCollection,
        }
    }

    /// The coordinate dimension shared by every vertex.
    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(g) => g.dimension(),
            Geometry::LineString(g) => g.dimension(),
            Geometry::Polygon(g) => g.dimension(),
            Geometry::MultiPoint(g) => g.dimension(),
            Geometry::MultiLineString(g) => g.dimension(),
            Geometry::MultiPolygon(g) => g.dimension(),
            Geometry::GeometryCollection(g) => g.dimension(),
        }
    }

    /// The topological dimension: 0 for points, 1 for lines, 2 for polygons.
    ///
    /// A collection reports the highest dimension among its non-empty members, or 0 if it has
    /// none.
    pub fn geometric_dimension(&self) -> usize {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => 1,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => 2,
            Geometry::GeometryCollection(gc) => gc
                .iter()
                .filter(|part| !part.is_empty())
                .map(|part| part.geometric_dimension())
                .max()
                .unwrap_or(0),
        }
    }

    /// The total number of vertices, across every ring and part.
    pub fn num_vertices(&self) -> usize {
        match self {
            Geometry::Point(g) => g.num_vertices(),
            Geometry::LineString(g) => g.num_vertices(),
            Geometry::Polygon(g) => g.num_vertices(),
            Geometry::MultiPoint(g) => g.num_vertices(),
            Geometry::MultiLineString(g) => g.num_vertices(),
            Geometry::MultiPolygon(g) => g.num_vertices(),
            Geometry::GeometryCollection(g) => g.num_vertices(),
        }
    }

    /// The number of direct parts of a collection, or 1 for a non-empty single geometry.
    pub fn num_parts(&self) -> usize {
        match self {
            Geometry::Point(_) | Geometry::LineString(_) | Geometry::Polygon(_) => {
                usize::from(!self.is_empty())
            }
            Geometry::MultiPoint(g) => g.num_parts(),
            Geometry::MultiLineString(g) => g.num_parts(),
            Geometry::MultiPolygon(g) => g.num_parts(),
            Geometry::GeometryCollection(g) => g.num_parts(),
        }
    }

    /// Whether the geometry has no vertices.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(g) => g.is_empty(),
            Geometry::LineString(g) => g.is_empty(),
            Geometry::Polygon(g) => g.is_empty(),
            Geometry::MultiPoint(g) => g.is_empty(),
            Geometry::MultiLineString(g) => g.is_empty(),
            Geometry::MultiPolygon(g) => g.is_empty(),
            Geometry::GeometryCollection(g) => g.is_empty(),
        }
    }

    /// The number of geometry collection levels; 0 for anything but a collection.
    pub fn nesting_depth(&self) -> usize {
        match self {
            Geometry::GeometryCollection(g) => g.nesting_depth(),
            _ => 0,
        }
    }

    /// Whether every vertex buffer is stored in an arena rather than viewed in place.
    pub fn owns_memory(&self) -> bool {
        let mut owned = true;
        self.for_each_buffer(&mut |buffer| owned &= buffer.owns_memory());
        owned
    }

    /// Check the structural invariants: no single-vertex linestring, and every non-empty ring
    /// closed with at least four vertices.
    pub fn validate(&self) -> Result<()> {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Ok(()),
            Geometry::LineString(g) => g.validate(),
            Geometry::Polygon(g) => g.validate(),
            Geometry::MultiLineString(g) => g.validate(),
            Geometry::MultiPolygon(g) => g.validate(),
            Geometry::GeometryCollection(g) => g.validate(),
        }
    }

    /// Copy the whole tree into `arena`, producing a value that owns its memory.
    pub fn deep_copy<'b>(&self, arena: &'b Arena) -> Result<Geometry<'b>> {
        Ok(match self {
            Geometry::Point(g) => Geometry::Point(g.deep_copy(arena)?),
            Geometry::LineString(g) => Geometry::LineString(g.deep_copy(arena)?),
            Geometry::Polygon(g) => Geometry::Polygon(g.deep_copy(arena)?),
            Geometry::MultiPoint(g) => Geometry::MultiPoint(g.deep_copy(arena)?),
            Geometry::MultiLineString(g) => Geometry::MultiLineString(g.deep_copy(arena)?),
            Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.deep_copy(arena)?),
            Geometry::GeometryCollection(g) => Geometry::GeometryCollection(g.deep_copy(arena)?),
        })
    }

    impl_as_type!(as_point, Point);
    impl_as_type!(as_line_string, LineString);
    impl_as_type!(as_polygon, Polygon);
    impl_as_type!(as_multi_point, MultiPoint);
    impl_as_type!(as_multi_line_string, MultiLineString);
    impl_as_type!(as_multi_polygon, MultiPolygon);
    impl_as_type!(as_geometry_collection, GeometryCollection);

    /// Visit every vertex buffer depth-first, in storage order.
    pub(crate) fn for_each_buffer<F: FnMut(&VertexBuffer<'a>)>(&self, f: &mut F) {
        match self {
            Geometry::Point(g) => f(g.coords()),
            Geometry::LineString(g) => f(g.coords()),
            Geometry::Polygon(g) => g.rings().iter().for_each(|ring| f(ring)),
            Geometry::MultiPoint(g) => g.iter().for_each(|p| f(p.coords())),
            Geometry::MultiLineString(g) => g.iter().for_each(|l| f(l.coords())),
            Geometry::MultiPolygon(g) => g
                .iter()
                .flat_map(|p| p.rings())
                .for_each(|ring| f(ring)),
            Geometry::GeometryCollection(g) => {
                g.iter().for_each(|part| part.for_each_buffer(&mut *f))
            }
        }
    }

    /// Visit every vertex buffer mutably, stopping at the first error.
    pub(crate) fn try_for_each_buffer_mut<F>(&mut self, f: &mut F) -> Result<()>
    where
        F: FnMut(&mut VertexBuffer<'a>) -> Result<()>,
    {
        match self {
            Geometry::Point(g) => f(g.coords_mut()),
            Geometry::LineString(g) => f(g.coords_mut()),
            Geometry::Polygon(g) => g.rings_mut().try_for_each(f),
            Geometry::MultiPoint(g) => g.parts_mut().try_for_each(|p| f(p.coords_mut())),
            Geometry::MultiLineString(g) => g.parts_mut().try_for_each(|l| f(l.coords_mut())),
            Geometry::MultiPolygon(g) => g
                .parts_mut()
                .try_for_each(|p| p.rings_mut().try_for_each(&mut *f)),
            Geometry::GeometryCollection(g) => g
                .parts_mut()
                .try_for_each(|part| part.try_for_each_buffer_mut(&mut *f)),
        }
    }

    fn wrong_type(&self, expected: GeometryType) -> GeometryError {
        GeometryError::InvalidGeometryStructure(format!(
            "expected {expected}, found {}",
            self.geometry_type()
        ))
    }
}

impl<'a> From<Point<'a>> for Geometry<'a> {
    fn from(value: Point<'a>) -> Self {
        Geometry::Point(value)
    }
}

impl<'a> From<LineString<'a>> for Geometry<'a> {
    fn from(value: LineString<'a>) -> Self {
        Geometry::LineString(value)
    }
}

impl<'a> From<Polygon<'a>> for Geometry<'a> {
    fn from(value: Polygon<'a>) -> Self {
        Geometry::Polygon(value)
    }
}

impl<'a> From<MultiPoint<'a>> for Geometry<'a> {
    fn from(value: MultiPoint<'a>) -> Self {
        Geometry::MultiPoint(value)
    }
}

impl<'a> From<MultiLineString<'a>> for Geometry<'a> {
    fn from(value: MultiLineString<'a>) -> Self {
        Geometry::MultiLineString(value)
    }
}

impl<'a> From<MultiPolygon<'a>> for Geometry<'a> {
    fn from(value: MultiPolygon<'a>) -> Self {
        Geometry::MultiPolygon(value)
    }
}

impl<'a> From<GeometryCollection<'a>> for Geometry<'a> {
    fn from(value: GeometryCollection<'a>) -> Self {
        Geometry::GeometryCollection(value)
    }
}

impl VertexStorage for Geometry<'_> {
    fn vertex_storage(&self) -> Option<bool> {
        match self {
            Geometry::Point(g) => g.vertex_storage(),
            Geometry::LineString(g) => g.vertex_storage(),
            Geometry::Polygon(g) => g.vertex_storage(),
            Geometry::MultiPoint(g) => g.vertex_storage(),
            Geometry::MultiLineString(g) => g.vertex_storage(),
            Geometry::MultiPolygon(g) => g.vertex_storage(),
            Geometry::GeometryCollection(g) => g.vertex_storage(),
        }
    }
}
