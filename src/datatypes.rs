//! Coordinate dimensions and geometry kinds shared by every module.

use std::fmt::Display;

use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::error::{GeometryError, Result};

/// Maximum nesting depth of geometry collections accepted anywhere in this crate.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The coordinate dimension of a geometry value.
///
/// Every vertex of one value shares the same dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    /// Two-dimensional.
    #[default]
    XY,

    /// Three-dimensional.
    XYZ,

    /// XYM (2D with measure).
    XYM,

    /// XYZM (3D with measure).
    XYZM,
}

impl Dimension {
    /// Construct from the presence of the Z and M ordinates.
    pub fn from_flags(has_z: bool, has_m: bool) -> Self {
        match (has_z, has_m) {
            (false, false) => Dimension::XY,
            (true, false) => Dimension::XYZ,
            (false, true) => Dimension::XYM,
            (true, true) => Dimension::XYZM,
        }
    }

    /// Returns the number of ordinates per vertex.
    pub fn size(&self) -> usize {
        match self {
            Dimension::XY => 2,
            Dimension::XYZ => 3,
            Dimension::XYM => 3,
            Dimension::XYZM => 4,
        }
    }

    /// Whether vertices carry a Z ordinate.
    pub fn has_z(&self) -> bool {
        matches!(self, Dimension::XYZ | Dimension::XYZM)
    }

    /// Whether vertices carry an M ordinate.
    pub fn has_m(&self) -> bool {
        matches!(self, Dimension::XYM | Dimension::XYZM)
    }

    /// The number of bytes one vertex occupies when serialized.
    pub fn vertex_byte_size(&self) -> usize {
        self.size() * std::mem::size_of::<f64>()
    }

    /// Fail with [`GeometryError::DimensionalityMismatch`] unless `other` equals `self`.
    pub(crate) fn check(&self, other: Dimension) -> Result<()> {
        if *self == other {
            Ok(())
        } else {
            Err(GeometryError::DimensionalityMismatch(format!(
                "expected {self}, found {other}"
            )))
        }
    }
}

impl Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::XY => write!(f, "XY"),
            Dimension::XYZ => write!(f, "XYZ"),
            Dimension::XYM => write!(f, "XYM"),
            Dimension::XYZM => write!(f, "XYZM"),
        }
    }
}

/// The seven geometry kinds, with their serialized type tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum GeometryType {
    /// A single position, possibly empty
    Point = 1,
    /// A sequence of zero or at least two vertices
    LineString = 2,
    /// A shell followed by zero or more holes
    Polygon = 3,
    /// A collection of points
    MultiPoint = 4,
    /// A collection of linestrings
    MultiLineString = 5,
    /// A collection of polygons
    MultiPolygon = 6,
    /// A heterogeneous, possibly nested, collection
    GeometryCollection = 7,
}

impl GeometryType {
    /// Decode a serialized type tag.
    pub fn from_tag(tag: u8) -> Result<Self> {
        Self::try_from_primitive(tag).map_err(|_| GeometryError::UnknownGeometryType(tag))
    }

    /// The serialized type tag.
    pub fn tag(&self) -> u8 {
        (*self).into()
    }

    /// The upper-case WKT keyword.
    pub fn wkt_name(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }

    /// Whether this kind holds child geometries rather than vertices.
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            GeometryType::MultiPoint
                | GeometryType::MultiLineString
                | GeometryType::MultiPolygon
                | GeometryType::GeometryCollection
        )
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wkt_name())
    }
}
