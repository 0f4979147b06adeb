//! The in-memory geometry model: one type per geometry kind and the [`Geometry`] sum type over
//! all seven.
//!
//! Values are built top-down. Ring and part lists are pre-sized from known counts and then
//! filled; pushing beyond the declared capacity fails with
//! [`CapacityExceeded`][crate::error::GeometryError::CapacityExceeded].

pub use geometry::Geometry;
pub use geometrycollection::GeometryCollection;
pub use linestring::LineString;
pub use multilinestring::MultiLineString;
pub use multipoint::MultiPoint;
pub use multipolygon::MultiPolygon;
pub use point::Point;
pub use polygon::Polygon;

pub mod geometry;
pub mod geometrycollection;
pub mod linestring;
pub mod multilinestring;
pub mod multipoint;
pub mod multipolygon;
pub(crate) mod parts;
pub mod point;
pub mod polygon;
