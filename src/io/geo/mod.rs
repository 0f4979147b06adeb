//! Convert to and from [`geo`] geometries.
//!
//! `geo` geometries are two-dimensional, so Z and M ordinates are dropped on the way out and
//! everything read back in is [`Dimension::XY`][crate::datatypes::Dimension::XY].

mod scalar;

pub use scalar::{
    geometry_collection_to_geo, geometry_from_geo, geometry_to_geo, line_string_to_geo,
    multi_line_string_to_geo, multi_point_to_geo, multi_polygon_to_geo, point_to_geo,
    polygon_to_geo, vertex_to_geo,
};
