//! Readers and writers for the binary serialized form, WKB, WKT and `geo` geometries.

pub mod geo;
pub mod serialized;
pub mod wkb;
pub mod wkt;
