//! Vertices and the arena-backed buffers that store them.
//!
//! A [`VertexBuffer`] stores its vertices _interleaved_: `x, y[, z][, m]` for each vertex in turn,
//! either in arena memory or as a view over little-endian serialized bytes.

pub mod buffer;
pub mod vertex;

pub use buffer::{VertexBuffer, VertexIter};
pub use vertex::{closest_point_on_segment, Side, Vertex};
