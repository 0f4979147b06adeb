//! The compact binary form used to store geometries.
//!
//! Every value is little-endian and starts with a one-byte type tag (1 = Point through
//! 7 = GeometryCollection) and a flags byte (bit 0 = Z, bit 1 = M, bit 2 = bounding box). When
//! the bounding-box flag is set, `minx, miny, maxx, maxy` follow as four `f64`s. The body is:
//!
//! - Point: `u32` vertex count (0 or 1), then the vertex
//! - LineString: `u32` vertex count, then the vertices
//! - Polygon: `u32` ring count, then for each ring a `u32` vertex count and the vertices
//! - Multi*: `u32` part count, then each part's body
//! - GeometryCollection: `u32` part count, then for each part its type tag and body
//!
//! The dimension flags of the outer value apply to every nested part.

mod common;
pub mod header;
pub mod options;
pub mod reader;
pub mod writer;

pub use header::{read_header, try_get_bounding_box, SerializedHeader};
pub use options::{DeserializeOptions, SerializeOptions};
pub use reader::{deserialize, deserialize_owned};
pub use writer::{serialize, serialized_size, write_geometry};
