//! Planar algorithms implemented directly on arena geometries.

mod area;
pub mod bounding_rect;
mod centroid;
mod closest;
mod contains;
mod dump;
mod extract;
mod flip;
mod force;
mod length;
mod winding;

pub use area::Area;
pub use bounding_rect::{BoundingBox, BoundingRect};
pub use centroid::Centroid;
pub use closest::{ClosestPoint, LocatedVertex};
pub use contains::{LocatePoint, PointLocation};
pub use dump::{dump, DumpedGeometry};
pub use extract::{collection_extract, collection_extract_auto};
pub use flip::flip_coordinates;
pub use force::Force;
pub use length::{Length, Perimeter};
pub use winding::{Winding, WindingOrder};
