//! Read and write geometries as Well-Known Text.
//!
//! The reader accepts the OGC grammar extended with `Z`, `M` and `ZM` tags, `EMPTY` for every
//! kind, and an EWKT `SRID=...;` prefix, which is discarded.

pub mod reader;
pub mod writer;

pub use reader::{read_wkt, read_wkt_with_options, WktReaderOptions};
