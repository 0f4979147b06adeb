//! Well-known binary.
//!
//! The reader accepts both byte orders and both flavours of dimension encoding: ISO type codes
//! (`1000`, `2000` and `3000` added for Z, M and ZM) and EWKB high bits (`0x80000000` for Z,
//! `0x40000000` for M, `0x20000000` for an SRID, which is skipped). The writer emits
//! little-endian ISO WKB. An empty point is written with NaN ordinates.

mod common;
pub mod reader;
pub mod writer;

pub use reader::{read_wkb, read_wkb_with_options};
pub use writer::{to_wkb, wkb_size, write_wkb};
