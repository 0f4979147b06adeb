//! Arena-backed planar geometries with a compact binary form.
//!
//! Geometries are built in an [`Arena`][arena::Arena], parsed from WKT with
//! [`read_wkt`][io::wkt::read_wkt], or viewed without copying over serialized bytes with
//! [`deserialize`][io::serialized::deserialize]. WKB is read and written by [`io::wkb`]. The
//! algorithms in [`algorithm::native`] read any of these.
//!
//! ```
//! use geoarena::algorithm::native::{Area, Length};
//! use geoarena::arena::Arena;
//! use geoarena::io::serialized::{deserialize, serialize, DeserializeOptions, SerializeOptions};
//! use geoarena::io::wkt::read_wkt;
//!
//! let arena = Arena::new();
//! let polygon = read_wkt(&arena, "POLYGON ((0 0, 4 0, 4 3, 0 0))").unwrap();
//! let bytes = serialize(&polygon, &SerializeOptions::default()).unwrap();
//!
//! let view = deserialize(&arena, &bytes, &DeserializeOptions::default()).unwrap();
//! assert_eq!(view, polygon);
//! assert_eq!(view.unsigned_area(), 6.0);
//! assert_eq!(view.length(), 0.0);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub mod algorithm;
pub mod arena;
pub mod coord;
pub mod datatypes;
pub mod error;
pub mod io;
pub mod scalar;
#[cfg(test)]
pub(crate) mod test;
