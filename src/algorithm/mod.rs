//! Geometry algorithms.

pub mod native;
