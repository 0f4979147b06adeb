pub(crate) mod scalar;

pub use scalar::GeometryCollection;
