//! Defines [`GeometryError`], representing all errors returned by this crate.

use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeometryError {
    /// Malformed WKT input.
    #[error("WKT parse error: {message} at position {offset} near: '{context}'")]
    Parse {
        /// What the parser expected to find.
        message: String,
        /// Byte offset of the cursor into the input.
        offset: usize,
        /// Up to 32 bytes of input preceding the cursor.
        context: String,
    },

    /// A serialized value carries a type tag that is not one of the seven geometry kinds.
    #[error("Unknown geometry type tag: {0}")]
    UnknownGeometryType(u8),

    /// A WKB value carries a geometry type code this crate cannot represent.
    #[error("Unknown WKB geometry type: {0}")]
    UnknownWkbType(u32),

    /// Z/M dimensionality is not uniform across one value.
    #[error("Dimensionality mismatch: {0}")]
    DimensionalityMismatch(String),

    /// The geometry violates a structural invariant, or was accessed as the wrong kind.
    #[error("Invalid geometry structure: {0}")]
    InvalidGeometryStructure(String),

    /// Whenever pushing to a pre-sized container fails because it is already full.
    ///
    /// This always indicates a bug in the code that computed the size up front.
    #[error("Capacity exceeded: container was pre-sized for {capacity} items")]
    CapacityExceeded {
        /// The capacity the container was created with.
        capacity: usize,
    },

    /// Bounds-checked vertex access outside of `0..len`.
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The number of vertices in the buffer.
        len: usize,
    },

    /// A collection is nested deeper than the configured maximum.
    #[error("Geometry collections nested deeper than {0} levels")]
    NestingTooDeep(usize),

    /// The arena could not satisfy an allocation of the given number of bytes.
    #[error("Out of memory: arena failed to allocate {0} bytes")]
    OutOfMemory(usize),

    /// [std::io::Error], raised when reading past the end of a serialized value.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, GeometryError>;
