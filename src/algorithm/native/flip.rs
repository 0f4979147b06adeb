use crate::error::{GeometryError, Result};
use crate::scalar::Geometry;

/// Swap the X and Y ordinates of every vertex in place, nested collection members included.
///
/// Fails with [`GeometryError::InvalidGeometryStructure`] if any vertex buffer is a zero-copy
/// view; [`Geometry::deep_copy`] it first. The geometry is left untouched on failure.
pub fn flip_coordinates(geom: &mut Geometry) -> Result<()> {
    if !geom.owns_memory() {
        return Err(GeometryError::InvalidGeometryStructure(
            "cannot flip a geometry viewing serialized bytes".to_string(),
        ));
    }
    geom.try_for_each_buffer_mut(&mut |buffer| buffer.swap_xy())
}
