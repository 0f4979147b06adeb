use crate::datatypes::Dimension;
use crate::error::{GeometryError, Result};

/// Byte length of the type tag and flags that open every serialized value.
pub(crate) const HEADER_SIZE: usize = 2;

/// Byte length of the optional `minx, miny, maxx, maxy` extent.
pub(crate) const BBOX_SIZE: usize = 32;

/// Byte length of a `u32` count.
pub(crate) const COUNT_SIZE: usize = 4;

/// The flags byte following the type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Flags(u8);

impl Flags {
    const Z: u8 = 0b001;
    const M: u8 = 0b010;
    const BBOX: u8 = 0b100;

    pub(crate) fn new(dim: Dimension, has_bbox: bool) -> Self {
        let mut bits = 0;
        if dim.has_z() {
            bits |= Self::Z;
        }
        if dim.has_m() {
            bits |= Self::M;
        }
        if has_bbox {
            bits |= Self::BBOX;
        }
        Self(bits)
    }

    /// Decode a flags byte, rejecting bits this format does not define.
    pub(crate) fn from_byte(byte: u8) -> Result<Self> {
        if byte & !(Self::Z | Self::M | Self::BBOX) != 0 {
            return Err(GeometryError::InvalidGeometryStructure(format!(
                "unsupported flags {byte:#010b}"
            )));
        }
        Ok(Self(byte))
    }

    pub(crate) fn dimension(&self) -> Dimension {
        Dimension::from_flags(self.0 & Self::Z != 0, self.0 & Self::M != 0)
    }

    pub(crate) fn has_bbox(&self) -> bool {
        self.0 & Self::BBOX != 0
    }

    pub(crate) fn byte(&self) -> u8 {
        self.0
    }
}
