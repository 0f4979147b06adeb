use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::datatypes::{Dimension, GeometryType};
use crate::error::{GeometryError, Result};

/// Byte length of the byte order marker and the type code.
pub(super) const HEADER_SIZE: usize = 1 + 4;

/// Byte length of a vertex, part or ring count.
pub(super) const COUNT_SIZE: usize = 4;

const EWKB_Z: u32 = 0x8000_0000;
const EWKB_M: u32 = 0x4000_0000;
const EWKB_SRID: u32 = 0x2000_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub(super) enum Endianness {
    BigEndian = 0,
    LittleEndian = 1,
}

impl Endianness {
    pub(super) fn from_byte(byte: u8) -> Result<Self> {
        Self::try_from_primitive(byte).map_err(|_| {
            GeometryError::InvalidGeometryStructure(format!("invalid WKB byte order {byte}"))
        })
    }
}

/// The decoded geometry type code of one WKB value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct WkbType {
    pub geometry_type: GeometryType,
    pub dim: Dimension,
    pub has_srid: bool,
}

impl WkbType {
    pub(super) fn decode(code: u32) -> Result<Self> {
        let base = code & !(EWKB_Z | EWKB_M | EWKB_SRID);
        let (kind, iso_dim) = (base % 1000, base / 1000);
        if iso_dim > 3 {
            return Err(GeometryError::UnknownWkbType(code));
        }
        let geometry_type = u8::try_from(kind)
            .ok()
            .and_then(|kind| GeometryType::try_from_primitive(kind).ok())
            .ok_or(GeometryError::UnknownWkbType(code))?;
        let has_z = code & EWKB_Z != 0 || iso_dim == 1 || iso_dim == 3;
        let has_m = code & EWKB_M != 0 || iso_dim == 2 || iso_dim == 3;
        Ok(Self {
            geometry_type,
            dim: Dimension::from_flags(has_z, has_m),
            has_srid: code & EWKB_SRID != 0,
        })
    }

    /// The ISO type code.
    pub(super) fn iso_code(geometry_type: GeometryType, dim: Dimension) -> u32 {
        let offset = match dim {
            Dimension::XY => 0,
            Dimension::XYZ => 1000,
            Dimension::XYM => 2000,
            Dimension::XYZM => 3000,
        };
        u32::from(geometry_type.tag()) + offset
    }
}
