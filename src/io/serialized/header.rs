use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::algorithm::native::bounding_rect::BoundingBox;
use crate::coord::Vertex;
use crate::datatypes::{Dimension, GeometryType};
use crate::error::Result;
use crate::io::serialized::common::Flags;

/// The fixed-layout prefix of a serialized geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SerializedHeader {
    pub geometry_type: GeometryType,
    pub dimension: Dimension,

    /// The stored extent, if the value carries one.
    pub bounding_box: Option<BoundingBox>,
}

/// Read the type tag, flags and optional bounding box without touching the body.
pub fn read_header(bytes: &[u8]) -> Result<SerializedHeader> {
    read_header_from(&mut Cursor::new(bytes))
}

pub(crate) fn read_header_from(reader: &mut Cursor<&[u8]>) -> Result<SerializedHeader> {
    let geometry_type = GeometryType::from_tag(reader.read_u8()?)?;
    let flags = Flags::from_byte(reader.read_u8()?)?;
    let bounding_box = if flags.has_bbox() {
        Some(BoundingBox {
            minx: reader.read_f64::<LittleEndian>()?,
            miny: reader.read_f64::<LittleEndian>()?,
            maxx: reader.read_f64::<LittleEndian>()?,
            maxy: reader.read_f64::<LittleEndian>()?,
        })
    } else {
        None
    };
    Ok(SerializedHeader {
        geometry_type,
        dimension: flags.dimension(),
        bounding_box,
    })
}

/// The planar extent of a serialized geometry, read from its header.
///
/// Points store no bounding box; for a non-empty point the extent is read from its single
/// vertex. Returns `None` for values without a stored extent, such as empty geometries or those
/// written with bounding boxes disabled.
pub fn try_get_bounding_box(bytes: &[u8]) -> Result<Option<BoundingBox>> {
    let mut reader = Cursor::new(bytes);
    let header = read_header_from(&mut reader)?;
    if header.bounding_box.is_some() {
        return Ok(header.bounding_box);
    }
    if header.geometry_type == GeometryType::Point && reader.read_u32::<LittleEndian>()? == 1 {
        let x = reader.read_f64::<LittleEndian>()?;
        let y = reader.read_f64::<LittleEndian>()?;
        let mut rect = BoundingBox::new();
        rect.update(&Vertex::new(x, y));
        return Ok(Some(rect));
    }
    Ok(None)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::native::BoundingRect;
    use crate::arena::Arena;
    use crate::error::GeometryError;
    use crate::io::serialized::{serialize, SerializeOptions};
    use crate::scalar::{Geometry, Point};
    use crate::test::geometrycollection::nested_collection;
    use crate::test::multipolygon::mpoly0;
    use crate::test::point::p1;

    #[test]
    fn stored_bbox_matches_geometry() {
        let arena = Arena::new();
        for geom in [nested_collection(&arena), mpoly0(&arena).into()] {
            let buf = serialize(&geom, &SerializeOptions::default()).unwrap();
            let header = read_header(&buf).unwrap();
            assert_eq!(header.geometry_type, geom.geometry_type());
            assert_eq!(header.dimension, Dimension::XY);
            assert_eq!(header.bounding_box, geom.bounding_rect());
            assert_eq!(try_get_bounding_box(&buf).unwrap(), geom.bounding_rect());
        }
    }

    #[test]
    fn point_bbox_from_vertex() {
        let arena = Arena::new();
        let buf = serialize(&p1(&arena).into(), &SerializeOptions::default()).unwrap();
        assert_eq!(read_header(&buf).unwrap().bounding_box, None);

        let rect = try_get_bounding_box(&buf).unwrap().unwrap();
        assert_eq!((rect.minx, rect.miny, rect.maxx, rect.maxy), (1., 2., 1., 2.));

        let empty = Geometry::Point(Point::empty(Dimension::XY));
        let buf = serialize(&empty, &SerializeOptions::default()).unwrap();
        assert_eq!(try_get_bounding_box(&buf).unwrap(), None);
    }

    #[test]
    fn bbox_can_be_disabled() {
        let arena = Arena::new();
        let options = SerializeOptions {
            write_bounding_box: false,
            ..Default::default()
        };
        let buf = serialize(&mpoly0(&arena).into(), &options).unwrap();
        assert_eq!(try_get_bounding_box(&buf).unwrap(), None);
    }

    #[test]
    fn bad_header() {
        assert!(matches!(
            read_header(&[9, 0]),
            Err(GeometryError::UnknownGeometryType(9))
        ));
        assert!(matches!(
            read_header(&[2]),
            Err(GeometryError::IOError(_))
        ));
        assert!(matches!(
            read_header(&[2, 0b100, 0, 0]),
            Err(GeometryError::IOError(_))
        ));
    }
}
