use crate::arena::Arena;
use crate::datatypes::Dimension;
use crate::error::Result;
use crate::scalar::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

/// Rewrite every vertex of a geometry to another coordinate dimension.
///
/// The result is a new owned tree in `arena`. Z and M ordinates the source lacks are filled with
/// `default_z` and `default_m`; ordinates the target lacks are dropped.
///
/// ```
/// use geoarena::algorithm::native::Force;
/// use geoarena::arena::Arena;
/// use geoarena::datatypes::Dimension;
/// use geoarena::io::wkt::read_wkt;
///
/// let arena = Arena::new();
/// let point = read_wkt(&arena, "POINT (1 2)").unwrap();
/// let forced = point.force(&arena, Dimension::XYZ, 5.0, 0.0).unwrap();
/// assert_eq!(forced.to_string(), "POINT Z (1 2 5)");
/// ```
pub trait Force {
    type Output<'b>;

    fn force<'b>(
        &self,
        arena: &'b Arena,
        dim: Dimension,
        default_z: f64,
        default_m: f64,
    ) -> Result<Self::Output<'b>>;
}

impl Force for Point<'_> {
    type Output<'b> = Point<'b>;

    fn force<'b>(
        &self,
        arena: &'b Arena,
        dim: Dimension,
        default_z: f64,
        default_m: f64,
    ) -> Result<Point<'b>> {
        Point::try_from_buffer(
            self.coords()
                .with_dimension(arena, dim, default_z, default_m)?,
        )
    }
}

impl Force for LineString<'_> {
    type Output<'b> = LineString<'b>;

    fn force<'b>(
        &self,
        arena: &'b Arena,
        dim: Dimension,
        default_z: f64,
        default_m: f64,
    ) -> Result<LineString<'b>> {
        Ok(LineString::new(self.coords().with_dimension(
            arena, dim, default_z, default_m,
        )?))
    }
}

impl Force for Polygon<'_> {
    type Output<'b> = Polygon<'b>;

    fn force<'b>(
        &self,
        arena: &'b Arena,
        dim: Dimension,
        default_z: f64,
        default_m: f64,
    ) -> Result<Polygon<'b>> {
        let mut out = Polygon::with_capacity(arena, self.num_rings(), dim)?;
        for ring in self.rings() {
            out.push_ring(ring.with_dimension(arena, dim, default_z, default_m)?)?;
        }
        Ok(out)
    }
}

macro_rules! impl_force_multi {
    ($type:ident) => {
        impl Force for $type<'_> {
            type Output<'b> = $type<'b>;

            fn force<'b>(
                &self,
                arena: &'b Arena,
                dim: Dimension,
                default_z: f64,
                default_m: f64,
            ) -> Result<$type<'b>> {
                let mut out = $type::with_capacity(arena, self.num_parts(), dim)?;
                for part in self.iter() {
                    out.push(part.force(arena, dim, default_z, default_m)?)?;
                }
                Ok(out)
            }
        }
    };
}

impl_force_multi!(MultiPoint);
impl_force_multi!(MultiLineString);
impl_force_multi!(MultiPolygon);
impl_force_multi!(GeometryCollection);

impl Force for Geometry<'_> {
    type Output<'b> = Geometry<'b>;

    fn force<'b>(
        &self,
        arena: &'b Arena,
        dim: Dimension,
        default_z: f64,
        default_m: f64,
    ) -> Result<Geometry<'b>> {
        let out: Geometry<'b> = match self {
            Geometry::Point(g) => g.force(arena, dim, default_z, default_m)?.into(),
            Geometry::LineString(g) => g.force(arena, dim, default_z, default_m)?.into(),
            Geometry::Polygon(g) => g.force(arena, dim, default_z, default_m)?.into(),
            Geometry::MultiPoint(g) => g.force(arena, dim, default_z, default_m)?.into(),
            Geometry::MultiLineString(g) => g.force(arena, dim, default_z, default_m)?.into(),
            Geometry::MultiPolygon(g) => g.force(arena, dim, default_z, default_m)?.into(),
            Geometry::GeometryCollection(g) => g.force(arena, dim, default_z, default_m)?.into(),
        };
        Ok(out)
    }
}
