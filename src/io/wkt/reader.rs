use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::coord::VertexBuffer;
use crate::datatypes::{Dimension, GeometryType, MAX_NESTING_DEPTH};
use crate::error::{GeometryError, Result};
use crate::scalar::polygon::scalar::validate_ring;
use crate::scalar::{
    Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Point,
    Polygon,
};

/// Maximum number of input bytes quoted before the cursor in parse errors.
const ERROR_CONTEXT_LEN: usize = 32;

/// Options for reading WKT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WktReaderOptions {
    /// Geometry collections nested deeper than this are rejected.
    pub max_nesting_depth: usize,
}

impl Default for WktReaderOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }
}

/// Parse a WKT string into a geometry allocated from `arena`.
///
/// The coordinate dimension is fixed by the `Z`, `M` or `ZM` tag of the outermost geometry and
/// is available from [`Geometry::dimension`] on the result.
pub fn read_wkt<'a>(arena: &'a Arena, wkt: &str) -> Result<Geometry<'a>> {
    read_wkt_with_options(arena, wkt, &Default::default())
}

/// Parse a WKT string with explicit options.
pub fn read_wkt_with_options<'a>(
    arena: &'a Arena,
    wkt: &str,
    options: &WktReaderOptions,
) -> Result<Geometry<'a>> {
    let mut parser = WktParser {
        arena,
        input: wkt.as_bytes(),
        pos: 0,
        dim: None,
        depth: 0,
        max_depth: options.max_nesting_depth.min(MAX_NESTING_DEPTH),
    };
    let result = parser.parse();
    if let Err(err) = &result {
        tracing::debug!(error = %err, "failed to parse WKT");
    }
    result
}

/// Recursive-descent parser over the bytes of a WKT string.
struct WktParser<'a, 's> {
    arena: &'a Arena,
    input: &'s [u8],
    pos: usize,

    /// Fixed by the first geometry keyword.
    dim: Option<Dimension>,

    /// Number of geometry collections currently open.
    depth: usize,
    max_depth: usize,
}

impl<'a, 's> WktParser<'a, 's> {
    fn parse(&mut self) -> Result<Geometry<'a>> {
        self.skip_whitespace();
        self.skip_srid()?;
        let geom = self.parse_geometry()?;
        if self.pos != self.input.len() {
            return Err(self.error("expected end of input"));
        }
        Ok(geom)
    }

    /// Discard an EWKT `SRID=...;` prefix.
    fn skip_srid(&mut self) -> Result<()> {
        let rest = &self.input[self.pos..];
        if rest.len() >= 4 && rest[..4].eq_ignore_ascii_case(b"SRID") {
            while self.pos < self.input.len() && self.input[self.pos] != b';' {
                self.pos += 1;
            }
            self.expect(b';')?;
        }
        Ok(())
    }

    fn parse_geometry(&mut self) -> Result<Geometry<'a>> {
        let start = self.pos;
        let word = self.read_word();
        let (geometry_type, tag) = split_keyword(word).ok_or_else(|| {
            self.error_at(
                start,
                format!(
                    "unknown geometry type '{}'",
                    String::from_utf8_lossy(word)
                ),
            )
        })?;
        self.skip_whitespace();
        let tag = match tag {
            Some(tag) => Some(tag),
            None => self.parse_dimension_tag(),
        };
        self.resolve_dimension(tag, start)?;

        match geometry_type {
            GeometryType::Point => Ok(Geometry::Point(self.parse_point()?)),
            GeometryType::LineString => Ok(Geometry::LineString(self.parse_line_string()?)),
            GeometryType::Polygon => Ok(Geometry::Polygon(self.parse_polygon()?)),
            GeometryType::MultiPoint => Ok(Geometry::MultiPoint(self.parse_multi_point()?)),
            GeometryType::MultiLineString => {
                Ok(Geometry::MultiLineString(self.parse_multi_line_string()?))
            }
            GeometryType::MultiPolygon => Ok(Geometry::MultiPolygon(self.parse_multi_polygon()?)),
            GeometryType::GeometryCollection => {
                Ok(Geometry::GeometryCollection(self.parse_collection()?))
            }
        }
    }

    /// Consume a standalone `Z`, `M` or `ZM` tag if one follows.
    fn parse_dimension_tag(&mut self) -> Option<Dimension> {
        let start = self.pos;
        match dimension_tag(self.read_word()) {
            Some(dim) => {
                self.skip_whitespace();
                Some(dim)
            }
            None => {
                self.pos = start;
                None
            }
        }
    }

    /// The outermost geometry fixes the dimension. Every nested member must carry the same tag,
    /// so an untagged member of a `Z`, `M` or `ZM` collection is rejected.
    fn resolve_dimension(&mut self, tag: Option<Dimension>, at: usize) -> Result<()> {
        let tag = tag.unwrap_or_default();
        match self.dim {
            None => {
                self.dim = Some(tag);
                Ok(())
            }
            Some(dim) if dim != tag => Err(GeometryError::DimensionalityMismatch(format!(
                "expected {dim}, found {tag} at position {at}"
            ))),
            Some(_) => Ok(()),
        }
    }

    fn dim(&self) -> Dimension {
        self.dim.unwrap_or_default()
    }

    fn parse_point(&mut self) -> Result<Point<'a>> {
        if self.match_empty() {
            return Ok(Point::empty(self.dim()));
        }
        self.expect(b'(')?;
        let point = self.parse_point_vertex()?;
        self.expect(b')')?;
        Ok(point)
    }

    fn parse_point_vertex(&mut self) -> Result<Point<'a>> {
        let mut coords = Vec::with_capacity(self.dim().size());
        self.parse_vertex(&mut coords)?;
        Point::try_from_buffer(self.buffer(&coords)?)
    }

    fn parse_line_string(&mut self) -> Result<LineString<'a>> {
        let start = self.pos;
        let coords = self.parse_vertex_list()?;
        let line = LineString::new(self.buffer(&coords)?);
        self.check_structure(line.validate(), start)?;
        Ok(line)
    }

    fn parse_polygon(&mut self) -> Result<Polygon<'a>> {
        if self.match_empty() {
            return Polygon::empty(self.arena, self.dim());
        }
        self.expect(b'(')?;
        let mut rings = vec![];
        loop {
            let start = self.pos;
            let coords = self.parse_vertex_list()?;
            let ring = self.buffer(&coords)?;
            self.check_structure(validate_ring(&ring), start)?;
            rings.push(ring);
            if !self.match_char(b',') {
                break;
            }
        }
        self.expect(b')')?;

        let mut polygon = Polygon::with_capacity(self.arena, rings.len(), self.dim())?;
        for ring in rings {
            polygon.push_ring(ring)?;
        }
        Ok(polygon)
    }

    /// Points inside a MULTIPOINT may or may not be wrapped in parentheses.
    fn parse_multi_point(&mut self) -> Result<MultiPoint<'a>> {
        let parts = self.parse_parts(|parser| {
            if parser.match_empty() {
                return Ok(Point::empty(parser.dim()));
            }
            let wrapped = parser.match_char(b'(');
            let point = parser.parse_point_vertex()?;
            if wrapped {
                parser.expect(b')')?;
            }
            Ok(point)
        })?;
        let mut multi = MultiPoint::with_capacity(self.arena, parts.len(), self.dim())?;
        for part in parts {
            multi.push(part)?;
        }
        Ok(multi)
    }

    fn parse_multi_line_string(&mut self) -> Result<MultiLineString<'a>> {
        let parts = self.parse_parts(|parser| parser.parse_line_string())?;
        let mut multi = MultiLineString::with_capacity(self.arena, parts.len(), self.dim())?;
        for part in parts {
            multi.push(part)?;
        }
        Ok(multi)
    }

    fn parse_multi_polygon(&mut self) -> Result<MultiPolygon<'a>> {
        let parts = self.parse_parts(|parser| parser.parse_polygon())?;
        let mut multi = MultiPolygon::with_capacity(self.arena, parts.len(), self.dim())?;
        for part in parts {
            multi.push(part)?;
        }
        Ok(multi)
    }

    fn parse_collection(&mut self) -> Result<GeometryCollection<'a>> {
        if self.depth >= self.max_depth {
            return Err(GeometryError::NestingTooDeep(self.max_depth));
        }
        self.depth += 1;
        let parts = self.parse_parts(|parser| parser.parse_geometry())?;
        self.depth -= 1;

        let mut gc = GeometryCollection::with_capacity(self.arena, parts.len(), self.dim())?;
        for part in parts {
            gc.push(part)?;
        }
        Ok(gc)
    }

    /// Parse `EMPTY` or a parenthesized, comma-separated list of parts.
    fn parse_parts<T>(
        &mut self,
        mut parse_part: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut parts = vec![];
        if self.match_empty() {
            return Ok(parts);
        }
        self.expect(b'(')?;
        loop {
            parts.push(parse_part(self)?);
            if !self.match_char(b',') {
                break;
            }
        }
        self.expect(b')')?;
        Ok(parts)
    }

    /// Parse `EMPTY` or a parenthesized, comma-separated list of vertices into interleaved
    /// ordinates.
    fn parse_vertex_list(&mut self) -> Result<Vec<f64>> {
        let mut coords = vec![];
        if self.match_empty() {
            return Ok(coords);
        }
        self.expect(b'(')?;
        loop {
            self.parse_vertex(&mut coords)?;
            if !self.match_char(b',') {
                break;
            }
        }
        self.expect(b')')?;
        Ok(coords)
    }

    fn parse_vertex(&mut self, coords: &mut Vec<f64>) -> Result<()> {
        for _ in 0..self.dim().size() {
            coords.push(self.parse_number()?);
        }
        Ok(())
    }

    /// Parse a float without regard to the process locale.
    fn parse_number(&mut self) -> Result<f64> {
        match lexical_core::parse_partial::<f64>(&self.input[self.pos..]) {
            Ok((value, consumed)) if consumed > 0 => {
                self.pos += consumed;
                self.skip_whitespace();
                Ok(value)
            }
            _ => Err(self.error("expected number")),
        }
    }

    fn buffer(&self, coords: &[f64]) -> Result<VertexBuffer<'a>> {
        VertexBuffer::from_interleaved(self.arena, coords, self.dim())
    }

    fn check_structure(&self, result: Result<()>, at: usize) -> Result<()> {
        result.map_err(|err| match err {
            GeometryError::InvalidGeometryStructure(msg) => {
                GeometryError::InvalidGeometryStructure(format!("{msg} at position {at}"))
            }
            other => other,
        })
    }

    /// Read a run of ASCII letters without skipping whitespace.
    fn read_word(&mut self) -> &'s [u8] {
        let input = self.input;
        let start = self.pos;
        while self.pos < input.len() && input[self.pos].is_ascii_alphabetic() {
            self.pos += 1;
        }
        &input[start..self.pos]
    }

    fn match_empty(&mut self) -> bool {
        let start = self.pos;
        if self.read_word().eq_ignore_ascii_case(b"EMPTY") {
            self.skip_whitespace();
            true
        } else {
            self.pos = start;
            false
        }
    }

    fn match_char(&mut self, c: u8) -> bool {
        if self.input.get(self.pos) == Some(&c) {
            self.pos += 1;
            self.skip_whitespace();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: u8) -> Result<()> {
        if self.match_char(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", c as char)))
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() && self.input[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn error(&self, message: impl Into<String>) -> GeometryError {
        self.error_at(self.pos, message)
    }

    /// A parse error quoting up to [`ERROR_CONTEXT_LEN`] bytes before `offset` and the byte at
    /// `offset` itself.
    fn error_at(&self, offset: usize, message: impl Into<String>) -> GeometryError {
        let start = offset.saturating_sub(ERROR_CONTEXT_LEN);
        let end = (offset + 1).min(self.input.len());
        let snippet = String::from_utf8_lossy(&self.input[start..end]);
        let context = if start > 0 {
            format!("...{snippet}")
        } else {
            snippet.into_owned()
        };
        GeometryError::Parse {
            message: message.into(),
            offset,
            context,
        }
    }
}

/// Split a keyword such as `POINT`, `pointz` or `MultiPolygonZM` into its geometry type and an
/// attached dimension tag.
fn split_keyword(word: &[u8]) -> Option<(GeometryType, Option<Dimension>)> {
    const KEYWORDS: [GeometryType; 7] = [
        GeometryType::Point,
        GeometryType::LineString,
        GeometryType::Polygon,
        GeometryType::MultiPoint,
        GeometryType::MultiLineString,
        GeometryType::MultiPolygon,
        GeometryType::GeometryCollection,
    ];
    KEYWORDS.into_iter().find_map(|geometry_type| {
        let name = geometry_type.wkt_name().as_bytes();
        if word.len() < name.len() || !word[..name.len()].eq_ignore_ascii_case(name) {
            return None;
        }
        let suffix = &word[name.len()..];
        if suffix.is_empty() {
            Some((geometry_type, None))
        } else {
            dimension_tag(suffix).map(|dim| (geometry_type, Some(dim)))
        }
    })
}

fn dimension_tag(word: &[u8]) -> Option<Dimension> {
    if word.eq_ignore_ascii_case(b"Z") {
        Some(Dimension::XYZ)
    } else if word.eq_ignore_ascii_case(b"M") {
        Some(Dimension::XYM)
    } else if word.eq_ignore_ascii_case(b"ZM") {
        Some(Dimension::XYZM)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::coord::Vertex;

    #[test]
    fn polygon_keeps_input_order() {
        let arena = Arena::new();
        let geom = read_wkt(&arena, "POLYGON((0 0,0 1,1 1,1 0,0 0))").unwrap();
        let polygon = geom.as_polygon().unwrap();
        let shell = polygon.exterior().unwrap();
        assert_eq!(shell.len(), 5);
        let vertices: Vec<Vertex> = shell.iter().collect();
        assert_eq!(vertices[1], Vertex::new(0., 1.));
        assert_eq!(vertices[3], Vertex::new(1., 0.));
        assert_eq!(geom.dimension(), Dimension::XY);
    }

    #[test]
    fn empty_geometries() {
        let arena = Arena::new();
        for wkt in [
            "POINT EMPTY",
            "LINESTRING EMPTY",
            "POLYGON EMPTY",
            "MULTIPOINT EMPTY",
            "MULTILINESTRING EMPTY",
            "MULTIPOLYGON EMPTY",
            "GEOMETRYCOLLECTION EMPTY",
            "point z empty",
        ] {
            let geom = read_wkt(&arena, wkt).unwrap();
            assert!(geom.is_empty(), "{wkt}");
        }
        let geom = read_wkt(&arena, "POINT ZM EMPTY").unwrap();
        assert_eq!(geom.dimension(), Dimension::XYZM);
    }

    #[test]
    fn dimension_tags() {
        let arena = Arena::new();
        let geom = read_wkt(&arena, "point zm (1 2 3 4)").unwrap();
        assert_eq!(
            geom.as_point().unwrap().vertex(),
            Some(Vertex::xyzm(1., 2., 3., 4.))
        );

        let geom = read_wkt(&arena, "POINTZ(1 2 3)").unwrap();
        assert_eq!(geom.dimension(), Dimension::XYZ);

        let geom = read_wkt(&arena, "LineString M (0 0 1, 1 1 2)").unwrap();
        assert_eq!(geom.dimension(), Dimension::XYM);
        assert_eq!(
            geom.as_line_string().unwrap().end_point(),
            Some(Vertex::xym(1., 1., 2.))
        );
    }

    #[test]
    fn srid_prefix_is_discarded() {
        let arena = Arena::new();
        let geom = read_wkt(&arena, "SRID=4326; POINT (1.5 -2e3)").unwrap();
        assert_eq!(
            geom.as_point().unwrap().vertex(),
            Some(Vertex::new(1.5, -2000.))
        );
    }

    #[test]
    fn multipoint_parentheses_are_optional() {
        let arena = Arena::new();
        let bare = read_wkt(&arena, "MULTIPOINT (1 2, 3 4)").unwrap();
        let wrapped = read_wkt(&arena, "MULTIPOINT ((1 2), (3 4))").unwrap();
        let mixed = read_wkt(&arena, "MULTIPOINT ((1 2), 3 4)").unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare, mixed);
        assert_eq!(bare.num_parts(), 2);

        let with_empty = read_wkt(&arena, "MULTIPOINT ((1 2), EMPTY)").unwrap();
        assert_eq!(with_empty.num_parts(), 2);
        assert_eq!(with_empty.num_vertices(), 1);
    }

    #[test]
    fn collection_members_share_dimension() {
        let arena = Arena::new();
        let geom = read_wkt(
            &arena,
            "GEOMETRYCOLLECTION Z (POINT Z (1 2 3), LINESTRING Z (0 0 0, 1 1 1))",
        )
        .unwrap();
        assert_eq!(geom.dimension(), Dimension::XYZ);
        assert_eq!(geom.num_vertices(), 3);

        // Members repeat the collection's tag.
        let err = read_wkt(&arena, "GEOMETRYCOLLECTION Z (POINT (1 2 3))").unwrap_err();
        assert!(matches!(err, GeometryError::DimensionalityMismatch(_)));
        let err = read_wkt(
            &arena,
            "GEOMETRYCOLLECTION M (GEOMETRYCOLLECTION M (POINT (1 2 3)))",
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::DimensionalityMismatch(_)));

        let err = read_wkt(&arena, "GEOMETRYCOLLECTION Z (POINT M (1 2 3))").unwrap_err();
        assert!(matches!(err, GeometryError::DimensionalityMismatch(_)));

        let err = read_wkt(&arena, "GEOMETRYCOLLECTION (POINT Z (1 2 3))").unwrap_err();
        assert!(matches!(err, GeometryError::DimensionalityMismatch(_)));
    }

    #[test]
    fn nested_collections() {
        let arena = Arena::new();
        let geom = read_wkt(
            &arena,
            "GEOMETRYCOLLECTION (POINT (0 1), GEOMETRYCOLLECTION (POINT (1 2), LINESTRING (0 0, 3 0, 3 4)))",
        )
        .unwrap();
        assert_eq!(geom, crate::test::geometrycollection::nested_collection(&arena));

        let options = WktReaderOptions {
            max_nesting_depth: 1,
        };
        let err = read_wkt_with_options(
            &arena,
            "GEOMETRYCOLLECTION (GEOMETRYCOLLECTION EMPTY)",
            &options,
        )
        .unwrap_err();
        assert!(matches!(err, GeometryError::NestingTooDeep(1)));

        // Larger limits are clamped to the library maximum.
        let options = WktReaderOptions {
            max_nesting_depth: usize::MAX,
        };
        let deep = format!(
            "{}POINT EMPTY{}",
            "GEOMETRYCOLLECTION (".repeat(MAX_NESTING_DEPTH + 1),
            ")".repeat(MAX_NESTING_DEPTH + 1)
        );
        let err = read_wkt_with_options(&arena, &deep, &options).unwrap_err();
        assert!(matches!(err, GeometryError::NestingTooDeep(MAX_NESTING_DEPTH)));
    }

    #[test]
    fn error_position_and_context() {
        let arena = Arena::new();
        let err = read_wkt(&arena, "POINT (1 2").unwrap_err();
        assert!(matches!(err, GeometryError::Parse { offset: 10, .. }));
        assert_eq!(
            err.to_string(),
            "WKT parse error: expected ')' at position 10 near: 'POINT (1 2'"
        );

        let err = read_wkt(&arena, "CIRCLE (1 2)").unwrap_err();
        assert!(err.to_string().contains("unknown geometry type 'CIRCLE'"));

        let long = format!("LINESTRING ({} 1 x)", "1 1, ".repeat(10));
        match read_wkt(&arena, &long).unwrap_err() {
            GeometryError::Parse { context, .. } => {
                assert!(context.starts_with("..."));
                assert_eq!(context.len(), 3 + 33);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn trailing_input() {
        let arena = Arena::new();
        assert!(matches!(
            read_wkt(&arena, "POINT (1 2) POINT (3 4)"),
            Err(GeometryError::Parse { offset: 12, .. })
        ));
        assert!(read_wkt(&arena, "  POINT (1 2)  ").is_ok());
    }

    #[test]
    fn structural_errors() {
        let arena = Arena::new();
        assert!(matches!(
            read_wkt(&arena, "LINESTRING (1 1)"),
            Err(GeometryError::InvalidGeometryStructure(_))
        ));
        assert!(matches!(
            read_wkt(&arena, "POLYGON ((0 0, 1 0, 1 1, 0 1))"),
            Err(GeometryError::InvalidGeometryStructure(_))
        ));
        assert!(matches!(
            read_wkt(&arena, "POLYGON ((0 0, 1 0, 0 0))"),
            Err(GeometryError::InvalidGeometryStructure(_))
        ));
        assert!(matches!(
            read_wkt(&arena, "POINT (1)"),
            Err(GeometryError::Parse { .. })
        ));
    }
}
