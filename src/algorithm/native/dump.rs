use crate::scalar::{Geometry, LineString, Point, Polygon};

/// A leaf geometry and its 1-based position in the tree it was dumped from.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpedGeometry<'a> {
    pub geometry: Geometry<'a>,

    /// Part indices from the root down, starting at 1. Empty for a root that is itself a leaf.
    pub path: Vec<usize>,
}

/// A borrowed node of the tree being dumped.
enum Node<'g, 'a> {
    Geometry(&'g Geometry<'a>),
    Point(&'g Point<'a>),
    LineString(&'g LineString<'a>),
    Polygon(&'g Polygon<'a>),
}

/// Flatten a geometry into its points, linestrings and polygons in depth-first order.
///
/// Collections and multi-geometries are exploded into their members; empty ones contribute
/// nothing. The traversal keeps an explicit stack of borrowed nodes, so its depth is bounded by
/// the heap rather than the call stack, and only the emitted leaves are copied.
pub fn dump<'a>(geom: &Geometry<'a>) -> Vec<DumpedGeometry<'a>> {
    let mut out = Vec::new();
    let mut stack = vec![(Node::Geometry(geom), vec![])];

    while let Some((node, path)) = stack.pop() {
        let leaf: Geometry<'a> = match node {
            Node::Point(g) | Node::Geometry(Geometry::Point(g)) => g.clone().into(),
            Node::LineString(g) | Node::Geometry(Geometry::LineString(g)) => g.clone().into(),
            Node::Polygon(g) | Node::Geometry(Geometry::Polygon(g)) => g.clone().into(),
            Node::Geometry(Geometry::MultiPoint(g)) => {
                push_children(&mut stack, &path, g.iter().map(Node::Point));
                continue;
            }
            Node::Geometry(Geometry::MultiLineString(g)) => {
                push_children(&mut stack, &path, g.iter().map(Node::LineString));
                continue;
            }
            Node::Geometry(Geometry::MultiPolygon(g)) => {
                push_children(&mut stack, &path, g.iter().map(Node::Polygon));
                continue;
            }
            Node::Geometry(Geometry::GeometryCollection(g)) => {
                push_children(&mut stack, &path, g.iter().map(Node::Geometry));
                continue;
            }
        };
        out.push(DumpedGeometry {
            geometry: leaf,
            path,
        });
    }
    out
}

fn push_children<'g, 'a>(
    stack: &mut Vec<(Node<'g, 'a>, Vec<usize>)>,
    path: &[usize],
    children: impl DoubleEndedIterator<Item = Node<'g, 'a>> + ExactSizeIterator,
) {
    // Pushed in reverse so the first member is visited first.
    for (i, child) in children.enumerate().rev() {
        let mut child_path = path.to_vec();
        child_path.push(i + 1);
        stack.push((child, child_path));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arena::Arena;
    use crate::datatypes::Dimension;
    use crate::io::serialized::{deserialize, serialize, SerializeOptions};
    use crate::io::wkt::read_wkt;
    use crate::scalar::GeometryCollection;
    use crate::test::geometrycollection::nested_collection;
    use crate::test::linestring::ls0;
    use crate::test::point::{p0, p1};

    #[test]
    fn nested_collection_paths() {
        let arena = Arena::new();
        let dumped = dump(&nested_collection(&arena));
        assert_eq!(dumped.len(), 3);
        assert_eq!(dumped[0].geometry, p0(&arena).into());
        assert_eq!(dumped[0].path, vec![1]);
        assert_eq!(dumped[1].geometry, p1(&arena).into());
        assert_eq!(dumped[1].path, vec![2, 1]);
        assert_eq!(dumped[2].geometry, ls0(&arena).into());
        assert_eq!(dumped[2].path, vec![2, 2]);
    }

    #[test]
    fn multi_geometries_are_exploded() {
        let arena = Arena::new();
        let geom = read_wkt(
            &arena,
            "GEOMETRYCOLLECTION (MULTIPOINT ((1 1), (2 2)), GEOMETRYCOLLECTION EMPTY, POINT (3 3))",
        )
        .unwrap();
        let paths: Vec<_> = dump(&geom).into_iter().map(|d| d.path).collect();
        assert_eq!(paths, vec![vec![1, 1], vec![1, 2], vec![3]]);
    }

    #[test]
    fn only_leaves_are_copied() {
        let depth = 100;
        let wkt = format!(
            "{}LINESTRING (0 0, 1 1){}",
            "GEOMETRYCOLLECTION (".repeat(depth),
            ")".repeat(depth)
        );
        let build = Arena::new();
        let buf = serialize(&read_wkt(&build, &wkt).unwrap(), &SerializeOptions::default()).unwrap();

        // Views borrow their ordinates, so copying the leaf needs no arena memory.
        let arena = Arena::new();
        let geom = deserialize(&arena, &buf, &Default::default()).unwrap();
        let before = arena.allocated_bytes();
        let dumped = dump(&geom);
        assert_eq!(arena.allocated_bytes(), before);

        assert_eq!(dumped.len(), 1);
        assert_eq!(dumped[0].path, vec![1; depth]);
        assert_eq!(dumped[0].geometry.num_vertices(), 2);
    }

    #[test]
    fn leaf_root() {
        let arena = Arena::new();
        let dumped = dump(&ls0(&arena).into());
        assert_eq!(dumped.len(), 1);
        assert!(dumped[0].path.is_empty());

        let empty = GeometryCollection::empty(&arena, Dimension::XY).unwrap();
        assert!(dump(&empty.into()).is_empty());
    }
}
