use itertools::Itertools;

use crate::algorithm::native::Length;
use crate::coord::{closest_point_on_segment, Vertex, VertexBuffer};
use crate::scalar::LineString;

/// Where a query point projects onto a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedVertex {
    /// The closest position on the line.
    pub vertex: Vertex,

    /// Length of the line up to the start of the closest segment, as a fraction of the total
    /// length.
    pub fraction: f64,

    /// Planar distance from the query point to `vertex`.
    pub distance: f64,
}

/// Nearest segment, vertex and position searches over a sequence of vertices.
///
/// Each search is a linear scan that stops early at an exact hit.
pub trait ClosestPoint {
    /// Index of the first vertex of the closest segment, and the distance to it.
    ///
    /// `None` with fewer than two vertices.
    fn closest_segment(&self, point: &Vertex) -> Option<(usize, f64)>;

    /// Index of the closest vertex, and the distance to it. `None` if empty.
    fn closest_vertex(&self, point: &Vertex) -> Option<(usize, f64)>;

    /// Project `point` onto the closest segment of the line.
    ///
    /// An empty line yields the default vertex with zero fraction and distance. A single vertex
    /// or a line of zero length yields its closest vertex at fraction zero.
    fn locate_vertex(&self, point: &Vertex) -> LocatedVertex;
}

impl ClosestPoint for VertexBuffer<'_> {
    fn closest_segment(&self, point: &Vertex) -> Option<(usize, f64)> {
        let mut closest: Option<(usize, f64)> = None;
        for (i, (p1, p2)) in self.iter().tuple_windows().enumerate() {
            let distance = point.distance_squared_to_segment(&p1, &p2);
            if closest.map_or(true, |(_, min)| distance < min) {
                closest = Some((i, distance));
                if distance == 0.0 {
                    break;
                }
            }
        }
        closest.map(|(i, distance)| (i, distance.sqrt()))
    }

    fn closest_vertex(&self, point: &Vertex) -> Option<(usize, f64)> {
        let mut closest: Option<(usize, f64)> = None;
        for (i, vertex) in self.iter().enumerate() {
            let distance = point.distance_squared(&vertex);
            if closest.map_or(true, |(_, min)| distance < min) {
                closest = Some((i, distance));
                if distance == 0.0 {
                    break;
                }
            }
        }
        closest.map(|(i, distance)| (i, distance.sqrt()))
    }

    fn locate_vertex(&self, point: &Vertex) -> LocatedVertex {
        let Some((segment, distance)) = self.closest_segment(point) else {
            return match self.first() {
                Some(single) => LocatedVertex {
                    vertex: single,
                    fraction: 0.0,
                    distance: point.distance(&single),
                },
                None => LocatedVertex {
                    vertex: Vertex::default(),
                    fraction: 0.0,
                    distance: 0.0,
                },
            };
        };

        let mut along = 0.0;
        let mut vertex = Vertex::default();
        for (i, (p1, p2)) in self.iter().tuple_windows().enumerate().take(segment + 1) {
            if i == segment {
                vertex = closest_point_on_segment(point, &p1, &p2);
            } else {
                along += p1.distance(&p2);
            }
        }

        let total = self.length();
        let fraction = if total == 0.0 { 0.0 } else { along / total };
        LocatedVertex {
            vertex,
            fraction,
            distance,
        }
    }
}

impl ClosestPoint for LineString<'_> {
    fn closest_segment(&self, point: &Vertex) -> Option<(usize, f64)> {
        self.coords().closest_segment(point)
    }

    fn closest_vertex(&self, point: &Vertex) -> Option<(usize, f64)> {
        self.coords().closest_vertex(point)
    }

    fn locate_vertex(&self, point: &Vertex) -> LocatedVertex {
        self.coords().locate_vertex(point)
    }
}
