//! Exact integer predicates over lattice points.
//!
//! Every coordinate is an `i32` and every predicate is computed with `i128` cross products, so
//! there is no tolerance to tune: a point is either on a line or it is not. Boundaries are always
//! closed, a point touching a segment or a triangle edge counts as being on it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A position on the board
///
/// Points order lexicographically by `x` then `y`, which is the order every collection in this
/// crate iterates in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Point {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Point {
    /// Construct a point from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An undirected line between two distinct points
///
/// The endpoints are stored in ascending order so that `Segment::new(a, b) == Segment::new(b, a)`
/// and segments sort by their lower endpoint first.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "(Point, Point)", into = "(Point, Point)")]
pub struct Segment {
    low: Point,
    high: Point,
}

impl Segment {
    /// Join two points, failing if they are the same point
    pub fn new(a: Point, b: Point) -> Result<Self, Error> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Ok(Self { low: a, high: b }),
            std::cmp::Ordering::Greater => Ok(Self { low: b, high: a }),
            std::cmp::Ordering::Equal => Err(Error::DegenerateSegment(a)),
        }
    }

    /// The lexicographically smaller endpoint
    pub fn low(&self) -> Point {
        self.low
    }

    /// The lexicographically larger endpoint
    pub fn high(&self) -> Point {
        self.high
    }

    /// Both endpoints, smaller first
    pub fn endpoints(&self) -> [Point; 2] {
        [self.low, self.high]
    }

    /// Whether `p` is one of the two endpoints
    pub fn has_endpoint(&self, p: Point) -> bool {
        self.low == p || self.high == p
    }

    /// The endpoint that is not `p`, if `p` is an endpoint at all
    pub fn other_endpoint(&self, p: Point) -> Option<Point> {
        if self.low == p {
            Some(self.high)
        } else if self.high == p {
            Some(self.low)
        } else {
            None
        }
    }

    /// How many endpoints the two segments have in common (0, 1 or 2)
    pub fn shared_endpoints(&self, other: &Segment) -> usize {
        self.endpoints()
            .iter()
            .filter(|p| other.has_endpoint(**p))
            .count()
    }

    /// Whether drawing `self` is blocked by `other` already being on the board
    ///
    /// Segments that meet at exactly one shared endpoint are fine. Anything else that touches,
    /// including the very same segment, is a crossing.
    pub fn crosses(&self, other: &Segment) -> bool {
        self.shared_endpoints(other) != 1 && segments_intersect(self, other)
    }
}

impl TryFrom<(Point, Point)> for Segment {
    type Error = Error;

    fn try_from((a, b): (Point, Point)) -> Result<Self, Self::Error> {
        Segment::new(a, b)
    }
}

impl From<Segment> for (Point, Point) {
    fn from(s: Segment) -> Self {
        (s.low, s.high)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Three distinct points, stored in ascending order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Triangle {
    vertices: [Point; 3],
}

impl Triangle {
    /// Build a triangle from three points in any order
    pub fn new(a: Point, b: Point, c: Point) -> Self {
        let mut vertices = [a, b, c];
        vertices.sort();
        Self { vertices }
    }

    #[allow(missing_docs)]
    pub fn vertices(&self) -> [Point; 3] {
        self.vertices
    }

    /// Whether `p` is one of the corners
    pub fn has_vertex(&self, p: Point) -> bool {
        self.vertices.contains(&p)
    }

    /// Closed containment, see [point_in_triangle]
    pub fn contains(&self, p: Point) -> bool {
        point_in_triangle(self, p)
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.vertices;
        write!(f, "{a}/{b}/{c}")
    }
}

/// Twice the signed area of `pqr`. Positive when counter-clockwise, zero when collinear
///
/// Coordinate differences need 33 bits, so their products don't fit in an `i64`.
pub fn orientation(p: Point, q: Point, r: Point) -> i128 {
    let (px, py) = (i128::from(p.x), i128::from(p.y));
    let (qx, qy) = (i128::from(q.x), i128::from(q.y));
    let (rx, ry) = (i128::from(r.x), i128::from(r.y));

    (qx - px) * (ry - py) - (qy - py) * (rx - px)
}

fn within_bounds(a: Point, b: Point, p: Point) -> bool {
    a.x.min(b.x) <= p.x && p.x <= a.x.max(b.x) && a.y.min(b.y) <= p.y && p.y <= a.y.max(b.y)
}

/// Whether `p` lies on the closed segment, endpoints included
pub fn point_on_segment(segment: &Segment, p: Point) -> bool {
    let [a, b] = segment.endpoints();
    orientation(a, b, p) == 0 && within_bounds(a, b, p)
}

/// Whether the two closed segments have any point in common
///
/// Touching at an endpoint and collinear overlap both count. Callers that want to allow two
/// segments meeting at a shared endpoint must special case that themselves, see
/// [Segment::crosses].
pub fn segments_intersect(first: &Segment, second: &Segment) -> bool {
    let [a, b] = first.endpoints();
    let [c, d] = second.endpoints();

    let o1 = orientation(a, b, c).signum();
    let o2 = orientation(a, b, d).signum();
    let o3 = orientation(c, d, a).signum();
    let o4 = orientation(c, d, b).signum();

    if o1 * o2 < 0 && o3 * o4 < 0 {
        return true;
    }

    (o1 == 0 && within_bounds(a, b, c))
        || (o2 == 0 && within_bounds(a, b, d))
        || (o3 == 0 && within_bounds(c, d, a))
        || (o4 == 0 && within_bounds(c, d, b))
}

/// Whether `p` lies inside or on the boundary of the triangle
///
/// A zero-area triangle contains exactly the points on its edges.
pub fn point_in_triangle(triangle: &Triangle, p: Point) -> bool {
    let [a, b, c] = triangle.vertices;

    if orientation(a, b, c) == 0 {
        return [(a, b), (b, c), (a, c)]
            .into_iter()
            .any(|(u, v)| orientation(u, v, p) == 0 && within_bounds(u, v, p));
    }

    let d1 = orientation(a, b, p);
    let d2 = orientation(b, c, p);
    let d3 = orientation(c, a, p);

    let has_negative = d1 < 0 || d2 < 0 || d3 < 0;
    let has_positive = d1 > 0 || d2 > 0 || d3 > 0;

    !(has_negative && has_positive)
}
