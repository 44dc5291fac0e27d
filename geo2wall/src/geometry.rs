use serde::{Deserialize, Serialize};

// Coordinates closer than this are treated as the same vertex
const VERTEX_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub(crate) fn coincides(&self, other: &Point) -> bool {
        (self.x - other.x).abs() <= VERTEX_EPSILON && (self.y - other.y).abs() <= VERTEX_EPSILON
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for geo::Coord<f64> {
    fn from(p: Point) -> Self {
        geo::Coord { x: p.x, y: p.y }
    }
}

/// Ordered boundary of a feature: a closed polygon ring or an open polyline.
///
/// Closed rings never store the repeated closing vertex; the closing edge is
/// implied by `closed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    points: Vec<Point>,
    closed: bool,
}

impl Ring {
    /// Polygon boundary. A trailing vertex equal to the first one is dropped.
    pub fn closed(points: impl IntoIterator<Item = Point>) -> Self {
        let mut points = dedup_consecutive(points);
        while points.len() > 1 && points[0].coincides(&points[points.len() - 1]) {
            points.pop();
        }
        Self {
            points,
            closed: true,
        }
    }

    /// Open polyline.
    pub fn open(points: impl IntoIterator<Item = Point>) -> Self {
        Self {
            points: dedup_consecutive(points),
            closed: false,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of pairwise distinct vertices
    pub fn distinct_points(&self) -> usize {
        let mut distinct: Vec<&Point> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if !distinct.iter().any(|d| d.coincides(p)) {
                distinct.push(p);
            }
        }
        distinct.len()
    }

    /// Rings need two distinct vertices to carry any edge. Construction removes
    /// consecutive duplicates, so a short vertex list is the only failure mode.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// Same ring with every vertex passed through `f`
    pub fn map_points(&self, mut f: impl FnMut(&Point) -> Point) -> Ring {
        Ring {
            points: self.points.iter().map(|p| f(p)).collect(),
            closed: self.closed,
        }
    }
}

fn dedup_consecutive(points: impl IntoIterator<Item = Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::new();
    for p in points {
        if out.last().map_or(true, |last| !last.coincides(&p)) {
            out.push(p);
        }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
    Unclassified,
}

impl Orientation {
    /// Coordinate along which a wall of this orientation runs
    pub(crate) fn along(&self, p: &Point) -> f64 {
        match self {
            Orientation::Vertical => p.y,
            _ => p.x,
        }
    }

    /// Coordinate of the line a wall of this orientation lies on
    pub(crate) fn across(&self, p: &Point) -> f64 {
        match self {
            Orientation::Vertical => p.x,
            _ => p.y,
        }
    }

    /// Inverse of `along`/`across`
    pub(crate) fn point_at(&self, along: f64, across: f64) -> Point {
        match self {
            Orientation::Vertical => Point::new(across, along),
            _ => Point::new(along, across),
        }
    }
}

/// Edge between two consecutive ring vertices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p0: Point,
    pub p1: Point,
    pub orientation: Orientation,
}

impl Segment {
    /// Untagged segment, or `None` when both endpoints coincide
    pub fn new(p0: Point, p1: Point) -> Option<Self> {
        if p0.coincides(&p1) {
            return None;
        }
        Some(Self {
            p0,
            p1,
            orientation: Orientation::Unclassified,
        })
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn reversed(&self) -> Self {
        Self {
            p0: self.p1,
            p1: self.p0,
            orientation: self.orientation,
        }
    }

    pub fn length(&self) -> f64 {
        self.p0.distance_to(&self.p1)
    }

    pub fn midpoint(&self) -> Point {
        Point::new((self.p0.x + self.p1.x) / 2.0, (self.p0.y + self.p1.y) / 2.0)
    }
}
