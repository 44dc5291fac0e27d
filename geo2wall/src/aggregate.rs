use crate::geometry::{Orientation, Point, Segment};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::debug;

// Absorbs rounding noise when comparing interval ends, e.g. after rotation
const MERGE_EPSILON: f64 = 1e-9;

/// A run of collinear, axis-aligned segments merged into one wall.
///
/// `points` are ordered along the wall axis (left to right, bottom to top) and
/// keep every vertex of the merged segments, so the first and last entries are
/// the wall's extreme endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub orientation: Orientation,
    /// y of a horizontal wall, x of a vertical one
    pub offset: f64,
    pub points: Vec<Point>,
}

impl Wall {
    pub fn start(&self) -> Point {
        self.points[0]
    }

    pub fn end(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    pub fn length(&self) -> f64 {
        self.start().distance_to(&self.end())
    }

    /// Endpoints as `[x1, y1, x2, y2]`
    pub fn as_segment(&self) -> [f64; 4] {
        let (s, e) = (self.start(), self.end());
        [s.x, s.y, e.x, e.y]
    }

    /// The wall cut at every stored vertex
    pub fn segments(&self) -> Vec<Segment> {
        self.points
            .windows(2)
            .filter_map(|pair| Segment::new(pair[0], pair[1]))
            .map(|s| s.with_orientation(self.orientation))
            .collect()
    }
}

/// Horizontal and vertical walls, each in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WallSet {
    pub walls_h: Vec<Wall>,
    pub walls_v: Vec<Wall>,
}

impl WallSet {
    pub fn len(&self) -> usize {
        self.walls_h.len() + self.walls_v.len()
    }

    pub fn is_empty(&self) -> bool {
        self.walls_h.is_empty() && self.walls_v.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Wall> {
        self.walls_h.iter().chain(self.walls_v.iter())
    }

    /// Endpoint tuples for plotting: `(walls_h, walls_v)`
    pub fn to_segments(&self) -> (Vec<[f64; 4]>, Vec<[f64; 4]>) {
        (
            self.walls_h.iter().map(Wall::as_segment).collect(),
            self.walls_v.iter().map(Wall::as_segment).collect(),
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A classified segment reduced to its wall line and extent along it
#[derive(Debug, Clone, Copy)]
struct Span {
    index: usize,
    offset: f64,
    lo: f64,
    hi: f64,
}

/// Merge classified segments into walls.
///
/// Segments of the same orientation whose lines are within `offset_tolerance`
/// of each other and whose extents overlap, touch, or are separated by at most
/// `gap_tolerance` become a single wall. Unclassified segments are ignored.
/// Walls are ordered by the index of their earliest segment.
pub fn aggregate_walls(segments: &[Segment], offset_tolerance: f64, gap_tolerance: f64) -> WallSet {
    let walls_h = merge_orientation(segments, Orientation::Horizontal, offset_tolerance, gap_tolerance);
    let walls_v = merge_orientation(segments, Orientation::Vertical, offset_tolerance, gap_tolerance);

    debug!(
        "Aggregated {} segments into {} horizontal and {} vertical walls",
        segments.len(),
        walls_h.len(),
        walls_v.len()
    );

    WallSet { walls_h, walls_v }
}

fn merge_orientation(
    segments: &[Segment],
    orientation: Orientation,
    offset_tolerance: f64,
    gap_tolerance: f64,
) -> Vec<Wall> {
    let mut spans: Vec<Span> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| s.orientation == orientation)
        .map(|(index, s)| {
            let a = orientation.along(&s.p0);
            let b = orientation.along(&s.p1);
            Span {
                index,
                offset: orientation.across(&s.midpoint()),
                lo: a.min(b),
                hi: a.max(b),
            }
        })
        .collect();

    // Group lines: consecutive offsets within `offset_tolerance` share a group,
    // so distinct groups are always more than `offset_tolerance` apart
    spans.sort_by_key(|s| (OrderedFloat(s.offset), s.index));

    let mut walls: Vec<(usize, Wall)> = Vec::new();
    let mut start = 0;
    while start < spans.len() {
        let mut end = start + 1;
        while end < spans.len() && spans[end].offset - spans[end - 1].offset <= offset_tolerance {
            end += 1;
        }
        merge_line(&mut spans[start..end], orientation, gap_tolerance, &mut walls);
        start = end;
    }

    walls.sort_by_key(|(first, _)| *first);
    walls.into_iter().map(|(_, wall)| wall).collect()
}

/// 1D interval merge over the spans of a single wall line
fn merge_line(
    line: &mut [Span],
    orientation: Orientation,
    gap_tolerance: f64,
    out: &mut Vec<(usize, Wall)>,
) {
    line.sort_by_key(|s| (OrderedFloat(s.lo), s.index));

    let mut run: Vec<Span> = vec![line[0]];
    let mut run_hi = line[0].hi;

    for span in &line[1..] {
        if span.lo <= run_hi + gap_tolerance + MERGE_EPSILON {
            run_hi = run_hi.max(span.hi);
            run.push(*span);
        } else {
            out.push(build_wall(&run, orientation));
            run = vec![*span];
            run_hi = span.hi;
        }
    }
    out.push(build_wall(&run, orientation));
}

fn build_wall(run: &[Span], orientation: Orientation) -> (usize, Wall) {
    let first = run.iter().map(|s| s.index).min().unwrap_or(0);

    // Extent-weighted mean offset, taken relative to the first span so a run
    // on one exact line keeps that line's offset bit for bit
    let anchor = run[0].offset;
    let total: f64 = run.iter().map(|s| s.hi - s.lo).sum();
    let offset = if total > 0.0 {
        anchor + run.iter().map(|s| (s.hi - s.lo) * (s.offset - anchor)).sum::<f64>() / total
    } else {
        anchor
    };

    let mut breaks: Vec<f64> = run.iter().flat_map(|s| [s.lo, s.hi]).collect();
    breaks.sort_by_key(|v| OrderedFloat(*v));
    breaks.dedup_by(|b, a| (*b - *a).abs() <= MERGE_EPSILON);

    let points = breaks
        .into_iter()
        .map(|along| orientation.point_at(along, offset))
        .collect();

    (
        first,
        Wall {
            orientation,
            offset,
            points,
        },
    )
}
