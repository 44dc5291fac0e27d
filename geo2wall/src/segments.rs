use crate::geometry::{Orientation, Point, Ring, Segment};

/// Break a ring into its edges, in traversal order.
///
/// Closed rings also yield the edge from the last vertex back to the first.
/// Rings with fewer than two vertices yield nothing.
pub fn extract_segments(ring: &Ring) -> Vec<Segment> {
    let points = ring.points();
    if points.len() < 2 {
        return Vec::new();
    }

    let mut segments: Vec<Segment> = points
        .windows(2)
        .filter_map(|pair| Segment::new(pair[0], pair[1]))
        .collect();

    if ring.is_closed() {
        if let Some(closing) = Segment::new(points[points.len() - 1], points[0]) {
            segments.push(closing);
        }
    }

    segments
}

/// Collapse a thin wall polygon to the line through its middle.
///
/// The bounding box decides the direction: wider than tall gives a horizontal
/// segment at mid-height, anything else a vertical one at mid-width. Open
/// rings and degenerate boxes give `None`.
pub fn centerline_segment(ring: &Ring) -> Option<Segment> {
    if !ring.is_closed() || ring.is_degenerate() {
        return None;
    }

    let (min_x, min_y, max_x, max_y) = ring.points().iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
    );

    let width = max_x - min_x;
    let height = max_y - min_y;

    if width > height {
        let c = (min_y + max_y) / 2.0;
        Segment::new(Point::new(min_x, c), Point::new(max_x, c))
            .map(|s| s.with_orientation(Orientation::Horizontal))
    } else {
        let c = (min_x + max_x) / 2.0;
        Segment::new(Point::new(c, min_y), Point::new(c, max_y))
            .map(|s| s.with_orientation(Orientation::Vertical))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn test_closed_ring_has_closing_edge() {
        let ring = Ring::closed(pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]));
        let segments = extract_segments(&ring);
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[3].p0, Point::new(0.0, 10.0));
        assert_eq!(segments[3].p1, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_explicitly_closed_ring_counts_distinct_points() {
        let ring = Ring::closed(pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 0.0)]));
        assert_eq!(extract_segments(&ring).len(), 3);
    }

    #[test]
    fn test_two_point_closed_ring_runs_back_and_forth() {
        let ring = Ring::closed(pts(&[(0.0, 0.0), (3.0, 0.0)]));
        let segments = extract_segments(&ring);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], segments[0].reversed());
    }

    #[test]
    fn test_open_ring_has_no_closing_edge() {
        let ring = Ring::open(pts(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]));
        let segments = extract_segments(&ring);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].p0, Point::new(0.0, 0.0));
        assert_eq!(segments[1].p1, Point::new(5.0, 5.0));
    }

    #[test]
    fn test_short_ring_yields_nothing() {
        assert!(extract_segments(&Ring::open(pts(&[(1.0, 1.0)]))).is_empty());
        assert!(extract_segments(&Ring::closed(Vec::new())).is_empty());
    }

    #[test]
    fn test_segments_start_untagged() {
        let ring = Ring::open(pts(&[(0.0, 0.0), (5.0, 0.0)]));
        assert_eq!(extract_segments(&ring)[0].orientation, Orientation::Unclassified);
    }

    #[test]
    fn test_centerline_of_horizontal_wall() {
        let ring = Ring::closed(pts(&[(0.0, 0.0), (8.0, 0.0), (8.0, 0.2), (0.0, 0.2)]));
        let s = centerline_segment(&ring).unwrap();
        assert_eq!(s.orientation, Orientation::Horizontal);
        assert_eq!(s.p0, Point::new(0.0, 0.1));
        assert_eq!(s.p1, Point::new(8.0, 0.1));
    }

    #[test]
    fn test_centerline_of_vertical_wall() {
        let ring = Ring::closed(pts(&[(2.0, 1.0), (2.5, 1.0), (2.5, 6.0), (2.0, 6.0)]));
        let s = centerline_segment(&ring).unwrap();
        assert_eq!(s.orientation, Orientation::Vertical);
        assert_eq!(s.p0, Point::new(2.25, 1.0));
        assert_eq!(s.p1, Point::new(2.25, 6.0));
    }

    #[test]
    fn test_centerline_needs_closed_ring() {
        let ring = Ring::open(pts(&[(0.0, 0.0), (8.0, 0.0), (8.0, 0.2)]));
        assert!(centerline_segment(&ring).is_none());
    }
}
