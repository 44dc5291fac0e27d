use crate::config::RotationOrigin;
use crate::geometry::{Point, Ring};
use geo::{BoundingRect, Centroid, Geometry, GeometryCollection, LineString, MultiPoint, Polygon};
use nalgebra::{Rotation2, Vector2};
use tracing::debug;

/// Resolve the rotation origin for a set of rings.
///
/// The centroid is taken over the union of all features: closed rings count
/// as polygons, open rings as line strings.
pub fn resolve_origin(rings: &[Ring], origin: RotationOrigin) -> Point {
    match origin {
        RotationOrigin::Point(p) => p,
        RotationOrigin::Centroid => centroid(rings),
    }
}

fn centroid(rings: &[Ring]) -> Point {
    let collection: GeometryCollection<f64> = rings
        .iter()
        .filter(|ring| !ring.is_empty())
        .map(|ring| {
            let line = LineString::from(
                ring.points()
                    .iter()
                    .map(|p| geo::Coord::from(*p))
                    .collect::<Vec<_>>(),
            );
            if ring.is_closed() && ring.len() >= 3 {
                Geometry::Polygon(Polygon::new(line, vec![]))
            } else {
                Geometry::LineString(line)
            }
        })
        .collect();

    match collection.centroid() {
        Some(c) => Point::new(c.x(), c.y()),
        None => vertex_mean(rings),
    }
}

fn vertex_mean(rings: &[Ring]) -> Point {
    let (sum_x, sum_y, n) = rings
        .iter()
        .flat_map(|ring| ring.points())
        .fold((0.0, 0.0, 0usize), |(sx, sy, n), p| (sx + p.x, sy + p.y, n + 1));
    if n == 0 {
        return Point::new(0.0, 0.0);
    }
    Point::new(sum_x / n as f64, sum_y / n as f64)
}

/// Rotate every ring counter-clockwise by `angle_deg` around `origin`.
///
/// A zero angle returns an exact copy of the input.
pub fn rotate_rings(rings: &[Ring], angle_deg: f64, origin: Point) -> Vec<Ring> {
    if angle_deg == 0.0 {
        return rings.to_vec();
    }

    debug!(
        "Rotating {} rings by {:.3}° around ({:.3}, {:.3})",
        rings.len(),
        angle_deg,
        origin.x,
        origin.y
    );

    let rotation = Rotation2::new(angle_deg.to_radians());
    rings
        .iter()
        .map(|ring| {
            ring.map_points(|p| {
                let v = rotation * Vector2::new(p.x - origin.x, p.y - origin.y);
                Point::new(v.x + origin.x, v.y + origin.y)
            })
        })
        .collect()
}

/// Shift rings so the lower-left corner of their bounding box lands on (0, 0).
///
/// Returns the shifted rings and the applied offset.
pub fn translate_to_lower_left(rings: &[Ring]) -> (Vec<Ring>, Point) {
    let points: MultiPoint<f64> = rings
        .iter()
        .flat_map(|ring| ring.points())
        .map(|p| geo::Point::new(p.x, p.y))
        .collect();

    let Some(bounds) = points.bounding_rect() else {
        return (rings.to_vec(), Point::new(0.0, 0.0));
    };

    let offset = Point::new(-bounds.min().x, -bounds.min().y);
    let shifted = rings
        .iter()
        .map(|ring| ring.map_points(|p| Point::new(p.x + offset.x, p.y + offset.y)))
        .collect();
    (shifted, offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square() -> Ring {
        Ring::closed(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    #[test]
    fn test_zero_rotation_is_identity() {
        let rings = vec![square()];
        let rotated = rotate_rings(&rings, 0.0, Point::new(3.0, -7.0));
        assert_eq!(rotated, rings);
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        let ring = Ring::open(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]);
        let rotated = rotate_rings(&[ring], 90.0, Point::new(0.0, 0.0));
        let p = rotated[0].points()[1];
        assert_abs_diff_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_around_origin_keeps_origin_fixed() {
        let origin = Point::new(10.0, 0.0);
        let rotated = rotate_rings(&[square()], 37.0, origin);
        let p = rotated[0].points()[1];
        assert_abs_diff_eq!(p.x, 10.0, epsilon = 1e-12);
        assert_abs_diff_eq!(p.y, 0.0, epsilon = 1e-12);
        assert!(rotated[0].is_closed());
    }

    #[test]
    fn test_centroid_of_square() {
        let c = resolve_origin(&[square()], RotationOrigin::Centroid);
        assert_abs_diff_eq!(c.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn test_centroid_of_open_lines() {
        let rings = vec![
            Ring::open(vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0)]),
            Ring::open(vec![Point::new(0.0, 2.0), Point::new(4.0, 2.0)]),
        ];
        let c = resolve_origin(&rings, RotationOrigin::Centroid);
        assert_abs_diff_eq!(c.x, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_origin() {
        let origin = Point::new(-1.0, 4.0);
        assert_eq!(resolve_origin(&[square()], RotationOrigin::Point(origin)), origin);
    }

    #[test]
    fn test_empty_input_centroid() {
        assert_eq!(resolve_origin(&[], RotationOrigin::Centroid), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_translate_to_lower_left() {
        let ring = Ring::open(vec![Point::new(5.0, -3.0), Point::new(8.0, 2.0)]);
        let (shifted, offset) = translate_to_lower_left(&[ring]);
        assert_eq!(offset, Point::new(-5.0, 3.0));
        assert_eq!(shifted[0].points()[0], Point::new(0.0, 0.0));
        assert_eq!(shifted[0].points()[1], Point::new(3.0, 5.0));
    }
}
