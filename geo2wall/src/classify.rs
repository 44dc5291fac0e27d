use crate::geometry::{Orientation, Segment};

/// Angle between the segment and the x-axis, folded into [0°, 90°]
pub fn axis_angle_deg(segment: &Segment) -> f64 {
    let dx = (segment.p1.x - segment.p0.x).abs();
    let dy = (segment.p1.y - segment.p0.y).abs();
    dy.atan2(dx).to_degrees()
}

/// Tag a segment by its dominant axis.
///
/// Within `tolerance_deg` of the x-axis is horizontal, within `tolerance_deg`
/// of the y-axis is vertical, anything else stays unclassified. Endpoint order
/// does not matter.
pub fn classify(segment: &Segment, tolerance_deg: f64) -> Orientation {
    let angle = axis_angle_deg(segment);
    if angle <= tolerance_deg {
        Orientation::Horizontal
    } else if angle >= 90.0 - tolerance_deg {
        Orientation::Vertical
    } else {
        Orientation::Unclassified
    }
}

/// Tag every segment in place
pub fn classify_all(segments: &mut [Segment], tolerance_deg: f64) {
    for segment in segments.iter_mut() {
        segment.orientation = classify(segment, tolerance_deg);
    }
}
