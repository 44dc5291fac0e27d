use crate::aggregate::{aggregate_walls, WallSet};
use crate::classify::classify_all;
use crate::config::{ExtractionConfig, ExtractionMode};
use crate::error::Result;
use crate::geometry::{Orientation, Point, Ring, Segment};
use crate::segments::{centerline_segment, extract_segments};
use crate::source::{discard_degenerate, open_source};
use crate::transform::{resolve_origin, rotate_rings, translate_to_lower_left};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Counts collected while extracting walls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub features: usize,
    pub skipped_features: usize,
    pub rings: usize,
    pub segments: usize,
    pub unclassified_segments: usize,
}

/// Walls plus the placement applied to reach their coordinate frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub walls: WallSet,
    /// Point the rotation was applied around
    pub rotation_origin: Point,
    /// Offset added after rotation; zero unless `translate_to_origin` is set
    pub translation: Point,
    pub stats: ExtractionStats,
}

/// Read a shapefile, KML or DXF file and extract its walls.
///
/// `layer_selector` names the KML folder (or DXF layer) holding the walls and
/// is ignored for shapefiles. Geometry is rotated counter-clockwise by
/// `rotation_angle_deg` around its centroid; default tolerances apply.
pub fn get_walls_from_geometry_file(
    path: impl AsRef<Path>,
    layer_selector: Option<&str>,
    rotation_angle_deg: f64,
) -> Result<WallSet> {
    let mut config = ExtractionConfig::default().with_rotation(rotation_angle_deg);
    config.layer = layer_selector.map(str::to_string);
    Ok(extract_walls(path, &config)?.walls)
}

/// Full extraction pipeline for one geometry file
pub fn extract_walls(path: impl AsRef<Path>, config: &ExtractionConfig) -> Result<ExtractionReport> {
    config.validate()?;
    let path = path.as_ref();

    let source = open_source(path, config)?;
    let features = source.read_features(config.layer.as_deref())?;
    let total = features.len();
    let (features, skipped) = discard_degenerate(features);

    let rings: Vec<Ring> = features.into_iter().flat_map(|f| f.rings).collect();
    let mut report = walls_from_rings(&rings, config)?;
    report.stats.features = total;
    report.stats.skipped_features = skipped;

    info!(
        "Extracted {} horizontal and {} vertical walls from {} ({} features, {} skipped)",
        report.walls.walls_h.len(),
        report.walls.walls_v.len(),
        path.display(),
        total,
        skipped
    );

    Ok(report)
}

/// Rotate, segment, classify and aggregate rings already in memory
pub fn walls_from_rings(rings: &[Ring], config: &ExtractionConfig) -> Result<ExtractionReport> {
    config.validate()?;

    let rotation_origin = resolve_origin(rings, config.rotation_origin);
    let rotated = rotate_rings(rings, config.rotation_angle_deg, rotation_origin);
    let (placed, translation) = if config.translate_to_origin {
        translate_to_lower_left(&rotated)
    } else {
        (rotated, Point::new(0.0, 0.0))
    };

    let segments = collect_segments(&placed, config);
    let unclassified_segments = segments
        .iter()
        .filter(|s| s.orientation == Orientation::Unclassified)
        .count();

    debug!(
        "{} rings gave {} segments ({} unclassified)",
        placed.len(),
        segments.len(),
        unclassified_segments
    );

    let walls = aggregate_walls(&segments, config.offset_tolerance, config.gap_tolerance);

    Ok(ExtractionReport {
        walls,
        rotation_origin,
        translation,
        stats: ExtractionStats {
            features: 0,
            skipped_features: 0,
            rings: placed.len(),
            segments: segments.len(),
            unclassified_segments,
        },
    })
}

fn collect_segments(rings: &[Ring], config: &ExtractionConfig) -> Vec<Segment> {
    let mut segments = Vec::new();
    for ring in rings {
        if config.mode == ExtractionMode::Centerline && ring.is_closed() {
            segments.extend(centerline_segment(ring));
            continue;
        }
        let mut edges = extract_segments(ring);
        classify_all(&mut edges, config.angular_tolerance_deg);
        segments.extend(edges);
    }
    segments
}
