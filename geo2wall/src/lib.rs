//! Extract axis-aligned wall segments from floor-plan geometry files.
//!
//! Shapefile, KML and DXF input is read into rings, rotated into the
//! building's frame, cut into edges, classified as horizontal or vertical and
//! merged into walls:
//!
//! ```no_run
//! let walls = geo2wall::get_walls_from_geometry_file("plans/1og.kml", Some("Waende"), -12.5)?;
//! for [x1, y1, x2, y2] in walls.to_segments().0 {
//!     println!("horizontal wall ({x1}, {y1}) -> ({x2}, {y2})");
//! }
//! # Ok::<(), geo2wall::Error>(())
//! ```

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod segments;
pub mod source;
pub mod transform;

pub use aggregate::{aggregate_walls, Wall, WallSet};
pub use classify::classify;
pub use config::{ExtractionConfig, ExtractionMode, RotationOrigin, DEFAULT_KML_FOLDER};
pub use error::{Error, Result};
pub use geometry::{Orientation, Point, Ring, Segment};
pub use pipeline::{
    extract_walls, get_walls_from_geometry_file, walls_from_rings, ExtractionReport,
    ExtractionStats,
};
pub use segments::extract_segments;
pub use source::{open_source, Feature, GeometrySource, SourceFormat};
pub use transform::rotate_rings;
