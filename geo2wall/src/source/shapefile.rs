use super::{Feature, GeometrySource};
use crate::error::{Error, Result};
use crate::geometry::{Point, Ring};
use ::shapefile::{Shape, ShapeReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// ESRI shapefile reader. Only the `.shp` geometry is used; the attribute
/// table is not needed to extract walls.
#[derive(Debug, Clone)]
pub struct ShapefileSource {
    path: PathBuf,
}

impl ShapefileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

// Every polygon ring (outer or hole) becomes its own closed ring
macro_rules! polygon_rings {
    ($polygon:expr) => {
        $polygon
            .rings()
            .iter()
            .map(|ring| Ring::closed(ring.points().iter().map(|p| Point::new(p.x, p.y))))
            .collect::<Vec<_>>()
    };
}

// Every polyline part becomes its own open ring
macro_rules! polyline_rings {
    ($polyline:expr) => {
        $polyline
            .parts()
            .iter()
            .map(|part| Ring::open(part.iter().map(|p| Point::new(p.x, p.y))))
            .collect::<Vec<_>>()
    };
}

fn shape_rings(shape: &Shape) -> Option<Vec<Ring>> {
    match shape {
        Shape::Polygon(polygon) => Some(polygon_rings!(polygon)),
        Shape::PolygonM(polygon) => Some(polygon_rings!(polygon)),
        Shape::PolygonZ(polygon) => Some(polygon_rings!(polygon)),
        Shape::Polyline(polyline) => Some(polyline_rings!(polyline)),
        Shape::PolylineM(polyline) => Some(polyline_rings!(polyline)),
        Shape::PolylineZ(polyline) => Some(polyline_rings!(polyline)),
        // Points, multipoints, patches and null shapes carry no wall outline
        _ => None,
    }
}

impl GeometrySource for ShapefileSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_features(&self, selector: Option<&str>) -> Result<Vec<Feature>> {
        if let Some(layer) = selector {
            debug!("Shapefiles have no layers, ignoring selector '{}'", layer);
        }

        let reader = ShapeReader::from_path(&self.path).map_err(|e| Error::reader(&self.path, e))?;
        let shapes = reader.read().map_err(|e| Error::reader(&self.path, e))?;

        let total = shapes.len();
        let features: Vec<Feature> = shapes
            .iter()
            .filter_map(shape_rings)
            .map(|rings| Feature { name: None, rings })
            .collect();

        debug!(
            "Read {} shapes from {}, {} with boundaries",
            total,
            self.path.display(),
            features.len()
        );

        Ok(features)
    }
}
