use super::{Feature, GeometrySource};
use crate::error::{Error, Result};
use crate::geometry::{Point, Ring};
use ::dxf::entities::EntityType;
use ::dxf::Drawing;
use std::path::{Path, PathBuf};
use tracing::debug;

// LWPOLYLINE flag bit for a closed outline
const LWPOLYLINE_CLOSED: i32 = 1;

/// DXF drawing reader. `LINE` and `LWPOLYLINE` entities in model space are
/// the features; entity layers are the groups a selector picks from.
#[derive(Debug, Clone)]
pub struct DxfSource {
    path: PathBuf,
    scale: f64,
}

impl DxfSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scale: 1.0,
        }
    }

    /// Multiply every coordinate by `scale`, e.g. 0.001 for millimetre drawings
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    fn features(&self, drawing: &Drawing, selector: Option<&str>) -> Result<Vec<Feature>> {
        let scale = self.scale;
        let mut layer_seen = selector.is_none();
        let mut features = Vec::new();

        for entity in drawing.entities() {
            let layer = entity.common.layer.as_str();
            if let Some(wanted) = selector {
                if layer != wanted {
                    continue;
                }
                layer_seen = true;
            }

            let ring = match &entity.specific {
                EntityType::Line(line) => Ring::open([
                    Point::new(line.p1.x * scale, line.p1.y * scale),
                    Point::new(line.p2.x * scale, line.p2.y * scale),
                ]),
                EntityType::LwPolyline(polyline) => {
                    let points = polyline
                        .vertices
                        .iter()
                        .map(|v| Point::new(v.x * scale, v.y * scale));
                    if polyline.flags & LWPOLYLINE_CLOSED != 0 {
                        Ring::closed(points)
                    } else {
                        Ring::open(points)
                    }
                }
                _ => continue,
            };

            features.push(Feature {
                name: Some(layer.to_string()),
                rings: vec![ring],
            });
        }

        if !layer_seen {
            return Err(Error::LayerNotFound {
                path: self.path.clone(),
                layer: selector.unwrap_or_default().to_string(),
            });
        }

        Ok(features)
    }
}

impl GeometrySource for DxfSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_features(&self, selector: Option<&str>) -> Result<Vec<Feature>> {
        let drawing = Drawing::load_file(&self.path).map_err(|e| Error::reader(&self.path, e))?;
        let features = self.features(&drawing, selector)?;
        debug!(
            "Read {} line entities from {} (scale {})",
            features.len(),
            self.path.display(),
            self.scale
        );
        Ok(features)
    }
}
