use super::{Feature, GeometrySource};
use crate::error::{Error, Result};
use crate::geometry::{Point, Ring};
use roxmltree::{Document, Node};
use std::path::{Path, PathBuf};
use tracing::debug;

/// KML reader. Placemarks are the features; folders and documents are the
/// groups a selector picks from.
#[derive(Debug, Clone)]
pub struct KmlSource {
    path: PathBuf,
}

impl KmlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse(&self, text: &str, selector: Option<&str>) -> Result<Vec<Feature>> {
        let doc = Document::parse(text).map_err(|e| Error::reader(&self.path, e))?;

        if !doc.root_element().has_tag_name("kml") {
            return Err(Error::format(&self.path, "root element is not <kml>"));
        }

        if let Some(layer) = selector {
            let found = doc
                .descendants()
                .any(|n| is_group(&n) && child_name(&n) == Some(layer));
            if !found {
                return Err(Error::LayerNotFound {
                    path: self.path.clone(),
                    layer: layer.to_string(),
                });
            }
        }

        let mut features = Vec::new();
        for placemark in doc.descendants().filter(|n| is_tag(n, "Placemark")) {
            if let Some(layer) = selector {
                let in_layer = placemark
                    .ancestors()
                    .any(|a| is_group(&a) && child_name(&a) == Some(layer));
                if !in_layer {
                    continue;
                }
            }

            features.push(Feature {
                name: child_name(&placemark).map(str::to_string),
                rings: self.placemark_rings(&placemark)?,
            });
        }

        Ok(features)
    }

    /// Line strings are open; linear rings (including polygon outer and
    /// inner boundaries) are closed. Multi-geometries are walked in order.
    fn placemark_rings(&self, placemark: &Node) -> Result<Vec<Ring>> {
        let mut rings = Vec::new();
        for node in placemark.descendants() {
            let closed = if is_tag(&node, "LinearRing") {
                true
            } else if is_tag(&node, "LineString") {
                false
            } else {
                continue;
            };

            let text = node
                .children()
                .find(|c| is_tag(c, "coordinates"))
                .and_then(|c| c.text())
                .unwrap_or("");
            let points = parse_coordinates(text)
                .map_err(|reason| Error::format(&self.path, reason))?;

            rings.push(if closed {
                Ring::closed(points)
            } else {
                Ring::open(points)
            });
        }
        Ok(rings)
    }
}

impl GeometrySource for KmlSource {
    fn path(&self) -> &Path {
        &self.path
    }

    fn read_features(&self, selector: Option<&str>) -> Result<Vec<Feature>> {
        let text = std::fs::read_to_string(&self.path)?;
        let features = self.parse(&text, selector)?;
        debug!(
            "Read {} placemarks from {} (layer: {})",
            features.len(),
            self.path.display(),
            selector.unwrap_or("<all>")
        );
        Ok(features)
    }
}

fn is_tag(node: &Node, tag: &str) -> bool {
    node.is_element() && node.tag_name().name() == tag
}

fn is_group(node: &Node) -> bool {
    is_tag(node, "Folder") || is_tag(node, "Document")
}

fn child_name<'a>(node: &Node<'a, '_>) -> Option<&'a str> {
    node.children()
        .find(|c| is_tag(c, "name"))
        .and_then(|c| c.text())
        .map(str::trim)
}

/// Parse a KML coordinate list: whitespace separated `lon,lat[,alt]` tuples
fn parse_coordinates(text: &str) -> std::result::Result<Vec<Point>, String> {
    text.split_whitespace()
        .map(|tuple| {
            let mut parts = tuple.split(',').map(str::parse::<f64>);
            match (parts.next(), parts.next()) {
                (Some(Ok(x)), Some(Ok(y))) => Ok(Point::new(x, y)),
                _ => Err(format!("invalid KML coordinate '{}'", tuple)),
            }
        })
        .collect()
}
