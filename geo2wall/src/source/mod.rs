//! Geometry file readers.
//!
//! Each supported format implements [`GeometrySource`]; [`open_source`] picks
//! one by file extension, falling back to sniffing the first bytes.

mod dxf;
mod kml;
mod shapefile;

pub use self::dxf::DxfSource;
pub use self::kml::KmlSource;
pub use self::shapefile::ShapefileSource;

use crate::config::ExtractionConfig;
use crate::error::{Error, Result};
use crate::geometry::Ring;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Shapefile header magic, big-endian at offset 0
const SHAPEFILE_MAGIC: [u8; 4] = 9994i32.to_be_bytes();
const SNIFF_LEN: usize = 1024;

/// One feature of a geometry file and the boundaries it carries
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub name: Option<String>,
    pub rings: Vec<Ring>,
}

impl Feature {
    pub fn label(&self, index: usize) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("#{}", index),
        }
    }
}

/// A readable geometry file
pub trait GeometrySource {
    fn path(&self) -> &Path;

    /// Read every feature, optionally restricted to a named group
    /// (KML folder, DXF layer). Formats without groups ignore the selector.
    fn read_features(&self, selector: Option<&str>) -> Result<Vec<Feature>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Shapefile,
    Kml,
    Dxf,
}

impl SourceFormat {
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "shp" => Some(SourceFormat::Shapefile),
            "kml" => Some(SourceFormat::Kml),
            "dxf" => Some(SourceFormat::Dxf),
            _ => None,
        }
    }

    /// Guess the format from the leading bytes of a file
    pub fn sniff(head: &[u8]) -> Option<Self> {
        if head.starts_with(&SHAPEFILE_MAGIC) {
            return Some(SourceFormat::Shapefile);
        }
        let text = String::from_utf8_lossy(head);
        if text.contains("<kml") {
            return Some(SourceFormat::Kml);
        }
        let mut lines = text.lines().map(str::trim);
        if lines.next() == Some("0") && lines.next() == Some("SECTION") {
            return Some(SourceFormat::Dxf);
        }
        None
    }
}

/// Determine the format of a geometry file
pub fn detect_format(path: impl AsRef<Path>) -> Result<SourceFormat> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    if let Some(format) = SourceFormat::from_extension(path) {
        return Ok(format);
    }

    let mut head = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?.take(SNIFF_LEN as u64).read_to_end(&mut head)?;
    SourceFormat::sniff(&head)
        .ok_or_else(|| Error::format(path, "unrecognized file type (expected .shp, .kml or .dxf)"))
}

/// Open a geometry file with the reader matching its format
pub fn open_source(
    path: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<Box<dyn GeometrySource>> {
    let format = detect_format(&path)?;
    let path: PathBuf = path.as_ref().to_path_buf();
    debug!("Opening {} as {:?}", path.display(), format);

    Ok(match format {
        SourceFormat::Shapefile => Box::new(ShapefileSource::new(path)),
        SourceFormat::Kml => Box::new(KmlSource::new(path)),
        SourceFormat::Dxf => {
            let source = DxfSource::new(path);
            Box::new(match config.dxf_scale {
                Some(scale) => source.with_scale(scale),
                None => source,
            })
        }
    })
}

/// Drop degenerate rings and features left without rings.
///
/// Returns the surviving features and the number of features skipped.
pub(crate) fn discard_degenerate(features: Vec<Feature>) -> (Vec<Feature>, usize) {
    let mut kept = Vec::with_capacity(features.len());
    let mut skipped = 0;

    for (index, mut feature) in features.into_iter().enumerate() {
        let label = feature.label(index);
        feature.rings.retain(|ring| {
            if ring.is_degenerate() {
                let err = Error::DegenerateGeometry {
                    feature: label.clone(),
                    points: ring.distinct_points(),
                };
                warn!("Skipping ring: {}", err);
                false
            } else {
                true
            }
        });

        if feature.rings.is_empty() {
            warn!("Skipping feature {} with no usable boundary", label);
            skipped += 1;
        } else {
            kept.push(feature);
        }
    }

    (kept, skipped)
}
