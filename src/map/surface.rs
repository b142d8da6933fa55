//! Map capability interface.
//!
//! The three operations the street map needs from a mapping library.

use serde::{Deserialize, Serialize};

use crate::map::style::StyleFn;

/// A WGS 84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Identifier of a layer within one surface, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(pub usize);

/// File formats a vector source can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorFormat {
    OsmXml,
}

/// Where a vector layer gets its features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorSource {
    /// URL the rendering library fetches the data from.
    pub url: String,
    pub format: VectorFormat,
}

impl VectorSource {
    pub fn osm_xml(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: VectorFormat::OsmXml,
        }
    }
}

/// Trait for map rendering backends.
pub trait MapSurface {
    /// Center the view on `center` at `zoom`.
    fn create_view(&mut self, center: LonLat, zoom: f64);

    /// Add a background tile layer.
    fn add_raster_layer(&mut self, opacity: f64) -> LayerId;

    /// Add a vector layer styled per feature by `style`.
    fn add_vector_layer(&mut self, source: VectorSource, style: StyleFn) -> LayerId;
}
