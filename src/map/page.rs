//! OpenLayers page surface.
//!
//! # Responsibilities
//! - Record view and layers as a serializable MapDocument
//! - Keep the style function of every vector layer
//! - Evaluate styles for the names the browser reports
//! - Render the HTML page that drives OpenLayers
//!
//! # Design Decisions
//! - The browser does tile loading, projection and OSM XML parsing
//! - Styles are evaluated server-side in one batch per layer load

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::map::style::{Stroke, StyleFn};
use crate::map::surface::{LayerId, LonLat, MapSurface, VectorSource};

const PAGE_TEMPLATE: &str = include_str!("page.html");

/// The map view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    pub center: LonLat,
    pub zoom: f64,
}

/// Tile providers for raster layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RasterSource {
    Osm,
}

/// How OpenLayers draws a vector layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Render to an image; faster than per-frame vector drawing.
    Image,
    Vector,
}

/// One layer of the map, bottom first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayerSpec {
    Raster {
        id: LayerId,
        source: RasterSource,
        opacity: f64,
    },
    Vector {
        id: LayerId,
        source: VectorSource,
        render_mode: RenderMode,
    },
}

impl LayerSpec {
    pub fn id(&self) -> LayerId {
        match self {
            LayerSpec::Raster { id, .. } | LayerSpec::Vector { id, .. } => *id,
        }
    }
}

/// Everything the browser needs to build the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    /// HTML element id the map renders into.
    pub target: String,
    pub view: ViewSpec,
    pub layers: Vec<LayerSpec>,
}

/// A MapSurface that produces an OpenLayers web page.
pub struct OpenLayersPage {
    document: MapDocument,
    styles: HashMap<LayerId, StyleFn>,
}

impl OpenLayersPage {
    /// Create an empty page rendering into element `target`.
    /// The view stays at `initial_view` until `create_view` is called.
    pub fn new(target: impl Into<String>, initial_view: ViewSpec) -> Self {
        Self {
            document: MapDocument {
                target: target.into(),
                view: initial_view,
                layers: Vec::new(),
            },
            styles: HashMap::new(),
        }
    }

    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    /// Strokes for `names` on vector layer `layer`; `None` for unknown
    /// or raster layers. Hidden styles map to `None` entries.
    pub fn styles_for<'a, I>(&self, layer: LayerId, names: I) -> Option<BTreeMap<String, Option<Stroke>>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let style = self.styles.get(&layer)?;
        Some(
            names
                .into_iter()
                .map(|name| (name.to_string(), style(Some(name)).stroke))
                .collect(),
        )
    }

    /// Render the HTML page with the map document embedded.
    pub fn render_html(&self) -> String {
        // serde_json output is valid JSON; only "</" can end the script element early.
        let document = serde_json::to_string(&self.document)
            .unwrap_or_else(|_| "null".to_string())
            .replace("</", "<\\/");

        PAGE_TEMPLATE
            .replace("__TARGET__", &escape_html(&self.document.target))
            .replace("__MAP_DOCUMENT__", &document)
    }

    fn next_layer_id(&self) -> LayerId {
        LayerId(self.document.layers.len())
    }
}

impl MapSurface for OpenLayersPage {
    fn create_view(&mut self, center: LonLat, zoom: f64) {
        self.document.view = ViewSpec { center, zoom };
    }

    fn add_raster_layer(&mut self, opacity: f64) -> LayerId {
        let id = self.next_layer_id();
        self.document.layers.push(LayerSpec::Raster {
            id,
            source: RasterSource::Osm,
            opacity,
        });
        id
    }

    fn add_vector_layer(&mut self, source: VectorSource, style: StyleFn) -> LayerId {
        let id = self.next_layer_id();
        self.document.layers.push(LayerSpec::Vector {
            id,
            source,
            render_mode: RenderMode::Image,
        });
        self.styles.insert(id, style);
        id
    }
}

impl fmt::Debug for OpenLayersPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenLayersPage")
            .field("document", &self.document)
            .field("styled_layers", &self.styles.len())
            .finish()
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
