//! Street map assembly.
//!
//! # Responsibilities
//! - Center the view on the configured location
//! - Add the OSM background when enabled
//! - Add the street layer styled by the classifier

use std::sync::Arc;

use crate::classify::StreetClassifier;
use crate::config::AppConfig;
use crate::map::page::{OpenLayersPage, ViewSpec};
use crate::map::style::street_style;
use crate::map::surface::{LayerId, LonLat, MapSurface, VectorSource};

/// URL prefix the street data file is served under.
pub const DATA_ROUTE: &str = "/data";

/// Geographical map with streets colored by their name patterns.
pub struct ColorfulStreetsMap;

/// Layers added by [`ColorfulStreetsMap::configure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfiguredLayers {
    pub background: Option<LayerId>,
    pub streets: LayerId,
}

impl ColorfulStreetsMap {
    /// Configure `surface` from `config`, styling streets with `classifier`.
    pub fn configure<S: MapSurface + ?Sized>(
        surface: &mut S,
        config: &AppConfig,
        classifier: Arc<StreetClassifier>,
    ) -> ConfiguredLayers {
        let map = &config.map;
        surface.create_view(LonLat::new(map.center_lon, map.center_lat), map.zoom);

        let background = if config.background.enabled {
            Some(surface.add_raster_layer(config.background.opacity))
        } else {
            None
        };

        let streets = surface.add_vector_layer(
            VectorSource::osm_xml(data_url(&config.vectors.data_file)),
            street_style(classifier, config.vectors.stroke_width),
        );

        tracing::debug!(
            center_lon = map.center_lon,
            center_lat = map.center_lat,
            zoom = map.zoom,
            background = background.is_some(),
            data_file = %config.vectors.data_file,
            "Map configured"
        );

        ConfiguredLayers { background, streets }
    }

    /// Build an OpenLayers page for `config`.
    pub fn page(config: &AppConfig, classifier: Arc<StreetClassifier>) -> (OpenLayersPage, ConfiguredLayers) {
        let view = ViewSpec {
            center: LonLat::new(config.map.center_lon, config.map.center_lat),
            zoom: config.map.zoom,
        };
        let mut page = OpenLayersPage::new(config.map.target.clone(), view);
        let layers = Self::configure(&mut page, config, classifier);
        (page, layers)
    }
}

/// URL of the data file, as served by the HTTP server.
pub fn data_url(data_file: &str) -> String {
    let file_name = std::path::Path::new(data_file)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(data_file);
    format!("{}/{}", DATA_ROUTE, file_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::style::{Style, StyleFn};

    /// Surface that records every call.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
        style: Option<StyleFn>,
    }

    impl MapSurface for RecordingSurface {
        fn create_view(&mut self, center: LonLat, zoom: f64) {
            self.calls.push(format!("view {} {} {}", center.lon, center.lat, zoom));
        }

        fn add_raster_layer(&mut self, opacity: f64) -> LayerId {
            self.calls.push(format!("raster {}", opacity));
            LayerId(self.calls.len())
        }

        fn add_vector_layer(&mut self, source: VectorSource, style: StyleFn) -> LayerId {
            self.calls.push(format!("vector {}", source.url));
            self.style = Some(style);
            LayerId(self.calls.len())
        }
    }

    #[test]
    fn test_configure_order() {
        let mut surface = RecordingSurface::default();
        let layers = ColorfulStreetsMap::configure(
            &mut surface,
            &AppConfig::default(),
            Arc::new(StreetClassifier::default()),
        );

        assert_eq!(
            surface.calls,
            vec![
                "view 13.725 51.035 12",
                "raster 0.3",
                "vector /data/Dresden-clipped-highways.osm",
            ]
        );
        assert_eq!(layers.background, Some(LayerId(2)));
        assert_eq!(layers.streets, LayerId(3));

        let style = surface.style.unwrap();
        assert_eq!(style(None), Style::hidden());
        assert_eq!(
            style(Some("Bautzner Straße")),
            Style::stroke("#84a883".parse().unwrap(), 4.0)
        );
    }

    #[test]
    fn test_background_disabled() {
        let mut config = AppConfig::default();
        config.background.enabled = false;

        let mut surface = RecordingSurface::default();
        let layers = ColorfulStreetsMap::configure(&mut surface, &config, Arc::new(StreetClassifier::default()));

        assert_eq!(surface.calls.len(), 2);
        assert!(surface.calls[1].starts_with("vector"));
        assert_eq!(layers.background, None);
    }

    #[test]
    fn test_page_uses_configured_target() {
        let mut config = AppConfig::default();
        config.map.target = "streets".into();

        let (page, layers) = ColorfulStreetsMap::page(&config, Arc::new(StreetClassifier::default()));
        assert_eq!(page.document().target, "streets");
        assert_eq!(page.document().layers.len(), 2);
        assert!(page.styles_for(layers.streets, ["Südring"]).is_some());
    }

    #[test]
    fn test_data_url_uses_file_name() {
        assert_eq!(data_url("Dresden.osm"), "/data/Dresden.osm");
        assert_eq!(data_url("/srv/osm/Dresden.osm"), "/data/Dresden.osm");
    }
}
