//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the map server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::map::style::DEFAULT_STROKE_WIDTH;

/// Root configuration for the colorful streets map.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,

    /// Initial map view.
    pub map: MapConfig,

    /// OSM background tile layer.
    pub background: BackgroundConfig,

    /// Street vector layer.
    pub vectors: VectorConfig,

    /// Street name rules.
    pub classifier: ClassifierConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Map view configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// HTML element id the map renders into.
    pub target: String,

    /// Longitude of the view center (WGS 84).
    pub center_lon: f64,

    /// Latitude of the view center (WGS 84).
    pub center_lat: f64,

    /// Initial zoom level.
    pub zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Dresden
        Self {
            target: "map".to_string(),
            center_lon: 13.725,
            center_lat: 51.035,
            zoom: 12.0,
        }
    }
}

/// Background tile layer configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
    /// Show OSM tiles beneath the streets.
    pub enabled: bool,

    /// Tile opacity (0.0 - 1.0).
    pub opacity: f64,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 0.3,
        }
    }
}

/// Street vector layer configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct VectorConfig {
    /// Path to the OSM XML data file.
    pub data_file: String,

    /// Stroke width for named streets.
    pub stroke_width: f64,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            data_file: "Dresden-clipped-highways.osm".to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

/// Street classifier configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Color for names no rule matches.
    pub default_color: String,

    /// Rules in priority order. Empty selects the built-in rules.
    pub rules: Vec<RuleConfig>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_color: "#000000".to_string(),
            rules: Vec::new(),
        }
    }
}

/// A single name rule.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RuleConfig {
    /// Case-sensitive regular expression searched in the street name.
    pub pattern: String,

    /// Color as `#rrggbb`.
    pub color: String,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
