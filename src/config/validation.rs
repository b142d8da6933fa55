//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (zoom, opacity, coordinates, stroke width)
//! - Compile classifier rules and colors before they are accepted
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::classify::{Color, Rule};
use crate::config::schema::AppConfig;

/// Highest zoom level OpenLayers views accept by default.
pub const MAX_ZOOM: f64 = 28.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("server.bind_address {0:?} is not a socket address")]
    BindAddress(String),

    #[error("server.request_timeout_secs must be greater than 0")]
    RequestTimeout,

    #[error("map.target {0:?} must be a non-empty element id of letters, digits, '-' or '_'")]
    Target(String),

    #[error("map.center_lon {0} is outside -180..=180")]
    Longitude(f64),

    #[error("map.center_lat {0} is outside the Web Mercator range")]
    Latitude(f64),

    #[error("map.zoom {0} is outside 0..={max}", max = MAX_ZOOM)]
    Zoom(f64),

    #[error("background.opacity {0} is outside 0..=1")]
    Opacity(f64),

    #[error("vectors.data_file must not be empty")]
    EmptyDataFile,

    #[error("vectors.stroke_width {0} must be greater than 0")]
    StrokeWidth(f64),

    #[error("classifier.default_color: {0}")]
    DefaultColor(String),

    #[error("classifier.rules[{index}]: {message}")]
    Rule { index: usize, message: String },

    #[error("observability.metrics_address {0:?} is not a socket address")]
    MetricsAddress(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.server.bind_address.clone()));
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }

    let map = &config.map;
    if !is_element_id(&map.target) {
        errors.push(ValidationError::Target(map.target.clone()));
    }
    if !(-180.0..=180.0).contains(&map.center_lon) {
        errors.push(ValidationError::Longitude(map.center_lon));
    }
    if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&map.center_lat) {
        errors.push(ValidationError::Latitude(map.center_lat));
    }
    if !(0.0..=MAX_ZOOM).contains(&map.zoom) {
        errors.push(ValidationError::Zoom(map.zoom));
    }

    if !(0.0..=1.0).contains(&config.background.opacity) {
        errors.push(ValidationError::Opacity(config.background.opacity));
    }

    if config.vectors.data_file.trim().is_empty() {
        errors.push(ValidationError::EmptyDataFile);
    }
    let width = config.vectors.stroke_width;
    if width.is_nan() || width <= 0.0 {
        errors.push(ValidationError::StrokeWidth(config.vectors.stroke_width));
    }

    if let Err(e) = config.classifier.default_color.parse::<Color>() {
        errors.push(ValidationError::DefaultColor(e.to_string()));
    }
    for (index, rule) in config.classifier.rules.iter().enumerate() {
        if let Err(e) = Rule::new(&rule.pattern, &rule.color) {
            errors.push(ValidationError::Rule {
                index,
                message: e.to_string(),
            });
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::MetricsAddress(observability.metrics_address.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_element_id(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
