//! Colorful Streets: street maps colored by name patterns.

pub mod classify;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod map;
pub mod observability;

pub use classify::{Color, Rule, StreetClassifier};
pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use map::{ColorfulStreetsMap, MapSurface};
