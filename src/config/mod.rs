//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, rule compilation)
//!     → AppConfig (validated, immutable)
//!     → turned into MapState by the HTTP server
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server builds a new MapState
//!     → atomic swap of Arc<MapState>
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AppConfig, BackgroundConfig, ClassifierConfig, LogFormat, MapConfig, ObservabilityConfig,
    RuleConfig, ServerConfig, VectorConfig,
};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
