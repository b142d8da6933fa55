//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Start the config watcher
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener starts last (traffic only when ready)

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::classify::RuleError;
use crate::config::{load_config, validate_config, AppConfig, ConfigError, ConfigWatcher};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::observability::{logging, metrics};

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("rule error: {0}")]
    Rules(#[from] RuleError),

    #[error("failed to initialize logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to watch config file: {0}")]
    Watch(#[from] notify::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Command line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// TOML config file; defaults are used when absent.
    pub config_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub data_file: Option<String>,
    /// Reload the config file when it changes.
    pub watch: bool,
}

/// Load the config file (or defaults), apply overrides and validate.
pub fn resolve_config(options: &StartupOptions) -> Result<AppConfig, ConfigError> {
    let mut config = match &options.config_path {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    if let Some(bind_address) = &options.bind_address {
        config.server.bind_address = bind_address.clone();
    }
    if let Some(data_file) = &options.data_file {
        config.vectors.data_file = data_file.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Start every subsystem and serve until a stop signal arrives.
pub async fn run(options: StartupOptions) -> Result<(), StartupError> {
    let config = resolve_config(&options)?;

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "colorful-streets starting");
    tracing::info!(
        bind_address = %config.server.bind_address,
        data_file = %config.vectors.data_file,
        custom_rules = config.classifier.rules.len(),
        "Configuration loaded"
    );

    if !Path::new(&config.vectors.data_file).is_file() {
        tracing::warn!(data_file = %config.vectors.data_file, "Street data file not found, map will be empty");
    }

    if config.observability.metrics_enabled {
        // Validation guarantees the address parses.
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr)?;
        }
    }

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    // The watcher must outlive the server for reloads to keep arriving.
    let (_watcher, config_updates) = match (&options.config_path, options.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => (None, mpsc::unbounded_channel().1),
    };

    let bind_address = config.server.bind_address.clone();
    let server = HttpServer::new(config)?;
    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;

    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let config = resolve_config(&StartupOptions::default()).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind_address = \"127.0.0.1:9000\"\n[vectors]\ndata_file = \"a.osm\"").unwrap();

        let options = StartupOptions {
            config_path: Some(file.path().to_path_buf()),
            bind_address: Some("127.0.0.1:9100".into()),
            data_file: None,
            watch: false,
        };
        let config = resolve_config(&options).unwrap();
        assert_eq!(config.server.bind_address, "127.0.0.1:9100");
        assert_eq!(config.vectors.data_file, "a.osm");
    }

    #[test]
    fn test_invalid_override_rejected() {
        let options = StartupOptions {
            bind_address: Some("not an address".into()),
            ..Default::default()
        };
        assert!(matches!(resolve_config(&options), Err(ConfigError::Validation(_))));
    }
}
