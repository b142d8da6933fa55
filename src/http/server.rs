//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Bind server to listener
//! - Swap in a new MapState when the configuration changes
//! - Stop on the shutdown signal

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::Request,
    http::Request as HttpRequest,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::classify::{RuleError, StreetClassifier};
use crate::config::AppConfig;
use crate::http::handlers;
use crate::http::request::{request_id, MakeRequestUuid};
use crate::map::builder::{ColorfulStreetsMap, ConfiguredLayers, DATA_ROUTE};
use crate::map::OpenLayersPage;
use crate::observability::metrics;

/// Everything derived from one configuration generation.
#[derive(Debug)]
pub struct MapState {
    pub config: AppConfig,
    pub classifier: Arc<StreetClassifier>,
    pub page: OpenLayersPage,
    pub layers: ConfiguredLayers,
}

impl MapState {
    /// Compile the classifier and build the map page for `config`.
    pub fn from_config(config: AppConfig) -> Result<Self, RuleError> {
        let classifier = Arc::new(StreetClassifier::from_config(&config.classifier)?);
        let (page, layers) = ColorfulStreetsMap::page(&config, classifier.clone());

        Ok(Self {
            config,
            classifier,
            page,
            layers,
        })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<MapState>>,
}

impl AppState {
    pub fn new(map_state: MapState) -> Self {
        metrics::record_rules_loaded(map_state.classifier.rules().len());
        Self {
            inner: Arc::new(ArcSwap::from_pointee(map_state)),
        }
    }

    /// Replace the current MapState. On error the current one is kept.
    pub fn reload(&self, config: AppConfig) -> Result<(), RuleError> {
        let current = self.inner.load();
        if current.config.server.bind_address != config.server.bind_address {
            tracing::warn!(
                current = %current.config.server.bind_address,
                requested = %config.server.bind_address,
                "Bind address changes require a restart, keeping current listener"
            );
        }

        let map_state = MapState::from_config(config)?;
        let rules = map_state.classifier.rules().len();
        self.inner.store(Arc::new(map_state));

        metrics::record_rules_loaded(rules);
        tracing::info!(rules, "Configuration reloaded");
        Ok(())
    }
}

/// HTTP server for the street map.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, RuleError> {
        let request_timeout = Duration::from_secs(config.server.request_timeout_secs);
        let state = AppState::new(MapState::from_config(config)?);
        let router = Self::build_router(state.clone(), request_timeout);

        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState, request_timeout: Duration) -> Router {
        Router::new()
            .route("/", get(handlers::index))
            .route("/api/map", get(handlers::get_map))
            .route("/api/classify", get(handlers::classify))
            .route("/api/layers/{id}/styles", post(handlers::layer_styles))
            .route("/api/legend", get(handlers::get_legend))
            .route("/api/status", get(handlers::get_status))
            .route(&format!("{}/{{file}}", DATA_ROUTE), get(handlers::data_file))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &HttpRequest<Body>| {
                        tracing::info_span!(
                            "http_request",
                            method = %request.method(),
                            path = %request.uri().path(),
                            request_id = %request_id(request),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(request_timeout))
                    .layer(middleware::from_fn(track_metrics)),
            )
    }

    /// The router, for driving the server without a listener.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires. Each config received on `config_updates` replaces
    /// the current map state.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let reload_state = self.state.clone();
        let mut reload_shutdown = shutdown.resubscribe();
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    update = config_updates.recv() => match update {
                        Some(config) => {
                            if let Err(e) = reload_state.reload(config) {
                                tracing::error!(error = %e, "Failed to apply config, keeping current configuration");
                            }
                        }
                        None => break,
                    },
                    _ = reload_shutdown.recv() => break,
                }
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn track_metrics(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();

    let response = next.run(request).await;

    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
