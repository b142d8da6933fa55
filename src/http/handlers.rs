//! Request handlers.

use std::collections::BTreeMap;
use std::path::PathBuf;

use axum::{
    body::Body,
    extract::{Path, Query, Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::classify::Color;
use crate::http::server::AppState;
use crate::map::{LayerId, MapDocument, Stroke};
use crate::observability::metrics;

/// Errors surfaced to API clients as JSON.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing query parameter: name")]
    MissingName,

    #[error("no vector layer with id {0}")]
    UnknownLayer(usize),

    #[error("no such data file: {0}")]
    UnknownDataFile(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingName => StatusCode::BAD_REQUEST,
            ApiError::UnknownLayer(_) | ApiError::UnknownDataFile(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ClassifyParams {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Classification {
    pub name: String,
    pub color: Color,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StylesRequest {
    pub names: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StylesResponse {
    pub styles: BTreeMap<String, Option<Stroke>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LegendEntry {
    pub priority: usize,
    pub pattern: String,
    pub color: Color,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Legend {
    pub rules: Vec<LegendEntry>,
    pub default_color: Color,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SystemStatus {
    pub version: String,
    pub status: String,
    pub rules: usize,
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.inner.load().page.render_html())
}

pub async fn get_map(State(state): State<AppState>) -> Json<MapDocument> {
    Json(state.inner.load().page.document().clone())
}

pub async fn classify(
    State(state): State<AppState>,
    Query(params): Query<ClassifyParams>,
) -> Result<Json<Classification>, ApiError> {
    let name = params.name.ok_or(ApiError::MissingName)?;
    let color = state.inner.load().classifier.classify(&name);

    metrics::record_classification(color);
    tracing::debug!(name = %name, color = %color, "Classified street name");

    Ok(Json(Classification { name, color }))
}

pub async fn layer_styles(
    State(state): State<AppState>,
    Path(id): Path<usize>,
    Json(request): Json<StylesRequest>,
) -> Result<Json<StylesResponse>, ApiError> {
    let inner = state.inner.load();
    let styles = inner
        .page
        .styles_for(LayerId(id), request.names.iter().map(String::as_str))
        .ok_or(ApiError::UnknownLayer(id))?;

    for stroke in styles.values().flatten() {
        metrics::record_classification(stroke.color);
    }
    tracing::debug!(layer = id, names = styles.len(), "Styled layer features");

    Ok(Json(StylesResponse { styles }))
}

pub async fn get_legend(State(state): State<AppState>) -> Json<Legend> {
    let inner = state.inner.load();
    let rules = inner
        .classifier
        .rules()
        .iter()
        .enumerate()
        .map(|(i, rule)| LegendEntry {
            priority: i + 1,
            pattern: rule.pattern().to_string(),
            color: rule.color(),
        })
        .collect();

    Json(Legend {
        rules,
        default_color: inner.classifier.default_color(),
    })
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        rules: state.inner.load().classifier.rules().len(),
    })
}

/// Serve the configured OSM data file. Any other file name is a 404.
pub async fn data_file(
    State(state): State<AppState>,
    Path(file): Path<String>,
    request: Request,
) -> Response {
    let path = PathBuf::from(&state.inner.load().config.vectors.data_file);
    let served_name = path.file_name().and_then(|n| n.to_str());

    if served_name != Some(file.as_str()) {
        tracing::warn!(file = %file, "Unknown data file requested");
        return ApiError::UnknownDataFile(file).into_response();
    }

    match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response.map(Body::new).into_response(),
        Err(never) => match never {},
    }
}
