//! Gateway-style scrape endpoint.
//!
//! The response envelope stays compatible with the Lambda deployment this
//! service replaces: callers get `{statusCode, body, count}` where `body` is itself a
//! JSON-encoded string. Only three shapes exist — 200 with the record
//! array, 400 for request problems, 500 with an error string. There is no
//! partial-success shape.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use seatscan_browser::{scrape_event, BrowserLaunchConfig};
use seatscan_core::{AppConfig, ListingRecord};
use seatscan_scraper::{vendors, ArtifactSink, SessionOptions};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sink: Option<Arc<seatscan_artifact::S3ArtifactStore>>,
}

/// The request shape: `eventUrl` as a query parameter (gateway style) or a
/// JSON body field, with an optional explicit vendor override.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeParams {
    pub event_url: Option<String>,
    pub vendor: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeEnvelope {
    pub status_code: u16,
    /// JSON-encoded payload: the record array on success, `{"error": ...}`
    /// otherwise.
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ScrapeEnvelope {
    fn success(records: &[ListingRecord]) -> Self {
        Self {
            status_code: 200,
            body: serde_json::to_string(records).unwrap_or_else(|_| "[]".to_owned()),
            count: Some(records.len()),
        }
    }

    fn failure(status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            body: serde_json::json!({ "error": message }).to_string(),
            count: None,
        }
    }
}

impl IntoResponse for ScrapeEnvelope {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    timestamp: DateTime<Utc>,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health))
        .route("/scrape", get(scrape_get).post(scrape_post))
        .layer(TraceLayer::new_for_http())
        .layer(build_cors())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData {
        status: "ok",
        timestamp: Utc::now(),
    })
}

async fn scrape_get(
    State(state): State<AppState>,
    Query(params): Query<ScrapeParams>,
) -> ScrapeEnvelope {
    run_scrape(&state, params).await
}

async fn scrape_post(
    State(state): State<AppState>,
    Json(params): Json<ScrapeParams>,
) -> ScrapeEnvelope {
    run_scrape(&state, params).await
}

async fn run_scrape(state: &AppState, params: ScrapeParams) -> ScrapeEnvelope {
    let Some(event_url) = params
        .event_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
    else {
        return ScrapeEnvelope::failure(400, "eventUrl is required");
    };

    let adapter = match params.vendor.as_deref() {
        Some(name) => vendors::by_name(name),
        None => vendors::for_event_url(event_url),
    };
    let Some(adapter) = adapter else {
        return ScrapeEnvelope::failure(400, "no vendor adapter matches the given event URL");
    };

    let launch = BrowserLaunchConfig::from_app_config(&state.config, adapter.stealth);
    let options = SessionOptions {
        artifact_sink: state
            .sink
            .as_deref()
            .map(|sink| sink as &dyn ArtifactSink),
        screenshot_dir: state.config.screenshot_dir.clone(),
    };

    match scrape_event(&launch, adapter, event_url, &options).await {
        Ok(records) => ScrapeEnvelope::success(&records),
        Err(error) => {
            tracing::error!(vendor = adapter.name, error = %error, "scrape request failed");
            ScrapeEnvelope::failure(500, &error.to_string())
        }
    }
}
