// Axum API Server Module
//
// Purpose: REST surface over the recommendation pipeline
// Endpoints: /, /health, /predict, /api/predict

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use moka::future::Cache;

use crate::config::AppConfig;
use crate::error::ValidationError;
use crate::features::{FeatureVector, ModelChoice};
use crate::model::Mode;
use crate::recommender::Recommender;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub recommender: Arc<Recommender>,
    pub cache: Cache<String, Value>,
}

impl AppState {
    /// Decide the process mode (loads artifacts off the async runtime)
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        tracing::info!("Loading trained artifacts...");
        let search = config.search.clone();
        let mode = tokio::task::spawn_blocking(move || Mode::from_startup(&search))
            .await
            .context("Artifact loading task failed")?;

        Ok(Self::from_mode(mode, config))
    }

    pub fn from_mode(mode: Mode, config: &AppConfig) -> Self {
        tracing::info!("Initializing Moka cache...");
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            recommender: Arc::new(Recommender::new(mode)),
            cache,
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
        // Frontend posts to /predict; /api/predict kept for API clients
        .route("/predict", post(predict))
        .route("/api/predict", post(predict))
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn service_info() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "crop-prediction-api"
    }))
}

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "mode": state.recommender.mode().name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn predict(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let raw = body
        .as_object()
        .ok_or_else(|| AppError::BadRequest("Request body must be a JSON object".to_string()))?;

    let features = FeatureVector::from_raw(raw)?;
    let choice = ModelChoice::from_raw(raw);

    let model_key = state
        .recommender
        .effective_choice(choice)
        .map(|c| c.as_str())
        .unwrap_or("rules");
    let cache_key = format!("{}|{}", features.cache_key(), model_key);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Cache hit for {}", cache_key);
        return Ok(Json(cached));
    }

    let result = state.recommender.recommend_features(features, choice);
    let value = serde_json::to_value(&result).map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::debug!("Recommended '{}' ({} mode)", result.crop, result.mode);
    state.cache.insert(cache_key, value.clone()).await;

    Ok(Json(value))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    Validation(ValidationError),
    BadRequest(String),
    Internal(String),
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": e.to_string(), "field": e.field() }),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg })),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}
