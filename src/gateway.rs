use crate::catalog;
use crate::error::ApiError;
use crate::model::{
    HealthResponse, ModelsResponse, OptimizeRequest, OptimizeRequestV2, OptimizeResponse,
    OptimizeResponseV2,
};
use crate::optimizer::Optimizer;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    response::Html,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tracing::error;

const INDEX_HTML: &str = include_str!("../static/index.html");
const INDEX_V2_HTML: &str = include_str!("../static/index-v2.html");

pub struct AppState {
    pub optimizer: Optimizer,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/v2", get(index_v2))
        .route("/api/optimize", post(handle_optimize))
        .route("/api/v2/optimize", post(handle_optimize_v2))
        .route("/api/v2/generate-multi", post(handle_generate_multi))
        .route("/api/v2/models", get(handle_models))
        .route("/health", get(health))
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn index_v2() -> Html<&'static str> {
    Html(INDEX_V2_HTML)
}

pub async fn handle_optimize(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OptimizeRequest>, JsonRejection>,
) -> Result<Json<OptimizeResponse>, ApiError> {
    let req = match body {
        Ok(Json(req)) if !req.input.is_empty() => req,
        _ => return Err(ApiError::Validation("invalid request parameters".to_string())),
    };

    let result = state
        .optimizer
        .optimize(&req.input)
        .await
        .map_err(ApiError::upstream("optimization"))
        .inspect_err(|e| error!("V1 optimize failed: {}", e))?;

    Ok(Json(OptimizeResponse { result }))
}

pub async fn handle_optimize_v2(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OptimizeRequestV2>, JsonRejection>,
) -> Result<Json<OptimizeResponseV2>, ApiError> {
    let req = parse_v2(body)?;

    let result = state
        .optimizer
        .optimize_v2(req)
        .await
        .map_err(ApiError::upstream("optimization"))
        .inspect_err(|e| error!("V2 optimize failed: {}", e))?;

    Ok(Json(OptimizeResponseV2 { result }))
}

pub async fn handle_generate_multi(
    State(state): State<Arc<AppState>>,
    body: Result<Json<OptimizeRequestV2>, JsonRejection>,
) -> Result<Json<OptimizeResponseV2>, ApiError> {
    let req = parse_v2(body)?;

    let result = state
        .optimizer
        .generate_multi(req)
        .await
        .map_err(ApiError::upstream("batch generation"))
        .inspect_err(|e| error!("Multi-model generation failed: {}", e))?;

    Ok(Json(OptimizeResponseV2 { result }))
}

pub async fn handle_models() -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: catalog::list_models(),
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

fn parse_v2(body: Result<Json<OptimizeRequestV2>, JsonRejection>) -> Result<OptimizeRequestV2, ApiError> {
    match body {
        Ok(Json(req)) if req.input.is_empty() => Err(ApiError::Validation(
            "invalid request parameters: input is required".to_string(),
        )),
        Ok(Json(req)) => Ok(req),
        Err(rejection) => Err(ApiError::Validation(format!(
            "invalid request parameters: {}",
            rejection.body_text()
        ))),
    }
}
