use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};
use common::types::HEALTH_TEXT;
use service::malaria::{MalariaService, SeaOrmMalariaRepository};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;

pub mod malaria;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub malaria: Arc<MalariaService<SeaOrmMalariaRepository>>,
}

impl ServerState {
    pub fn new(repo: SeaOrmMalariaRepository, csv_path: impl Into<std::path::PathBuf>) -> Self {
        Self { malaria: Arc::new(MalariaService::new(Arc::new(repo), csv_path)) }
    }
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health() -> &'static str {
    HEALTH_TEXT
}

/// Build the full application router: health, malaria resource, OpenAPI docs.
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let api = Router::new()
        .route("/", get(health))
        .route("/api/reset/malaria/", put(malaria::reset))
        .route("/api/malaria/filter", get(malaria::filter))
        .route("/api/malaria/", get(malaria::list).post(malaria::create))
        .route("/api/malaria/iso/", get(malaria::list_isos))
        .route("/api/malaria/iso/:iso", get(malaria::get_by_iso))
        .route(
            "/api/malaria/:id/",
            get(malaria::get).put(malaria::update).delete(malaria::delete),
        )
        .with_state(state);

    api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
