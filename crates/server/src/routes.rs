use axum::{
    extract::State,
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::{warn, Level};
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod cards;
pub mod products;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses(
        (status = 200, description = "Service and database up", body = crate::openapi::HealthResponse),
        (status = 503, description = "Database unreachable", body = crate::openapi::HealthResponse)
    )
)]
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<Health>) {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(Health::up())),
        Err(e) => {
            warn!(err = %e, "health check: database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(Health::degraded()))
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: health, OpenAPI document, card and product routes
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let card_routes = Router::new()
        .route("/cards", get(cards::list_cards).post(cards::create_card))
        .route("/cards/:id", get(cards::get_card).put(cards::rename_card).delete(cards::delete_card))
        .route("/cards/:id/products", get(cards::list_card_products));

    // matchit needs the same parameter name at the same depth, hence `:id`
    let product_routes = Router::new()
        .route("/products", get(products::list_products).post(products::create_product))
        .route("/products/:id", get(products::get_product).delete(products::delete_product))
        .route("/products/:id/cards", get(products::list_product_cards).post(products::attach_card))
        .route("/products/:id/cards/:card_id", delete(products::detach_card));

    Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(card_routes)
        .merge(product_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 失败（5xx 等）时以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
