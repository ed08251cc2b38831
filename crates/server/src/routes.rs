pub mod admin;
pub mod auth;
pub mod business;
pub mod product;

use axum::{
    extract::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::{metrics, types::Health};

use crate::identity::resolve_identity;
use crate::openapi::ApiDoc;
use crate::state::ServerState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to Local Business Directory API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth",
            "business": "/api/business",
            "product": "/api/product",
            "admin": "/api/admin",
            "docs": "/docs"
        }
    }))
}

async fn metrics_endpoint() -> impl IntoResponse {
    metrics::encode_metrics()
}

/// Count every response by method and status class.
async fn track_metrics(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let res = next.run(req).await;
    metrics::record_request(method.as_str(), res.status().as_u16());
    res
}

/// Build the full application router: public, directory API and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let api = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/business", post(business::create).get(business::list))
        .route("/api/business/my/business", get(business::mine))
        .route("/api/business/approve/:id", put(business::approve))
        .route("/api/business/:id", get(business::get).put(business::update))
        .route("/api/product", post(product::create).get(product::list))
        .route("/api/product/search", get(product::search))
        .route("/api/product/my/products", get(product::mine))
        .route("/api/product/:id", get(product::get).put(product::update).delete(product::delete))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/user/:id", delete(admin::delete_user))
        .route("/api/admin/businesses", get(admin::list_businesses))
        .route("/api/admin/stats", get(admin::stats))
        .route_layer(middleware::from_fn_with_state(state.clone(), resolve_identity));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(middleware::from_fn(track_metrics))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                // 5xx
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
