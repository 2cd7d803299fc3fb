use axum::{
    Json, Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::get,
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features::{accounts, competition_sport, competitions, pages, sports, stages};
use crate::middleware::auth::{require_api_permission, session_middleware};
use crate::state::AppState;

/// Collection URLs, the entry point of the browsable API
pub async fn api_root() -> Json<Value> {
    Json(json!({
        "competitions": "/api/competitions/",
        "sports": "/api/sports/",
        "stages": "/api/stages/",
        "competition_sport": "/api/competition_sport/",
    }))
}

fn cors(allowed_origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .filter_map(|o| o.trim().parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
}

/// Assembles the API, the HTML pages and the Swagger UI
pub fn configure(state: AppState, allowed_origins: &str) -> Router {
    let api = Router::new()
        .route("/api", get(api_root))
        .route("/api/", get(api_root))
        .merge(competitions::routes::routes())
        .merge(sports::routes::routes())
        .merge(stages::routes::routes())
        .merge(competition_sport::routes::routes())
        .route_layer(middleware::from_fn(require_api_permission));

    Router::new()
        .merge(api)
        .merge(accounts::routes::api_routes())
        .merge(accounts::routes::routes())
        .merge(pages::routes::routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state, session_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors(allowed_origins))
}
