//! HTTP API for the TriSwift training log.

pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod openapi;

use axum::{Router, middleware::from_fn_with_state, routing::get};
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use features::{activities, health, personal_records, sessions, transitions};
use middleware::auth::{JwtAuth, require_auth};
use openapi::ApiDoc;

pub fn create_router(db: Database, auth: JwtAuth) -> Router {
    let session_routes = sessions::routes::routes()
        .merge(activities::routes::session_routes())
        .merge(transitions::routes::session_routes());

    let api = Router::new()
        .nest("/sessions", session_routes)
        .nest("/activities", activities::routes::routes())
        .nest("/transitions", transitions::routes::routes())
        .nest("/personal-records", personal_records::routes::routes())
        .route_layer(from_fn_with_state(auth, require_auth));

    let cors = CorsLayer::very_permissive().max_age(std::time::Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(db)
}
