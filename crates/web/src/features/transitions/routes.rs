use axum::{
    Router,
    routing::{post, put},
};
use storage::Database;

use super::handlers::{create_transition, delete_transition, update_transition};

pub fn routes() -> Router<Database> {
    Router::new().route(
        "/:transition_id",
        put(update_transition).delete(delete_transition),
    )
}

/// Mounted under `/sessions`
pub fn session_routes() -> Router<Database> {
    Router::new().route("/:session_id/transitions", post(create_transition))
}
