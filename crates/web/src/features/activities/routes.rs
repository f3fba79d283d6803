use axum::{Router, routing::get};
use storage::Database;

use super::handlers::{
    create_activity, delete_activity, get_activity, list_session_activities, update_activity,
};

pub fn routes() -> Router<Database> {
    Router::new().route(
        "/:activity_id",
        get(get_activity).put(update_activity).delete(delete_activity),
    )
}

/// Mounted under `/sessions`
pub fn session_routes() -> Router<Database> {
    Router::new().route(
        "/:session_id/activities",
        get(list_session_activities).post(create_activity),
    )
}
