use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{list_personal_records, recompute_personal_records};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/", get(list_personal_records))
        .route("/recompute", post(recompute_personal_records))
}
