use axum::{
    Extension, Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::personal_record::{PersonalRecordQuery, SportRecords},
};

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/personal-records",
    params(PersonalRecordQuery),
    responses(
        (status = 200, description = "Up to three fastest distinct times per race distance", body = Vec<SportRecords>),
        (status = 400, description = "Unknown sport")
    ),
    security(("bearer_auth" = [])),
    tag = "personal-records"
)]
pub async fn list_personal_records(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PersonalRecordQuery>,
) -> Result<Response, WebError> {
    let sports = query.sports().map_err(WebError::BadRequest)?;

    let records = services::list_personal_records(db.pool(), &user, &sports).await?;

    Ok(Json(records).into_response())
}

#[utoipa::path(
    post,
    path = "/api/personal-records/recompute",
    responses(
        (status = 200, description = "Records rebuilt from the full activity history", body = Vec<SportRecords>)
    ),
    security(("bearer_auth" = [])),
    tag = "personal-records"
)]
pub async fn recompute_personal_records(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
) -> Result<Response, WebError> {
    let records = services::recompute_all(db.pool(), &user).await?;

    Ok(Json(records).into_response())
}
