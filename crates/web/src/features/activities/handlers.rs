use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::activity::{ActivityResponse, CreateActivityRequest, UpdateActivityRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/sessions/{session_id}/activities",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Activities of the session", body = Vec<ActivityResponse>),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "activities"
)]
pub async fn list_session_activities(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let activities = services::list_session_activities(db.pool(), &user, session_id).await?;

    let response: Vec<ActivityResponse> =
        activities.into_iter().map(ActivityResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/activities",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity logged; totals and personal records refreshed", body = ActivityResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "activities"
)]
pub async fn create_activity(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<CreateActivityRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let activity = services::create_activity(db.pool(), &user, session_id, &payload).await?;

    Ok((StatusCode::CREATED, Json(ActivityResponse::from(activity))).into_response())
}

#[utoipa::path(
    get,
    path = "/api/activities/{activity_id}",
    params(
        ("activity_id" = Uuid, Path, description = "Activity ID")
    ),
    responses(
        (status = 200, description = "Activity found", body = ActivityResponse),
        (status = 404, description = "Activity not found")
    ),
    security(("bearer_auth" = [])),
    tag = "activities"
)]
pub async fn get_activity(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let activity = services::get_activity(db.pool(), &user, activity_id).await?;

    Ok(Json(ActivityResponse::from(activity)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/activities/{activity_id}",
    params(
        ("activity_id" = Uuid, Path, description = "Activity ID")
    ),
    request_body = UpdateActivityRequest,
    responses(
        (status = 200, description = "Activity updated", body = ActivityResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Activity not found")
    ),
    security(("bearer_auth" = [])),
    tag = "activities"
)]
pub async fn update_activity(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<Uuid>,
    Json(payload): Json<UpdateActivityRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let activity = services::update_activity(db.pool(), &user, activity_id, &payload).await?;

    Ok(Json(ActivityResponse::from(activity)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/activities/{activity_id}",
    params(
        ("activity_id" = Uuid, Path, description = "Activity ID")
    ),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 404, description = "Activity not found")
    ),
    security(("bearer_auth" = [])),
    tag = "activities"
)]
pub async fn delete_activity(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(activity_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_activity(db.pool(), &user, activity_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
