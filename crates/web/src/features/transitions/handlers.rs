use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::transition::{CreateTransitionRequest, TransitionResponse, UpdateTransitionRequest},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    post,
    path = "/api/sessions/{session_id}/transitions",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    request_body = CreateTransitionRequest,
    responses(
        (status = 201, description = "Transition logged", body = TransitionResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "transitions"
)]
pub async fn create_transition(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<CreateTransitionRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let transition = services::create_transition(db.pool(), &user, session_id, &payload).await?;

    Ok((StatusCode::CREATED, Json(TransitionResponse::from(transition))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/transitions/{transition_id}",
    params(
        ("transition_id" = Uuid, Path, description = "Transition ID")
    ),
    request_body = UpdateTransitionRequest,
    responses(
        (status = 200, description = "Transition updated", body = TransitionResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Transition not found")
    ),
    security(("bearer_auth" = [])),
    tag = "transitions"
)]
pub async fn update_transition(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(transition_id): Path<Uuid>,
    Json(payload): Json<UpdateTransitionRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let transition =
        services::update_transition(db.pool(), &user, transition_id, &payload).await?;

    Ok(Json(TransitionResponse::from(transition)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/transitions/{transition_id}",
    params(
        ("transition_id" = Uuid, Path, description = "Transition ID")
    ),
    responses(
        (status = 204, description = "Transition deleted"),
        (status = 404, description = "Transition not found")
    ),
    security(("bearer_auth" = [])),
    tag = "transitions"
)]
pub async fn delete_transition(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(transition_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_transition(db.pool(), &user, transition_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
