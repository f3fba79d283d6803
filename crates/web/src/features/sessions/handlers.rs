use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PaginatedResponse,
        session::{
            CreateSessionRequest, SessionDetailResponse, SessionListFilter, SessionResponse,
            UpdateSessionRequest,
        },
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthUser;

use super::services;

#[utoipa::path(
    get,
    path = "/api/sessions",
    params(SessionListFilter),
    responses(
        (status = 200, description = "Sessions of the authenticated user", body = PaginatedResponse<SessionResponse>),
        (status = 400, description = "Invalid query parameters"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "sessions"
)]
pub async fn list_sessions(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Query(filter): Query<SessionListFilter>,
) -> Result<Response, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let (sessions, total_items) = services::list_sessions(db.pool(), &user, &filter).await?;

    let data: Vec<SessionResponse> = sessions.into_iter().map(SessionResponse::from).collect();
    let response = PaginatedResponse::new(data, &filter.pagination(), total_items);

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/sessions/{session_id}",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 200, description = "Session with activities and transitions", body = SessionDetailResponse),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "sessions"
)]
pub async fn get_session(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let session = services::get_session_detailed(db.pool(), &user, session_id).await?;

    Ok(Json(session).into_response())
}

#[utoipa::path(
    post,
    path = "/api/sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = SessionResponse),
        (status = 400, description = "Invalid request")
    ),
    security(("bearer_auth" = [])),
    tag = "sessions"
)]
pub async fn create_session(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let session = services::create_session(db.pool(), &user, &payload).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/sessions/{session_id}",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    request_body = UpdateSessionRequest,
    responses(
        (status = 200, description = "Session updated", body = SessionResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "sessions"
)]
pub async fn update_session(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<UpdateSessionRequest>,
) -> Result<Response, WebError> {
    payload.validate()?;

    let session = services::update_session(db.pool(), &user, session_id, &payload).await?;

    Ok(Json(SessionResponse::from(session)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/sessions/{session_id}",
    params(
        ("session_id" = Uuid, Path, description = "Session ID")
    ),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Session not found")
    ),
    security(("bearer_auth" = [])),
    tag = "sessions"
)]
pub async fn delete_session(
    State(db): State<Database>,
    Extension(user): Extension<AuthUser>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_session(db.pool(), &user, session_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
