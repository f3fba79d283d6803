use sqlx::PgPool;
use storage::{
    dto::{
        activity::ActivityResponse,
        session::{
            CreateSessionRequest, SessionDetailResponse, SessionListFilter, SessionResponse,
            UpdateSessionRequest,
        },
        transition::TransitionResponse,
    },
    models::TrainingSession,
    repository::{
        activity::ActivityRepository, session::SessionRepository,
        transition::TransitionRepository,
    },
};
use uuid::Uuid;

use crate::error::WebResult;
use crate::middleware::auth::AuthUser;

/// Load a session and check that it belongs to `user`
pub async fn get_owned_session(
    pool: &PgPool,
    user: &AuthUser,
    session_id: Uuid,
) -> WebResult<TrainingSession> {
    let session = SessionRepository::new(pool).find_by_id(session_id).await?;
    user.ensure_owns(session.user_id)?;
    Ok(session)
}

/// List the user's sessions, newest first
pub async fn list_sessions(
    pool: &PgPool,
    user: &AuthUser,
    filter: &SessionListFilter,
) -> WebResult<(Vec<TrainingSession>, i64)> {
    let repo = SessionRepository::new(pool);
    Ok(repo.list_for_user(user.user_id, filter).await?)
}

/// Session with its activities and transitions
pub async fn get_session_detailed(
    pool: &PgPool,
    user: &AuthUser,
    session_id: Uuid,
) -> WebResult<SessionDetailResponse> {
    let session = get_owned_session(pool, user, session_id).await?;

    let activities = ActivityRepository::new(pool)
        .list_by_session(session_id)
        .await?;
    let transitions = TransitionRepository::new(pool)
        .list_by_session(session_id)
        .await?;

    Ok(SessionDetailResponse {
        session: SessionResponse::from(session),
        activities: activities.into_iter().map(ActivityResponse::from).collect(),
        transitions: transitions
            .into_iter()
            .map(TransitionResponse::from)
            .collect(),
    })
}

pub async fn create_session(
    pool: &PgPool,
    user: &AuthUser,
    request: &CreateSessionRequest,
) -> WebResult<TrainingSession> {
    let repo = SessionRepository::new(pool);
    let session = repo.create(user.user_id, request).await?;

    tracing::info!(session_id = %session.session_id, "Training session created");

    Ok(session)
}

pub async fn update_session(
    pool: &PgPool,
    user: &AuthUser,
    session_id: Uuid,
    request: &UpdateSessionRequest,
) -> WebResult<TrainingSession> {
    let existing = get_owned_session(pool, user, session_id).await?;
    let repo = SessionRepository::new(pool);
    Ok(repo.update(&existing, request).await?)
}

/// Delete a session together with its activities, transitions and records
pub async fn delete_session(pool: &PgPool, user: &AuthUser, session_id: Uuid) -> WebResult<()> {
    let session = get_owned_session(pool, user, session_id).await?;
    SessionRepository::new(pool)
        .delete(session.session_id)
        .await?;

    tracing::info!(%session_id, "Training session deleted");

    Ok(())
}
