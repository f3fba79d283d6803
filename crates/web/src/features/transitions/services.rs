use sqlx::PgPool;
use storage::{
    dto::transition::{CreateTransitionRequest, UpdateTransitionRequest},
    models::Transition,
    repository::transition::TransitionRepository,
    services::session_totals,
};
use uuid::Uuid;

use crate::error::WebResult;
use crate::features::sessions::services::get_owned_session;
use crate::middleware::auth::AuthUser;

async fn get_owned_transition(
    pool: &PgPool,
    user: &AuthUser,
    transition_id: Uuid,
) -> WebResult<Transition> {
    let transition = TransitionRepository::new(pool)
        .find_by_id(transition_id)
        .await?;
    user.ensure_owns(transition.user_id)?;
    Ok(transition)
}

pub async fn create_transition(
    pool: &PgPool,
    user: &AuthUser,
    session_id: Uuid,
    request: &CreateTransitionRequest,
) -> WebResult<Transition> {
    let session = get_owned_session(pool, user, session_id).await?;

    let transition = TransitionRepository::new(pool)
        .create(user.user_id, session.session_id, request)
        .await?;
    session_totals::refresh_session_totals(pool, session.session_id).await?;

    Ok(transition)
}

pub async fn update_transition(
    pool: &PgPool,
    user: &AuthUser,
    transition_id: Uuid,
    request: &UpdateTransitionRequest,
) -> WebResult<Transition> {
    let existing = get_owned_transition(pool, user, transition_id).await?;

    let transition = TransitionRepository::new(pool)
        .update(&existing, request)
        .await?;
    session_totals::refresh_session_totals(pool, transition.session_id).await?;

    Ok(transition)
}

pub async fn delete_transition(
    pool: &PgPool,
    user: &AuthUser,
    transition_id: Uuid,
) -> WebResult<()> {
    let transition = get_owned_transition(pool, user, transition_id).await?;

    TransitionRepository::new(pool)
        .delete(transition.transition_id)
        .await?;
    session_totals::refresh_session_totals(pool, transition.session_id).await?;

    Ok(())
}
