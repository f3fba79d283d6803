use sqlx::PgPool;
use storage::{
    dto::activity::{CreateActivityRequest, UpdateActivityRequest},
    models::Activity,
    repository::{activity::ActivityRepository, personal_record::PersonalRecordRepository},
    services::{personal_records::recompute_personal_records, session_totals},
};
use uuid::Uuid;

use crate::error::WebResult;
use crate::features::sessions::services::get_owned_session;
use crate::middleware::auth::AuthUser;

/// Load an activity and check that it belongs to `user`
pub async fn get_activity(
    pool: &PgPool,
    user: &AuthUser,
    activity_id: Uuid,
) -> WebResult<Activity> {
    let activity = ActivityRepository::new(pool).find_by_id(activity_id).await?;
    user.ensure_owns(activity.user_id)?;
    Ok(activity)
}

pub async fn list_session_activities(
    pool: &PgPool,
    user: &AuthUser,
    session_id: Uuid,
) -> WebResult<Vec<Activity>> {
    let session = get_owned_session(pool, user, session_id).await?;
    Ok(ActivityRepository::new(pool)
        .list_by_session(session.session_id)
        .await?)
}

/// Log an activity, then refresh the session totals and personal records
pub async fn create_activity(
    pool: &PgPool,
    user: &AuthUser,
    session_id: Uuid,
    request: &CreateActivityRequest,
) -> WebResult<Activity> {
    let session = get_owned_session(pool, user, session_id).await?;

    let activity = ActivityRepository::new(pool)
        .create(user.user_id, session.session_id, request)
        .await?;

    tracing::info!(
        activity_id = %activity.activity_id,
        sport_type = %activity.sport_type,
        "Activity logged"
    );

    session_totals::refresh_session_totals(pool, session.session_id).await?;
    recompute_records(pool, &activity, &activity.sport_type).await?;

    Ok(activity)
}

/// Edit an activity. Records are recomputed only when the sport, distance
/// or duration changed, for both sports when the sport itself changed.
pub async fn update_activity(
    pool: &PgPool,
    user: &AuthUser,
    activity_id: Uuid,
    request: &UpdateActivityRequest,
) -> WebResult<Activity> {
    let existing = get_activity(pool, user, activity_id).await?;

    let activity = ActivityRepository::new(pool)
        .update(&existing, request)
        .await?;

    session_totals::refresh_session_totals(pool, activity.session_id).await?;

    if request.touches_performance() {
        recompute_records(pool, &activity, &activity.sport_type).await?;
        if existing.sport_type != activity.sport_type {
            recompute_records(pool, &activity, &existing.sport_type).await?;
        }
    }

    Ok(activity)
}

/// Delete an activity. Records pointing at it go with it, so the sport is
/// recomputed to refill buckets from the remaining attempts.
pub async fn delete_activity(pool: &PgPool, user: &AuthUser, activity_id: Uuid) -> WebResult<()> {
    let activity = get_activity(pool, user, activity_id).await?;

    ActivityRepository::new(pool)
        .delete(activity.activity_id)
        .await?;
    session_totals::refresh_session_totals(pool, activity.session_id).await?;

    tracing::info!(%activity_id, "Activity deleted");

    recompute_records(pool, &activity, &activity.sport_type).await?;

    Ok(())
}

async fn recompute_records(pool: &PgPool, trigger: &Activity, sport_type: &str) -> WebResult<()> {
    let activities = ActivityRepository::new(pool);
    let records = PersonalRecordRepository::new(pool);

    recompute_personal_records(
        &activities,
        &records,
        trigger.user_id,
        sport_type,
        Some(trigger.session_id),
    )
    .await?;

    Ok(())
}
