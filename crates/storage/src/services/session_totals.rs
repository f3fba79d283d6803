use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Activity, Transition};
use crate::repository::{
    activity::ActivityRepository, session::SessionRepository, transition::TransitionRepository,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionTotals {
    pub total_duration_seconds: i32,
    pub total_distance_km: Decimal,
}

/// Time includes transitions; distance is in km with swim meters converted.
pub fn compute_totals(activities: &[Activity], transitions: &[Transition]) -> SessionTotals {
    let activity_seconds: i64 = activities
        .iter()
        .map(|activity| i64::from(activity.duration_seconds))
        .sum();
    let transition_seconds: i64 = transitions
        .iter()
        .map(|transition| i64::from(transition.duration_seconds))
        .sum();

    let total_distance_km = activities
        .iter()
        .map(Activity::distance_km)
        .sum::<Decimal>()
        .round_dp(3);

    SessionTotals {
        total_duration_seconds: i32::try_from(activity_seconds + transition_seconds)
            .unwrap_or(i32::MAX),
        total_distance_km,
    }
}

/// Reloads the segments of a session and stores the new totals.
pub async fn refresh_session_totals(pool: &PgPool, session_id: Uuid) -> Result<SessionTotals> {
    let activities = ActivityRepository::new(pool)
        .list_by_session(session_id)
        .await?;
    let transitions = TransitionRepository::new(pool)
        .list_by_session(session_id)
        .await?;

    let totals = compute_totals(&activities, &transitions);
    SessionRepository::new(pool)
        .update_totals(session_id, &totals)
        .await?;

    tracing::debug!(
        %session_id,
        total_duration_seconds = totals.total_duration_seconds,
        total_distance_km = %totals.total_distance_km,
        "Session totals refreshed"
    );

    Ok(totals)
}
