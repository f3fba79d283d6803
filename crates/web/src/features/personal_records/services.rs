use sqlx::PgPool;
use storage::{
    dto::personal_record::SportRecords,
    models::Sport,
    repository::{activity::ActivityRepository, personal_record::PersonalRecordRepository},
    services::personal_records::{rank_sport_records, recompute_personal_records},
};

use crate::error::WebResult;
use crate::middleware::auth::AuthUser;

/// Top three distinct times per race distance for each requested sport
pub async fn list_personal_records(
    pool: &PgPool,
    user: &AuthUser,
    sports: &[Sport],
) -> WebResult<Vec<SportRecords>> {
    let repo = PersonalRecordRepository::new(pool);

    let mut result = Vec::with_capacity(sports.len());
    for &sport in sports {
        let records = repo
            .list_by_user_and_sport(user.user_id, sport.as_str())
            .await?;
        result.push(rank_sport_records(sport, &records));
    }

    Ok(result)
}

/// Run the record engine over the user's whole history, every sport
pub async fn recompute_all(pool: &PgPool, user: &AuthUser) -> WebResult<Vec<SportRecords>> {
    let activities = ActivityRepository::new(pool);
    let records = PersonalRecordRepository::new(pool);

    for sport in Sport::ALL {
        recompute_personal_records(&activities, &records, user.user_id, sport.as_str(), None)
            .await?;
    }

    tracing::info!(user_id = %user.user_id, "Personal records recomputed");

    list_personal_records(pool, user, &Sport::ALL).await
}
