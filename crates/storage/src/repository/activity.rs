use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::activity::{CreateActivityRequest, UpdateActivityRequest};
use crate::error::{Result, StorageError};
use crate::models::{Activity, Sport};
use crate::services::personal_records::ActivityHistory;

const ACTIVITY_COLUMNS: &str = r#"
    activity_id, user_id, session_id, sport_type, duration_seconds, distance,
    heart_rate_min, heart_rate_max, heart_rate_avg, cadence, power, created_at
"#;

pub struct ActivityRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ActivityRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_session(&self, session_id: Uuid) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(&format!(
            r#"
            SELECT {ACTIVITY_COLUMNS}
            FROM activities
            WHERE session_id = $1
            ORDER BY created_at, activity_id
            "#
        ))
        .bind(session_id)
        .fetch_all(self.pool)
        .await?;

        Ok(activities)
    }

    /// Every activity of one sport for a user, shortest distance first and
    /// fastest first within a distance
    pub async fn list_by_user_and_sport(
        &self,
        user_id: Uuid,
        sport_type: &str,
    ) -> Result<Vec<Activity>> {
        let activities = sqlx::query_as::<_, Activity>(&format!(
            r#"
            SELECT {ACTIVITY_COLUMNS}
            FROM activities
            WHERE user_id = $1 AND sport_type = $2
            ORDER BY distance ASC, duration_seconds ASC
            "#
        ))
        .bind(user_id)
        .bind(sport_type)
        .fetch_all(self.pool)
        .await?;

        Ok(activities)
    }

    pub async fn find_by_id(&self, activity_id: Uuid) -> Result<Activity> {
        let activity = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {ACTIVITY_COLUMNS} FROM activities WHERE activity_id = $1"
        ))
        .bind(activity_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(activity)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        req: &CreateActivityRequest,
    ) -> Result<Activity> {
        let sport_type = normalized_sport(&req.sport_type)?;

        let activity = sqlx::query_as::<_, Activity>(&format!(
            r#"
            INSERT INTO activities (
                user_id, session_id, sport_type, duration_seconds, distance,
                heart_rate_min, heart_rate_max, heart_rate_avg, cadence, power
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ACTIVITY_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(session_id)
        .bind(sport_type)
        .bind(req.duration_seconds)
        .bind(req.distance)
        .bind(req.heart_rate_min)
        .bind(req.heart_rate_max)
        .bind(req.heart_rate_avg)
        .bind(req.cadence)
        .bind(req.power)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify_write("activity"))?;

        Ok(activity)
    }

    pub async fn update(&self, existing: &Activity, req: &UpdateActivityRequest) -> Result<Activity> {
        let sport_type = match req.sport_type.as_deref() {
            Some(name) => normalized_sport(name)?,
            None => existing.sport_type.as_str(),
        };
        let duration_seconds = req.duration_seconds.unwrap_or(existing.duration_seconds);
        let distance = req.distance.unwrap_or(existing.distance);
        let heart_rate_min = req.heart_rate_min.or(existing.heart_rate_min);
        let heart_rate_max = req.heart_rate_max.or(existing.heart_rate_max);
        let heart_rate_avg = req.heart_rate_avg.or(existing.heart_rate_avg);
        let cadence = req.cadence.or(existing.cadence);
        let power = req.power.or(existing.power);

        let activity = sqlx::query_as::<_, Activity>(&format!(
            r#"
            UPDATE activities
            SET sport_type = $2,
                duration_seconds = $3,
                distance = $4,
                heart_rate_min = $5,
                heart_rate_max = $6,
                heart_rate_avg = $7,
                cadence = $8,
                power = $9
            WHERE activity_id = $1
            RETURNING {ACTIVITY_COLUMNS}
            "#
        ))
        .bind(existing.activity_id)
        .bind(sport_type)
        .bind(duration_seconds)
        .bind(distance)
        .bind(heart_rate_min)
        .bind(heart_rate_max)
        .bind(heart_rate_avg)
        .bind(cadence)
        .bind(power)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify_write("activity"))?
        .ok_or(StorageError::NotFound)?;

        Ok(activity)
    }

    pub async fn delete(&self, activity_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM activities WHERE activity_id = $1")
            .bind(activity_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn normalized_sport(name: &str) -> Result<&'static str> {
    Sport::from_name(name)
        .map(|sport| sport.as_str())
        .ok_or_else(|| StorageError::ConstraintViolation(format!("unknown sport type '{name}'")))
}

#[async_trait]
impl<'a> ActivityHistory for ActivityRepository<'a> {
    async fn list_for_user_and_sport(
        &self,
        user_id: Uuid,
        sport_type: &str,
    ) -> Result<Vec<Activity>> {
        self.list_by_user_and_sport(user_id, sport_type).await
    }
}
