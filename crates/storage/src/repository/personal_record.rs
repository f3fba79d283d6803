use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{NewPersonalRecord, PersonalRecord};
use crate::services::personal_records::PersonalRecordStore;

const RECORD_COLUMNS: &str = r#"
    record_id, user_id, session_id, activity_id, sport_type, distance_bucket,
    best_time_seconds, record_date, created_at
"#;

pub struct PersonalRecordRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> PersonalRecordRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every stored record of a user for one sport, fastest first per bucket
    pub async fn list_by_user_and_sport(
        &self,
        user_id: Uuid,
        sport_type: &str,
    ) -> Result<Vec<PersonalRecord>> {
        let records = sqlx::query_as::<_, PersonalRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM personal_records
            WHERE user_id = $1 AND sport_type = $2
            ORDER BY distance_bucket ASC, best_time_seconds ASC, created_at ASC
            "#
        ))
        .bind(user_id)
        .bind(sport_type)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    pub async fn list_by_bucket(
        &self,
        user_id: Uuid,
        sport_type: &str,
        distance_bucket: Decimal,
    ) -> Result<Vec<PersonalRecord>> {
        let records = sqlx::query_as::<_, PersonalRecord>(&format!(
            r#"
            SELECT {RECORD_COLUMNS}
            FROM personal_records
            WHERE user_id = $1 AND sport_type = $2 AND distance_bucket = $3
            ORDER BY best_time_seconds ASC, created_at ASC
            "#
        ))
        .bind(user_id)
        .bind(sport_type)
        .bind(distance_bucket)
        .fetch_all(self.pool)
        .await?;

        Ok(records)
    }

    pub async fn create(&self, record: &NewPersonalRecord) -> Result<PersonalRecord> {
        let created = sqlx::query_as::<_, PersonalRecord>(&format!(
            r#"
            INSERT INTO personal_records (
                user_id, session_id, activity_id, sport_type, distance_bucket, best_time_seconds
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RECORD_COLUMNS}
            "#
        ))
        .bind(record.user_id)
        .bind(record.session_id)
        .bind(record.activity_id)
        .bind(&record.sport_type)
        .bind(record.distance_bucket)
        .bind(record.best_time_seconds)
        .fetch_one(self.pool)
        .await?;

        Ok(created)
    }
}

#[async_trait]
impl<'a> PersonalRecordStore for PersonalRecordRepository<'a> {
    async fn list_for_bucket(
        &self,
        user_id: Uuid,
        sport_type: &str,
        distance_bucket: Decimal,
    ) -> Result<Vec<PersonalRecord>> {
        self.list_by_bucket(user_id, sport_type, distance_bucket).await
    }

    async fn insert(&self, record: &NewPersonalRecord) -> Result<PersonalRecord> {
        self.create(record).await
    }
}
