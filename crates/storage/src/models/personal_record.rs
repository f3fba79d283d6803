use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PersonalRecord {
    pub record_id: Uuid,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub activity_id: Uuid,
    pub sport_type: String,
    pub distance_bucket: Decimal,
    pub best_time_seconds: i32,
    pub record_date: chrono::NaiveDate,
    pub created_at: chrono::NaiveDateTime,
}

/// Row to insert when an attempt beats every stored time for its bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPersonalRecord {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub activity_id: Uuid,
    pub sport_type: String,
    pub distance_bucket: Decimal,
    pub best_time_seconds: i32,
}
