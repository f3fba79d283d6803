use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TrainingSession {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub session_date: chrono::NaiveDate,
    pub notes: Option<String>,
    pub total_duration_seconds: i32,
    pub total_distance_km: Decimal,
    pub created_at: chrono::NaiveDateTime,
}
