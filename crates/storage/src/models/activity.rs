use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::Sport;

/// One logged swim, bike or run segment of a training session.
///
/// `distance` is in km for run and bike, in meters for swim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Activity {
    pub activity_id: Uuid,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub sport_type: String,
    pub duration_seconds: i32,
    pub distance: Decimal,
    pub heart_rate_min: Option<i32>,
    pub heart_rate_max: Option<i32>,
    pub heart_rate_avg: Option<i32>,
    pub cadence: Option<i32>,
    pub power: Option<i32>,
    pub created_at: chrono::NaiveDateTime,
}

impl Activity {
    pub fn sport(&self) -> Option<Sport> {
        Sport::from_name(&self.sport_type)
    }

    pub fn distance_km(&self) -> Decimal {
        match self.sport() {
            Some(sport) => sport.distance_in_km(self.distance),
            None => self.distance,
        }
    }
}
