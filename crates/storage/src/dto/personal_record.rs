use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::Sport;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PersonalRecordQuery {
    /// Restrict the result to one sport (run, bike or swim)
    pub sport: Option<String>,
}

impl PersonalRecordQuery {
    /// Sports to report on, every sport when none is requested.
    pub fn sports(&self) -> Result<Vec<Sport>, String> {
        match self.sport.as_deref() {
            None => Ok(Sport::ALL.to_vec()),
            Some(name) => Sport::from_name(name)
                .map(|sport| vec![sport])
                .ok_or_else(|| format!("unknown sport '{name}', expected run, bike or swim")),
        }
    }
}

/// One slot of the top-3 for a race distance
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankedPersonalRecord {
    pub rank: u8,
    pub record_id: Uuid,
    pub activity_id: Uuid,
    pub session_id: Uuid,
    pub best_time_seconds: i32,
    pub record_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DistanceRecords {
    /// Race distance in km
    pub distance_bucket: Decimal,
    pub records: Vec<RankedPersonalRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SportRecords {
    pub sport: Sport,
    pub distances: Vec<DistanceRecords>,
}
