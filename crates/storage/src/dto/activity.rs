use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::validation_error;
use crate::models::{Activity, Sport};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ActivityResponse {
    pub activity_id: Uuid,
    pub session_id: Uuid,
    pub sport_type: String,
    pub duration_seconds: i32,
    /// As logged: km for run and bike, meters for swim
    pub distance: Decimal,
    pub distance_km: Decimal,
    pub heart_rate_min: Option<i32>,
    pub heart_rate_max: Option<i32>,
    pub heart_rate_avg: Option<i32>,
    pub cadence: Option<i32>,
    pub power: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Request payload for logging a new activity
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_heart_rate"))]
pub struct CreateActivityRequest {
    #[validate(custom(function = "validate_sport_type"))]
    pub sport_type: String,

    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration_seconds: i32,

    #[validate(custom(function = "validate_distance"))]
    pub distance: Decimal,

    #[validate(range(min = 0, max = 300))]
    pub heart_rate_min: Option<i32>,

    #[validate(range(min = 0, max = 300))]
    pub heart_rate_max: Option<i32>,

    #[validate(range(min = 0, max = 300))]
    pub heart_rate_avg: Option<i32>,

    #[validate(range(min = 0, max = 300))]
    pub cadence: Option<i32>,

    #[validate(range(min = 0, max = 3000))]
    pub power: Option<i32>,
}

/// Request payload for editing an activity; absent fields keep their value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_heart_rate"))]
pub struct UpdateActivityRequest {
    #[validate(custom(function = "validate_sport_type"))]
    pub sport_type: Option<String>,

    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration_seconds: Option<i32>,

    #[validate(custom(function = "validate_distance"))]
    pub distance: Option<Decimal>,

    #[validate(range(min = 0, max = 300))]
    pub heart_rate_min: Option<i32>,

    #[validate(range(min = 0, max = 300))]
    pub heart_rate_max: Option<i32>,

    #[validate(range(min = 0, max = 300))]
    pub heart_rate_avg: Option<i32>,

    #[validate(range(min = 0, max = 300))]
    pub cadence: Option<i32>,

    #[validate(range(min = 0, max = 3000))]
    pub power: Option<i32>,
}

impl UpdateActivityRequest {
    /// Whether the edit can change which bucket the activity falls in or
    /// how fast it was.
    pub fn touches_performance(&self) -> bool {
        self.sport_type.is_some() || self.duration_seconds.is_some() || self.distance.is_some()
    }
}

fn validate_sport_type(sport_type: &str) -> Result<(), ValidationError> {
    if Sport::from_name(sport_type).is_some() {
        Ok(())
    } else {
        Err(validation_error(
            "invalid_sport_type",
            "sport_type must be one of run, bike, swim",
        ))
    }
}

fn validate_distance(distance: &Decimal) -> Result<(), ValidationError> {
    if *distance < Decimal::ZERO {
        return Err(validation_error(
            "negative_distance",
            "Distance must not be negative",
        ));
    }
    Ok(())
}

fn check_heart_rate(
    min: Option<i32>,
    avg: Option<i32>,
    max: Option<i32>,
) -> Result<(), ValidationError> {
    let ordered = |low: Option<i32>, high: Option<i32>| match (low, high) {
        (Some(low), Some(high)) => low <= high,
        _ => true,
    };

    if ordered(min, avg) && ordered(avg, max) && ordered(min, max) {
        Ok(())
    } else {
        Err(validation_error(
            "heart_rate_order",
            "Heart rate must satisfy min <= avg <= max",
        ))
    }
}

fn validate_create_heart_rate(req: &CreateActivityRequest) -> Result<(), ValidationError> {
    check_heart_rate(req.heart_rate_min, req.heart_rate_avg, req.heart_rate_max)
}

fn validate_update_heart_rate(req: &UpdateActivityRequest) -> Result<(), ValidationError> {
    check_heart_rate(req.heart_rate_min, req.heart_rate_avg, req.heart_rate_max)
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            distance_km: activity.distance_km(),
            activity_id: activity.activity_id,
            session_id: activity.session_id,
            sport_type: activity.sport_type,
            duration_seconds: activity.duration_seconds,
            distance: activity.distance,
            heart_rate_min: activity.heart_rate_min,
            heart_rate_max: activity.heart_rate_max,
            heart_rate_avg: activity.heart_rate_avg,
            cadence: activity.cadence,
            power: activity.power,
            created_at: activity.created_at,
        }
    }
}
