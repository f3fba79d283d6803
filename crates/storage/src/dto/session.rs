use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::activity::ActivityResponse;
use super::common::PaginationParams;
use super::transition::TransitionResponse;
use crate::models::TrainingSession;

/// Training session without its segments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub title: String,
    pub session_date: NaiveDate,
    pub notes: Option<String>,
    pub total_duration_seconds: i32,
    pub total_distance_km: Decimal,
    pub created_at: NaiveDateTime,
}

/// Training session with every activity and transition logged in it
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionDetailResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub activities: Vec<ActivityResponse>,
    pub transitions: Vec<TransitionResponse>,
}

/// Query string for the session list. Pagination fields are inlined because
/// `serde(flatten)` loses the numeric types of urlencoded values.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SessionListFilter {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Earliest session date, inclusive
    pub from: Option<NaiveDate>,
    /// Latest session date, inclusive
    pub to: Option<NaiveDate>,
}

impl SessionListFilter {
    pub fn pagination(&self) -> PaginationParams {
        let defaults = PaginationParams::default();
        PaginationParams {
            page: self.page.unwrap_or(defaults.page),
            page_size: self.page_size.unwrap_or(defaults.page_size),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()?;

        if let (Some(from), Some(to)) = (self.from, self.to)
            && from > to
        {
            return Err("from must not be after to".to_string());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateSessionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    pub title: String,

    pub session_date: NaiveDate,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateSessionRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    pub session_date: Option<NaiveDate>,

    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

impl From<TrainingSession> for SessionResponse {
    fn from(session: TrainingSession) -> Self {
        Self {
            session_id: session.session_id,
            title: session.title,
            session_date: session.session_date,
            notes: session.notes,
            total_duration_seconds: session.total_duration_seconds,
            total_distance_km: session.total_distance_km,
            created_at: session.created_at,
        }
    }
}
