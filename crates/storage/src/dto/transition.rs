use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::validation_error;
use crate::models::{Transition, TransitionKind};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransitionResponse {
    pub transition_id: Uuid,
    pub session_id: Uuid,
    pub kind: String,
    pub duration_seconds: i32,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTransitionRequest {
    #[validate(custom(function = "validate_kind"))]
    pub kind: String,

    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration_seconds: i32,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTransitionRequest {
    #[validate(custom(function = "validate_kind"))]
    pub kind: Option<String>,

    #[validate(range(min = 0, message = "Duration must not be negative"))]
    pub duration_seconds: Option<i32>,

    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

fn validate_kind(kind: &str) -> Result<(), ValidationError> {
    match TransitionKind::from_name(kind) {
        Some(_) => Ok(()),
        None => Err(validation_error("invalid_kind", "kind must be T1 or T2")),
    }
}

impl From<Transition> for TransitionResponse {
    fn from(transition: Transition) -> Self {
        Self {
            transition_id: transition.transition_id,
            session_id: transition.session_id,
            kind: transition.kind,
            duration_seconds: transition.duration_seconds,
            notes: transition.notes,
            created_at: transition.created_at,
        }
    }
}
