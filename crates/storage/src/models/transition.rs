use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Changeover between legs: T1 is swim to bike, T2 is bike to run.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Transition {
    pub transition_id: Uuid,
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub kind: String,
    pub duration_seconds: i32,
    pub notes: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub enum TransitionKind {
    T1,
    T2,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::T1 => "T1",
            Self::T2 => "T2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "T1" => Some(Self::T1),
            "T2" => Some(Self::T2),
            _ => None,
        }
    }
}
