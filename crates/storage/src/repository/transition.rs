use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::transition::{CreateTransitionRequest, UpdateTransitionRequest};
use crate::error::{Result, StorageError};
use crate::models::{Transition, TransitionKind};

const TRANSITION_COLUMNS: &str =
    "transition_id, user_id, session_id, kind, duration_seconds, notes, created_at";

pub struct TransitionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TransitionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_session(&self, session_id: Uuid) -> Result<Vec<Transition>> {
        let transitions = sqlx::query_as::<_, Transition>(&format!(
            "SELECT {TRANSITION_COLUMNS} FROM transitions WHERE session_id = $1 ORDER BY kind, created_at"
        ))
        .bind(session_id)
        .fetch_all(self.pool)
        .await?;

        Ok(transitions)
    }

    pub async fn find_by_id(&self, transition_id: Uuid) -> Result<Transition> {
        let transition = sqlx::query_as::<_, Transition>(&format!(
            "SELECT {TRANSITION_COLUMNS} FROM transitions WHERE transition_id = $1"
        ))
        .bind(transition_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(transition)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        req: &CreateTransitionRequest,
    ) -> Result<Transition> {
        let kind = normalized_kind(&req.kind)?;

        let transition = sqlx::query_as::<_, Transition>(&format!(
            r#"
            INSERT INTO transitions (user_id, session_id, kind, duration_seconds, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TRANSITION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(session_id)
        .bind(kind)
        .bind(req.duration_seconds)
        .bind(&req.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify_write("transition"))?;

        Ok(transition)
    }

    pub async fn update(
        &self,
        existing: &Transition,
        req: &UpdateTransitionRequest,
    ) -> Result<Transition> {
        let kind = match req.kind.as_deref() {
            Some(name) => normalized_kind(name)?,
            None => existing.kind.as_str(),
        };
        let duration_seconds = req.duration_seconds.unwrap_or(existing.duration_seconds);
        let notes = req.notes.as_ref().or(existing.notes.as_ref());

        let transition = sqlx::query_as::<_, Transition>(&format!(
            r#"
            UPDATE transitions
            SET kind = $2,
                duration_seconds = $3,
                notes = $4
            WHERE transition_id = $1
            RETURNING {TRANSITION_COLUMNS}
            "#
        ))
        .bind(existing.transition_id)
        .bind(kind)
        .bind(duration_seconds)
        .bind(notes)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(transition)
    }

    pub async fn delete(&self, transition_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM transitions WHERE transition_id = $1")
            .bind(transition_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn normalized_kind(name: &str) -> Result<&'static str> {
    TransitionKind::from_name(name)
        .map(|kind| kind.as_str())
        .ok_or_else(|| StorageError::ConstraintViolation(format!("unknown transition kind '{name}'")))
}
