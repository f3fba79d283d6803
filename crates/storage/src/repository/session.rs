use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::session::{CreateSessionRequest, SessionListFilter, UpdateSessionRequest};
use crate::error::{Result, StorageError};
use crate::models::TrainingSession;
use crate::services::session_totals::SessionTotals;

const SESSION_COLUMNS: &str = r#"
    session_id, user_id, title, session_date, notes,
    total_duration_seconds, total_distance_km, created_at
"#;

pub struct SessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Sessions of a user, newest first, with the total count for pagination
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        filter: &SessionListFilter,
    ) -> Result<(Vec<TrainingSession>, i64)> {
        let pagination = filter.pagination();

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM training_sessions WHERE user_id = ");
        count.push_bind(user_id);
        push_date_range(&mut count, filter);

        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!(
            "SELECT {SESSION_COLUMNS} FROM training_sessions WHERE user_id = "
        ));
        query.push_bind(user_id);
        push_date_range(&mut query, filter);
        query.push(" ORDER BY session_date DESC, created_at DESC LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let sessions = query
            .build_query_as::<TrainingSession>()
            .fetch_all(self.pool)
            .await?;

        Ok((sessions, total_items))
    }

    pub async fn find_by_id(&self, session_id: Uuid) -> Result<TrainingSession> {
        let session = sqlx::query_as::<_, TrainingSession>(&format!(
            "SELECT {SESSION_COLUMNS} FROM training_sessions WHERE session_id = $1"
        ))
        .bind(session_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(session)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        req: &CreateSessionRequest,
    ) -> Result<TrainingSession> {
        let session = sqlx::query_as::<_, TrainingSession>(&format!(
            r#"
            INSERT INTO training_sessions (user_id, title, session_date, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&req.title)
        .bind(req.session_date)
        .bind(&req.notes)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify_write("session"))?;

        Ok(session)
    }

    pub async fn update(
        &self,
        existing: &TrainingSession,
        req: &UpdateSessionRequest,
    ) -> Result<TrainingSession> {
        let title = req.title.as_ref().unwrap_or(&existing.title);
        let session_date = req.session_date.unwrap_or(existing.session_date);
        let notes = req.notes.as_ref().or(existing.notes.as_ref());

        let session = sqlx::query_as::<_, TrainingSession>(&format!(
            r#"
            UPDATE training_sessions
            SET title = $2,
                session_date = $3,
                notes = $4
            WHERE session_id = $1
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(existing.session_id)
        .bind(title)
        .bind(session_date)
        .bind(notes)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(session)
    }

    pub async fn update_totals(&self, session_id: Uuid, totals: &SessionTotals) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE training_sessions
            SET total_duration_seconds = $2,
                total_distance_km = $3
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .bind(totals.total_duration_seconds)
        .bind(totals.total_distance_km)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Activities, transitions and personal records go with it
    pub async fn delete(&self, session_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM training_sessions WHERE session_id = $1")
            .bind(session_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_date_range(query: &mut QueryBuilder<'_, Postgres>, filter: &SessionListFilter) {
    if let Some(from) = filter.from {
        query.push(" AND session_date >= ");
        query.push_bind(from);
    }

    if let Some(to) = filter.to {
        query.push(" AND session_date <= ");
        query.push_bind(to);
    }
}
