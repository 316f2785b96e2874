use std::future::Future;

use chrono::Utc;
use sqlx::types::Json;

use crate::{
    db::Session,
    error::Error,
    models::{Attempt, NewAttempt, ProgressRow},
};

const ATTEMPT_COLUMNS: &str = "id, user_id, quiz_id, answers, score, taken_at";

pub trait AttemptStore {
    fn create_attempt(
        &mut self,
        attempt: NewAttempt,
    ) -> impl Future<Output = Result<i64, Error>> + Send;
    fn list_attempts(&mut self) -> impl Future<Output = Result<Vec<Attempt>, Error>> + Send;
    fn get_attempt(
        &mut self,
        id: i64,
    ) -> impl Future<Output = Result<Option<Attempt>, Error>> + Send;
    fn list_attempts_for_user(
        &mut self,
        user_id: i64,
    ) -> impl Future<Output = Result<Vec<Attempt>, Error>> + Send;
    /// Every attempt joined with its user, in attempt order.
    ///
    /// Attempts whose user does not exist are left out.
    fn progress_report(&mut self) -> impl Future<Output = Result<Vec<ProgressRow>, Error>> + Send;
}

impl AttemptStore for Session {
    #[tracing::instrument(skip_all, fields(user = attempt.user_id, quiz = attempt.quiz_id), err(Debug))]
    async fn create_attempt(&mut self, attempt: NewAttempt) -> Result<i64, Error> {
        let res = sqlx::query(
            "INSERT INTO attempts (user_id, quiz_id, answers, score, taken_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(attempt.user_id)
        .bind(attempt.quiz_id)
        .bind(Json(&attempt.answers))
        .bind(attempt.score)
        .bind(Utc::now())
        .execute(self.conn())
        .await?;

        let id = res.last_insert_rowid();
        tracing::info!(attempt = id, score = attempt.score, "attempt recorded");
        Ok(id)
    }

    async fn list_attempts(&mut self) -> Result<Vec<Attempt>, Error> {
        let attempts =
            sqlx::query_as::<_, Attempt>(&format!("SELECT {ATTEMPT_COLUMNS} FROM attempts ORDER BY id"))
                .fetch_all(self.conn())
                .await?;
        Ok(attempts)
    }

    async fn get_attempt(&mut self, id: i64) -> Result<Option<Attempt>, Error> {
        let attempt =
            sqlx::query_as::<_, Attempt>(&format!("SELECT {ATTEMPT_COLUMNS} FROM attempts WHERE id = ?1"))
                .bind(id)
                .fetch_optional(self.conn())
                .await?;
        Ok(attempt)
    }

    async fn list_attempts_for_user(&mut self, user_id: i64) -> Result<Vec<Attempt>, Error> {
        let attempts = sqlx::query_as::<_, Attempt>(&format!(
            "SELECT {ATTEMPT_COLUMNS} FROM attempts WHERE user_id = ?1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(self.conn())
        .await?;
        Ok(attempts)
    }

    #[tracing::instrument(skip_all, err(Debug))]
    async fn progress_report(&mut self) -> Result<Vec<ProgressRow>, Error> {
        let rows = sqlx::query_as::<_, ProgressRow>(
            "SELECT a.id AS attempt_id, u.name AS user_name, u.email AS user_email, \
                    a.quiz_id AS quiz_id, a.score AS score, a.taken_at AS taken_at \
             FROM attempts a JOIN users u ON a.user_id = u.id \
             ORDER BY a.id",
        )
        .fetch_all(self.conn())
        .await?;
        tracing::debug!(num = rows.len(), "progress rows");
        Ok(rows)
    }
}
