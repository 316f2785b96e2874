use std::future::Future;

use chrono::Utc;
use sqlx::types::Json;

use crate::{
    db::Session,
    error::Error,
    models::{NewQuiz, Quiz},
};

pub trait QuizStore {
    fn create_quiz(&mut self, quiz: NewQuiz) -> impl Future<Output = Result<i64, Error>> + Send;
    /// Newest first
    fn list_quizzes(&mut self) -> impl Future<Output = Result<Vec<Quiz>, Error>> + Send;
    fn get_quiz(&mut self, id: i64) -> impl Future<Output = Result<Option<Quiz>, Error>> + Send;
}

impl QuizStore for Session {
    #[tracing::instrument(skip_all, fields(title = %quiz.title), err(Debug))]
    async fn create_quiz(&mut self, quiz: NewQuiz) -> Result<i64, Error> {
        let res = sqlx::query(
            "INSERT INTO quizzes (title, lesson_id, questions, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&quiz.title)
        .bind(quiz.lesson_id)
        .bind(Json(&quiz.questions))
        .bind(Utc::now())
        .execute(self.conn())
        .await?;

        let id = res.last_insert_rowid();
        tracing::info!(quiz = id, questions = quiz.questions.len(), "quiz created");
        Ok(id)
    }

    async fn list_quizzes(&mut self) -> Result<Vec<Quiz>, Error> {
        let quizzes = sqlx::query_as::<_, Quiz>(
            "SELECT id, title, lesson_id, questions, created_at FROM quizzes ORDER BY id DESC",
        )
        .fetch_all(self.conn())
        .await?;
        Ok(quizzes)
    }

    async fn get_quiz(&mut self, id: i64) -> Result<Option<Quiz>, Error> {
        let quiz = sqlx::query_as::<_, Quiz>(
            "SELECT id, title, lesson_id, questions, created_at FROM quizzes WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await?;
        Ok(quiz)
    }
}
