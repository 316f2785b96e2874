use std::future::Future;

use chrono::Utc;

use crate::{
    db::Session,
    error::Error,
    models::{Lesson, NewLesson},
};

pub trait LessonStore {
    fn create_lesson(
        &mut self,
        lesson: NewLesson,
    ) -> impl Future<Output = Result<i64, Error>> + Send;
    /// Newest first
    fn list_lessons(&mut self) -> impl Future<Output = Result<Vec<Lesson>, Error>> + Send;
    fn get_lesson(&mut self, id: i64)
    -> impl Future<Output = Result<Option<Lesson>, Error>> + Send;
}

impl LessonStore for Session {
    #[tracing::instrument(skip_all, fields(topic = %lesson.topic), err(Debug))]
    async fn create_lesson(&mut self, lesson: NewLesson) -> Result<i64, Error> {
        let res = sqlx::query(
            "INSERT INTO lessons (title, topic, content, created_by, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&lesson.title)
        .bind(&lesson.topic)
        .bind(&lesson.content)
        .bind(lesson.created_by)
        .bind(Utc::now())
        .execute(self.conn())
        .await?;

        let id = res.last_insert_rowid();
        tracing::info!(lesson = id, "lesson created");
        Ok(id)
    }

    async fn list_lessons(&mut self) -> Result<Vec<Lesson>, Error> {
        let lessons = sqlx::query_as::<_, Lesson>(
            "SELECT id, title, topic, content, created_by, created_at FROM lessons ORDER BY id DESC",
        )
        .fetch_all(self.conn())
        .await?;
        Ok(lessons)
    }

    async fn get_lesson(&mut self, id: i64) -> Result<Option<Lesson>, Error> {
        let lesson = sqlx::query_as::<_, Lesson>(
            "SELECT id, title, topic, content, created_by, created_at FROM lessons WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await?;
        Ok(lesson)
    }
}
