use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Lesson {
    pub id: i64,
    pub title: String,
    pub topic: String,
    pub content: String,
    /// Advisory reference to the creating `User`
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewLesson {
    pub title: String,
    pub topic: String,
    pub content: String,
    pub created_by: Option<i64>,
}

/// A multiple choice question.
///
/// Serialized as `{"q": ..., "choices": [...], "answer": <index>}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "q", alias = "prompt")]
    pub prompt: String,
    pub choices: Vec<String>,
    /// Zero-based index into `choices`
    pub answer: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    /// Advisory reference to a `Lesson`
    pub lesson_id: Option<i64>,
    #[sqlx(json)]
    pub questions: Vec<Question>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewQuiz {
    pub title: String,
    pub lesson_id: Option<i64>,
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct Attempt {
    pub id: i64,
    pub user_id: i64,
    pub quiz_id: i64,
    /// One entry per quiz question, `None` when unanswered
    #[sqlx(json)]
    pub answers: Vec<Option<usize>>,
    /// Percentage, rounded to 2 decimal places
    pub score: f64,
    pub taken_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewAttempt {
    pub user_id: i64,
    pub quiz_id: i64,
    pub answers: Vec<Option<usize>>,
    pub score: f64,
}

/// Attempt joined with its owning user, one row of the progress export.
#[derive(Clone, Debug, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgressRow {
    pub attempt_id: i64,
    pub user_name: String,
    pub user_email: String,
    pub quiz_id: i64,
    pub score: f64,
    pub taken_at: DateTime<Utc>,
}
