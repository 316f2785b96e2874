//! Relational store for users, lessons, quizzes and quiz attempts.
//!
//! Every request works through a [`Session`], a pooled SQLite connection
//! acquired from [`SqliteStore`] and returned to the pool on drop. The
//! per-entity traits ([`UserStore`], [`LessonStore`], [`QuizStore`],
//! [`AttemptStore`]) are the store interface handlers program against.
//!
//! There are no update or delete operations. References between tables are
//! advisory, nothing enforces them.
pub mod attempt;
pub mod db;
pub mod error;
pub mod lesson;
pub mod models;
pub mod quiz;
pub mod user;

pub use attempt::AttemptStore;
pub use db::{Session, SqliteStore};
pub use error::Error;
pub use lesson::LessonStore;
pub use models::*;
pub use quiz::QuizStore;
pub use sqlx::Error as SqlxError;
pub use user::UserStore;
