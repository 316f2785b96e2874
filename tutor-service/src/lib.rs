//! Edu Tutor web service.
//!
//! HTML form front end over the learning store: users, generated lessons,
//! quizzes and their attempts, progress export, and a simulated LMS sync.
use axum::{Router, routing::get};

pub mod config;
pub mod error;
pub mod extract;
pub mod flash;
pub mod routes;
pub mod templates;

pub use config::{AppState, EnvVars};

/// Builds the application router. Middleware layers are added by the caller.
pub fn app(state: AppState) -> Router {
    use routes::{home, lessons, lms, progress, quizzes, users};

    Router::new()
        .route("/", get(home::get_home))
        .route("/users", get(users::get_users).post(users::post_users))
        .route("/users/{id}", get(users::get_user_profile))
        .route("/lessons", get(lessons::get_lessons).post(lessons::post_lessons))
        .route("/lessons/{id}", get(lessons::get_lesson))
        .route("/quizzes", get(quizzes::get_quizzes).post(quizzes::post_quizzes))
        .route("/quizzes/{id}", get(quizzes::get_quiz).post(quizzes::post_quiz))
        .route("/progress/export", get(progress::get_progress_export))
        .route("/lms", get(lms::get_lms).post(lms::post_lms))
        .route("/status/ping", get(routes::get_status_ping))
        .with_state(state)
}
