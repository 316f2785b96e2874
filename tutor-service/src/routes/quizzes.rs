use std::collections::HashMap;

use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::SignedCookieJar;
use minijinja::context;
use serde::Deserialize;
use store::{AttemptStore, NewAttempt, NewQuiz, QuizStore};
use tutor_utils::{
    attempt::{answers_from_fields, grade},
    quiz::{SAMPLE_QUESTIONS, parse_questions},
};

use crate::{
    config::AppState,
    error::Error,
    extract::Db,
    flash,
    routes::{parse_id, parse_optional_id},
    templates::render,
};

#[derive(Deserialize)]
pub struct CreateQuizForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    lesson_id: String,
    #[serde(default)]
    questions: String,
}

pub async fn get_quizzes(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut db: Db,
) -> Result<(SignedCookieJar, Html<String>), Error> {
    let quizzes = db.list_quizzes().await?;
    let (jar, flash) = flash::take(jar);
    let page = render(
        &state.templates,
        "quizzes.html",
        context! { quizzes, flash, sample_questions => SAMPLE_QUESTIONS },
    )?;
    Ok((jar, page))
}

pub async fn post_quizzes(
    jar: SignedCookieJar,
    mut db: Db,
    Form(form): Form<CreateQuizForm>,
) -> Result<(SignedCookieJar, Redirect), Error> {
    let lesson_id = parse_optional_id("lesson_id", &form.lesson_id)?;
    let questions = parse_questions(&form.questions)?;

    db.create_quiz(NewQuiz {
        title: form.title.trim().to_string(),
        lesson_id,
        questions,
    })
    .await?;

    Ok((flash::set(jar, "Quiz created"), Redirect::to("/quizzes")))
}

pub async fn get_quiz(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut db: Db,
    Path(quiz_id): Path<i64>,
) -> Result<(SignedCookieJar, Html<String>), Error> {
    let quiz = db
        .get_quiz(quiz_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("quiz {quiz_id} not found")))?;

    let (jar, flash) = flash::take(jar);
    let page = render(&state.templates, "quiz.html", context! { quiz, flash })?;
    Ok((jar, page))
}

/// Grades the submitted answers (`q0`, `q1`, ...) and records the attempt
/// for `user_id`.
pub async fn post_quiz(
    jar: SignedCookieJar,
    mut db: Db,
    Path(quiz_id): Path<i64>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<(SignedCookieJar, Redirect), Error> {
    let quiz = db
        .get_quiz(quiz_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("quiz {quiz_id} not found")))?;
    let user_id = parse_id("user_id", fields.get("user_id").map(String::as_str))?;

    let answers = answers_from_fields(quiz.questions.len(), &fields);
    let graded = grade(&quiz.questions, &answers);
    tracing::debug!(
        quiz = quiz_id,
        user = user_id,
        correct = graded.correct,
        total = quiz.questions.len(),
        "quiz graded"
    );

    db.create_attempt(NewAttempt {
        user_id,
        quiz_id,
        answers: graded.answers,
        score: graded.score,
    })
    .await?;

    let message = format!("Quiz submitted. Score: {:.2}%", graded.score);
    Ok((flash::set(jar, message), Redirect::to("/quizzes")))
}
