use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::SignedCookieJar;
use minijinja::context;
use serde::Deserialize;
use store::{LessonStore, NewLesson};

use crate::{
    config::AppState, error::Error, extract::Db, flash, routes::parse_optional_id,
    templates::render,
};

#[derive(Deserialize)]
pub struct GenerateLessonForm {
    #[serde(default)]
    topic: String,
    #[serde(default)]
    created_by: String,
}

pub async fn get_lessons(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut db: Db,
) -> Result<(SignedCookieJar, Html<String>), Error> {
    let lessons = db.list_lessons().await?;
    let (jar, flash) = flash::take(jar);
    let page = render(&state.templates, "lessons.html", context! { lessons, flash })?;
    Ok((jar, page))
}

/// Generates the lesson, then stores it. The store connection is only taken
/// once generation has finished.
pub async fn post_lessons(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<GenerateLessonForm>,
) -> Result<(SignedCookieJar, Redirect), Error> {
    let topic = form.topic.trim();
    if topic.is_empty() {
        return Err(Error::BadRequest("topic is required".to_string()));
    }
    let created_by = parse_optional_id("created_by", &form.created_by)?;

    let generated = state.generator.generate(topic).await?;
    tracing::debug!(topic, generator = state.generator.name(), "lesson content generated");

    let mut session = state.store.session().await?;
    session.create_lesson(NewLesson {
        title: generated.title,
        topic: topic.to_string(),
        content: generated.content,
        created_by,
    })
    .await?;

    Ok((flash::set(jar, "Lesson generated"), Redirect::to("/lessons")))
}

pub async fn get_lesson(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut db: Db,
    Path(lesson_id): Path<i64>,
) -> Result<(SignedCookieJar, Html<String>), Error> {
    let lesson = db
        .get_lesson(lesson_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("lesson {lesson_id} not found")))?;

    let (jar, flash) = flash::take(jar);
    let page = render(&state.templates, "lesson.html", context! { lesson, flash })?;
    Ok((jar, page))
}
