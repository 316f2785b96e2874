use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::error::Error;

const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../templates/base.html")),
    ("home.html", include_str!("../templates/home.html")),
    ("users.html", include_str!("../templates/users.html")),
    ("profile.html", include_str!("../templates/profile.html")),
    ("lessons.html", include_str!("../templates/lessons.html")),
    ("lesson.html", include_str!("../templates/lesson.html")),
    ("quizzes.html", include_str!("../templates/quizzes.html")),
    ("quiz.html", include_str!("../templates/quiz.html")),
    ("lms.html", include_str!("../templates/lms.html")),
];

/// Template environment with every page loaded. `.html` templates are
/// auto-escaped.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

pub fn render<S: Serialize>(
    env: &Environment<'_>,
    name: &str,
    ctx: S,
) -> Result<Html<String>, Error> {
    let page = env.get_template(name)?.render(ctx)?;
    Ok(Html(page))
}
