use axum::{extract::State, response::Html};
use axum_extra::extract::SignedCookieJar;
use minijinja::context;

use crate::{config::AppState, error::Error, flash, templates::render};

pub async fn get_home(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), Error> {
    let (jar, flash) = flash::take(jar);
    let page = render(&state.templates, "home.html", context! { flash })?;
    Ok((jar, page))
}
