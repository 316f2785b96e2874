use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use axum_extra::extract::SignedCookieJar;
use minijinja::context;
use serde::Deserialize;
use store::{AttemptStore, NewUser, UserStore};

use crate::{config::AppState, error::Error, extract::Db, flash, templates::render};

#[derive(Deserialize)]
pub struct CreateUserForm {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
}

pub async fn get_users(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut db: Db,
) -> Result<(SignedCookieJar, Html<String>), Error> {
    let users = db.list_users().await?;
    let (jar, flash) = flash::take(jar);
    let page = render(&state.templates, "users.html", context! { users, flash })?;
    Ok((jar, page))
}

pub async fn post_users(
    jar: SignedCookieJar,
    mut db: Db,
    Form(form): Form<CreateUserForm>,
) -> Result<(SignedCookieJar, Redirect), Error> {
    db.create_user(NewUser {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
    })
    .await?;
    Ok((flash::set(jar, "User created"), Redirect::to("/users")))
}

pub async fn get_user_profile(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    mut db: Db,
    Path(user_id): Path<i64>,
) -> Result<(SignedCookieJar, Html<String>), Error> {
    let user = db
        .get_user(user_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("user {user_id} not found")))?;
    let attempts = db.list_attempts_for_user(user_id).await?;

    let (jar, flash) = flash::take(jar);
    let page = render(
        &state.templates,
        "profile.html",
        context! { user, attempts, flash },
    )?;
    Ok((jar, page))
}
