use axum::{Form, extract::State, response::Html};
use minijinja::context;
use serde::Deserialize;
use tutor_utils::lms::{DEFAULT_LMS_NAME, SyncKind, lms_name_or_default, sync_to_lms};

use crate::{config::AppState, error::Error, extract::Db, routes::parse_id, templates::render};

#[derive(Deserialize)]
pub struct SyncForm {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    lms_name: String,
}

pub async fn get_lms(State(state): State<AppState>) -> Result<Html<String>, Error> {
    render(
        &state.templates,
        "lms.html",
        context! { default_lms_name => DEFAULT_LMS_NAME },
    )
}

pub async fn post_lms(
    State(state): State<AppState>,
    mut db: Db,
    Form(form): Form<SyncForm>,
) -> Result<Html<String>, Error> {
    let kind: SyncKind = form.kind.parse()?;
    let id = parse_id("id", Some(&form.id))?;
    let lms_name = lms_name_or_default(Some(&form.lms_name));

    let path = sync_to_lms(&mut *db, kind, id, lms_name, &state.env_vars.lms_output_dir).await?;

    let result = format!("Synced to {lms_name}, written to {}", path.display());
    render(
        &state.templates,
        "lms.html",
        context! { default_lms_name => DEFAULT_LMS_NAME, result },
    )
}
