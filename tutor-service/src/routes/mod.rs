use axum::{http::StatusCode, response::IntoResponse};
use tracing::info;

use crate::error::Error;

pub mod home;
pub mod lessons;
pub mod lms;
pub mod progress;
pub mod quizzes;
pub mod users;

pub async fn get_status_ping() -> impl IntoResponse {
    info!("Status");
    StatusCode::OK
}

/// Parses a required numeric form field.
pub(crate) fn parse_id(field: &str, value: Option<&str>) -> Result<i64, Error> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| Error::BadRequest(format!("{field} must be a number, got '{value}'"))),
        _ => Err(Error::BadRequest(format!("{field} is required"))),
    }
}

/// Parses an optional numeric form field, an empty value is `None`.
pub(crate) fn parse_optional_id(field: &str, value: &str) -> Result<Option<i64>, Error> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_id(field, Some(value)).map(Some)
}
