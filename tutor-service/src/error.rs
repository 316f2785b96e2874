use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;
use tutor_utils::error::Error as UtilsError;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    // Froms
    #[error("{0}")]
    Store(#[from] store::Error),
    #[error("{0}")]
    Utils(#[from] UtilsError),
    #[error("{0}")]
    Template(#[from] minijinja::Error),
    #[error("{0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Store(e) => store_status(e),
            Error::Utils(e) => match e {
                UtilsError::InvalidQuestions(_) | UtilsError::UnknownSyncKind(_) => {
                    StatusCode::BAD_REQUEST
                }
                UtilsError::NotFound(_) => StatusCode::NOT_FOUND,
                UtilsError::Generation(_) | UtilsError::Http(_) => StatusCode::BAD_GATEWAY,
                UtilsError::Store(e) => store_status(e),
                UtilsError::InvalidRecord(_) | UtilsError::Io(_) | UtilsError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Error::Template(_) | Error::Csv(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn store_status(error: &store::Error) -> StatusCode {
    match error {
        store::Error::DuplicateEmail(_) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match status {
            StatusCode::BAD_GATEWAY => {
                error!(error = ?self, "lesson generation failed");
                "lesson generation failed".to_string()
            }
            s if s.is_server_error() => {
                error!(error = ?self, "request failed");
                "internal server error".to_string()
            }
            _ => self.to_string(),
        };

        (status, msg).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_errors_map_to_statuses() {
        assert_eq!(
            Error::from(store::Error::DuplicateEmail("a@b.c".into())).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            Error::from(UtilsError::InvalidQuestions("bad".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::from(UtilsError::NotFound("lesson 1 not found".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::from(UtilsError::Generation("down".into())).status(),
            StatusCode::BAD_GATEWAY
        );
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let response = Error::Store(store::Error::Sqlx(store::SqlxError::RowNotFound)).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(response).await, "internal server error");
    }

    #[tokio::test]
    async fn generation_failure_body_is_generic() {
        let upstream = "completion API error (HTTP 500): https://llm.internal/v1 exploded";
        let response = Error::from(UtilsError::Generation(upstream.into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_text(response).await, "lesson generation failed");
    }

    #[tokio::test]
    async fn client_errors_keep_their_message() {
        let response = Error::NotFound("lesson 4 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(response).await, "lesson 4 not found");
    }
}
