#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidQuestions(String),
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("unknown sync type '{0}', expected 'lesson' or 'quiz'")]
    UnknownSyncKind(String),
    #[error("{0}")]
    InvalidRecord(String),
    // Froms
    #[error("{0}")]
    Store(#[from] store::Error),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
