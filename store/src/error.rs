#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("email {0} is already registered")]
    DuplicateEmail(String),
    // Froms
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}
