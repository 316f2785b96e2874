use std::str::FromStr;

use sqlx::{
    Sqlite, SqlitePool,
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqliteConnection, SqlitePoolOptions},
};
use tracing::instrument;

use crate::error::Error;

/// Handle to the SQLite database. Cheap to clone.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (or creates) the database at `url` and applies pending migrations.
    ///
    /// `url` is a sqlx SQLite URL, e.g. `sqlite://edu_tutor_ai.db`.
    #[instrument(err(Debug))]
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("database migrations applied");

        Ok(Self { pool })
    }

    /// Acquires a connection for the duration of one unit of work.
    pub async fn session(&self) -> Result<Session, Error> {
        let conn = self.pool.acquire().await?;
        Ok(Session { conn })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// A pooled connection. Released back to the pool when dropped.
#[derive(Debug)]
pub struct Session {
    conn: PoolConnection<Sqlite>,
}

impl Session {
    pub(crate) fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.conn
    }
}
