use std::future::Future;

use chrono::Utc;

use crate::{
    db::Session,
    error::Error,
    models::{NewUser, User},
};

pub trait UserStore {
    /// Inserts a user, returning its id. Fails with [`Error::DuplicateEmail`]
    /// when the email is already taken.
    fn create_user(&mut self, user: NewUser) -> impl Future<Output = Result<i64, Error>> + Send;
    fn list_users(&mut self) -> impl Future<Output = Result<Vec<User>, Error>> + Send;
    fn get_user(&mut self, id: i64) -> impl Future<Output = Result<Option<User>, Error>> + Send;
}

impl UserStore for Session {
    #[tracing::instrument(skip_all, fields(email = %user.email), err(Debug))]
    async fn create_user(&mut self, user: NewUser) -> Result<i64, Error> {
        let res = sqlx::query("INSERT INTO users (name, email, created_at) VALUES (?1, ?2, ?3)")
            .bind(&user.name)
            .bind(&user.email)
            .bind(Utc::now())
            .execute(self.conn())
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    Error::DuplicateEmail(user.email.clone())
                }
                e => Error::Sqlx(e),
            })?;

        let id = res.last_insert_rowid();
        tracing::info!(user = id, "user created");
        Ok(id)
    }

    async fn list_users(&mut self) -> Result<Vec<User>, Error> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users ORDER BY id",
        )
        .fetch_all(self.conn())
        .await?;
        Ok(users)
    }

    async fn get_user(&mut self, id: i64) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.conn())
        .await?;
        Ok(user)
    }
}
