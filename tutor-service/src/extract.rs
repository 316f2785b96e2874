use std::ops::{Deref, DerefMut};

use axum::{extract::FromRequestParts, http::request::Parts};
use store::Session;

use crate::{config::AppState, error::Error};

/// Store session scoped to one request.
///
/// The connection is taken from the pool when the handler runs and returned
/// when the handler finishes.
pub struct Db(pub Session);

impl FromRequestParts<AppState> for Db {
    type Rejection = Error;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.store.session().await?;
        Ok(Db(session))
    }
}

impl Deref for Db {
    type Target = Session;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Db {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
