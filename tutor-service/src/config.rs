use std::{env::var, path::PathBuf, sync::Arc};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use minijinja::Environment;
use sentry::types::Dsn;
use sha2::{Digest, Sha512};
use store::SqliteStore;
use tracing::{info, warn};
use tutor_utils::generation::{LessonGenerator, OpenAiGenerator, TemplateGenerator};

use crate::{error::Error, templates};

#[derive(Clone)]
pub struct AppState {
    pub store: SqliteStore,
    pub generator: Arc<dyn LessonGenerator>,
    pub templates: Arc<Environment<'static>>,
    pub cookie_key: Key,
    pub env_vars: EnvVars,
}

impl AppState {
    pub fn new(env_vars: EnvVars, store: SqliteStore) -> Result<Self, Error> {
        Ok(AppState {
            store,
            generator: env_vars.lesson_generator(),
            templates: Arc::new(templates::environment()?),
            cookie_key: env_vars.cookie_key(),
            env_vars,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

#[derive(Debug, Clone)]
pub struct EnvVars {
    pub port: u16,
    pub database_url: String,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub openai_model: String,
    pub session_secret: String,
    pub lms_output_dir: PathBuf,
    pub request_body_size_limit: usize,
    pub request_timeout_in_ms: u64,
    pub sentry_dsn: Option<String>,
}

impl EnvVars {
    pub fn new() -> Self {
        let port = match var("PORT") {
            Ok(port_string) => port_string.parse().expect("PORT to be parseable as u16"),
            Err(_e) => {
                let default_port = 5000;
                warn!("PORT not set. Defaulting to {default_port}");
                default_port
            }
        };

        let database_url = match var("DATABASE_URL") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                let default_database_url = "sqlite://edu_tutor_ai.db".to_string();
                warn!("DATABASE_URL not set. Defaulting to {default_database_url}");
                default_database_url
            }
        };

        let openai_api_key = match var("OPENAI_API_KEY") {
            Ok(key) if !key.is_empty() => Some(key),
            _ => None,
        };
        let openai_base_url = var("OPENAI_BASE_URL").ok().filter(|s| !s.is_empty());
        let openai_model = var("OPENAI_MODEL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "gpt-4o-mini".to_string());

        let session_secret = match var("SESSION_SECRET") {
            Ok(s) if !s.is_empty() => s,
            _ => {
                warn!("SESSION_SECRET not set. Defaulting to an insecure development secret");
                "dev_secret".to_string()
            }
        };

        let lms_output_dir = match var("LMS_OUTPUT_DIR") {
            Ok(s) if !s.is_empty() => PathBuf::from(s),
            _ => PathBuf::from("."),
        };

        let request_timeout_in_ms = match var("REQUEST_TIMEOUT_IN_MS") {
            Ok(s) => s
                .parse()
                .expect("REQUEST_TIMEOUT_IN_MS to be valid unsigned integer"),
            Err(_e) => {
                let default_request_timeout = 30_000;
                warn!("REQUEST_TIMEOUT_IN_MS not set. Defaulting to {default_request_timeout}");
                default_request_timeout
            }
        };

        let request_body_size_limit = match var("REQUEST_BODY_SIZE_LIMIT") {
            Ok(s) => s
                .parse()
                .expect("REQUEST_BODY_SIZE_LIMIT to be valid unsigned integer"),
            Err(_e) => {
                let default_request_body_size_limit = 1 << 20;
                warn!(
                    "REQUEST_BODY_SIZE_LIMIT not set. Defaulting to {default_request_body_size_limit}"
                );
                default_request_body_size_limit
            }
        };

        let sentry_dsn = match var("SENTRY_DSN") {
            Ok(dsn_string) => {
                assert!(
                    valid_sentry_dsn(&dsn_string),
                    "SENTRY_DSN is not valid DSN."
                );
                Some(dsn_string)
            }
            Err(_e) => {
                warn!("SENTRY_DSN not set.");
                None
            }
        };

        EnvVars {
            port,
            database_url,
            openai_api_key,
            openai_base_url,
            openai_model,
            session_secret,
            lms_output_dir,
            request_body_size_limit,
            request_timeout_in_ms,
            sentry_dsn,
        }
    }

    /// Remote generator when an API key is configured, template otherwise
    pub fn lesson_generator(&self) -> Arc<dyn LessonGenerator> {
        match &self.openai_api_key {
            Some(api_key) => {
                info!(model = %self.openai_model, "using OpenAI lesson generator");
                Arc::new(OpenAiGenerator::new(
                    api_key,
                    self.openai_base_url.clone(),
                    &self.openai_model,
                ))
            }
            None => {
                info!("OPENAI_API_KEY not set. Using template lesson generator");
                Arc::new(TemplateGenerator)
            }
        }
    }

    /// Key signing the flash cookie, derived from `session_secret`.
    pub fn cookie_key(&self) -> Key {
        let digest = Sha512::digest(self.session_secret.as_bytes());
        Key::from(digest.as_slice())
    }
}

fn valid_sentry_dsn(url: &str) -> bool {
    url.parse::<Dsn>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_vars() -> EnvVars {
        EnvVars {
            port: 5000,
            database_url: "sqlite::memory:".to_string(),
            openai_api_key: None,
            openai_base_url: None,
            openai_model: "gpt-4o-mini".to_string(),
            session_secret: "dev_secret".to_string(),
            lms_output_dir: PathBuf::from("."),
            request_body_size_limit: 1 << 20,
            request_timeout_in_ms: 30_000,
            sentry_dsn: None,
        }
    }

    #[test]
    fn generator_follows_api_key() {
        let template = env_vars();
        assert_eq!(template.lesson_generator().name(), "template");

        let remote = EnvVars {
            openai_api_key: Some("sk-test".to_string()),
            ..env_vars()
        };
        assert_eq!(remote.lesson_generator().name(), "openai");
    }

    #[test]
    fn cookie_key_is_stable_per_secret() {
        let a = env_vars().cookie_key();
        let b = env_vars().cookie_key();
        let c = EnvVars {
            session_secret: "another secret".to_string(),
            ..env_vars()
        };
        assert_eq!(a.master(), b.master());
        assert_ne!(a.master(), c.cookie_key().master());
    }

    #[test]
    fn sentry_dsn_is_validated() {
        assert!(valid_sentry_dsn("https://public@sentry.example.com/1"));
        assert!(!valid_sentry_dsn("not a dsn"));
    }
}
