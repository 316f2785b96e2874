//! Simulated LMS sync.
//!
//! Instead of calling an LMS API, a record is written as indented JSON to
//! `lms_sync_{lms}_{YYYYMMDDTHHMMSSZ}.json` in an output directory.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use store::{LessonStore, QuizStore};
use tracing::instrument;

use crate::error::Error;

pub const DEFAULT_LMS_NAME: &str = "MockLMS";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncKind {
    Lesson,
    Quiz,
}

impl FromStr for SyncKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lesson" => Ok(SyncKind::Lesson),
            "quiz" => Ok(SyncKind::Quiz),
            other => Err(Error::UnknownSyncKind(other.to_string())),
        }
    }
}

impl fmt::Display for SyncKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncKind::Lesson => write!(f, "lesson"),
            SyncKind::Quiz => write!(f, "quiz"),
        }
    }
}

/// Falls back to [`DEFAULT_LMS_NAME`] when no name is given.
pub fn lms_name_or_default(name: Option<&str>) -> &str {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_LMS_NAME,
    }
}

/// Looks up the lesson or quiz and writes it to a sync file in `out_dir`.
///
/// Returns the path of the written file.
#[instrument(skip(session, out_dir), err(Debug))]
pub async fn sync_to_lms<S>(
    session: &mut S,
    kind: SyncKind,
    id: i64,
    lms_name: &str,
    out_dir: &Path,
) -> Result<PathBuf, Error>
where
    S: LessonStore + QuizStore + Send,
{
    let record = match kind {
        SyncKind::Lesson => session
            .get_lesson(id)
            .await?
            .map(serde_json::to_value)
            .transpose()?,
        SyncKind::Quiz => session
            .get_quiz(id)
            .await?
            .map(serde_json::to_value)
            .transpose()?,
    }
    .ok_or_else(|| Error::NotFound(format!("{kind} {id} not found")))?;

    let now = Utc::now();
    let payload = sync_payload(&record, now)?;
    let path = write_sync_file(out_dir, lms_name, &payload, now).await?;

    tracing::info!(%kind, id, lms = lms_name, path = %path.display(), "record synced");
    Ok(path)
}

/// Converts `record` to a JSON field map and stamps it with `synced_at`.
pub fn sync_payload<T: Serialize>(
    record: &T,
    synced_at: DateTime<Utc>,
) -> Result<Map<String, Value>, Error> {
    let Value::Object(mut payload) = serde_json::to_value(record)? else {
        return Err(Error::InvalidRecord(
            "sync record must serialize to a JSON object".to_string(),
        ));
    };
    payload.insert(
        "synced_at".to_string(),
        Value::String(synced_at.to_rfc3339()),
    );
    Ok(payload)
}

/// `lms_sync_{lms}_{YYYYMMDDTHHMMSSZ}.json`, with the LMS name reduced to
/// characters safe in a file name.
pub fn sync_file_name(lms_name: &str, at: DateTime<Utc>) -> String {
    let lms_name: String = lms_name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("lms_sync_{lms_name}_{}.json", at.format("%Y%m%dT%H%M%SZ"))
}

pub async fn write_sync_file(
    out_dir: &Path,
    lms_name: &str,
    payload: &Map<String, Value>,
    at: DateTime<Utc>,
) -> Result<PathBuf, Error> {
    let path = out_dir.join(sync_file_name(lms_name, at));
    let json = serde_json::to_vec_pretty(payload)?;
    tokio::fs::write(&path, json).await?;
    Ok(path)
}
