use axum::{
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
};
use store::{AttemptStore, ProgressRow};

use crate::{error::Error, extract::Db};

const PROGRESS_HEADER: [&str; 6] = [
    "attempt_id",
    "user_name",
    "user_email",
    "quiz_id",
    "score",
    "taken_at",
];

pub async fn get_progress_export(mut db: Db) -> Result<impl IntoResponse, Error> {
    let rows = db.progress_report().await?;
    let csv = progress_csv(&rows)?;

    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"progress.csv\""),
        ],
        csv,
    ))
}

/// Header row followed by one row per attempt.
pub fn progress_csv(rows: &[ProgressRow]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);
    writer.write_record(PROGRESS_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    let csv = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(csv)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn empty_report_is_only_the_header() {
        let csv = progress_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "attempt_id,user_name,user_email,quiz_id,score,taken_at\n"
        );
    }

    #[test]
    fn rows_follow_header_columns() {
        let rows = vec![ProgressRow {
            attempt_id: 1,
            user_name: "Lovelace, Ada".to_string(),
            user_email: "ada@example.com".to_string(),
            quiz_id: 2,
            score: 33.33,
            taken_at: Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap(),
        }];

        let csv = String::from_utf8(progress_csv(&rows).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[1],
            "1,\"Lovelace, Ada\",ada@example.com,2,33.33,2024-03-09T07:05:01Z"
        );
    }
}
