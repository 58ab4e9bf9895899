use crate::error::Result;
use crate::models::{AnswerMap, Assessment, Section, SubmissionResponse};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

pub async fn get(conn: &mut SqliteConnection, job_id: &str) -> Result<Option<Assessment>> {
    let row = sqlx::query("SELECT job_id, sections FROM assessments WHERE job_id = ?")
        .bind(job_id)
        .fetch_optional(&mut *conn)
        .await?;
    match row {
        Some(row) => {
            let sections: String = row.try_get("sections")?;
            Ok(Some(Assessment {
                job_id: row.try_get("job_id")?,
                sections: serde_json::from_str(&sections)?,
            }))
        }
        None => Ok(None),
    }
}

/// Insert-or-replace keyed by job id; one assessment per job.
pub async fn put(
    conn: &mut SqliteConnection,
    job_id: &str,
    sections: &[Section],
    at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO assessments (job_id, sections, updated_at) VALUES (?, ?, ?)
         ON CONFLICT(job_id) DO UPDATE SET sections = excluded.sections, updated_at = excluded.updated_at",
    )
    .bind(job_id)
    .bind(serde_json::to_string(sections)?)
    .bind(at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn append_response(
    conn: &mut SqliteConnection,
    job_id: &str,
    candidate_id: Option<&str>,
    payload: &AnswerMap,
    submitted_at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO responses (job_id, candidate_id, payload, submitted_at) VALUES (?, ?, ?, ?)",
    )
    .bind(job_id)
    .bind(candidate_id)
    .bind(serde_json::to_string(payload)?)
    .bind(submitted_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

fn response_from_row(row: &SqliteRow) -> Result<SubmissionResponse> {
    let payload: String = row.try_get("payload")?;
    Ok(SubmissionResponse {
        id: row.try_get("id")?,
        job_id: row.try_get("job_id")?,
        candidate_id: row.try_get("candidate_id")?,
        payload: serde_json::from_str(&payload)?,
        submitted_at: row.try_get("submitted_at")?,
    })
}

pub async fn list_responses(
    conn: &mut SqliteConnection,
    job_id: &str,
) -> Result<Vec<SubmissionResponse>> {
    let rows = sqlx::query(
        "SELECT id, job_id, candidate_id, payload, submitted_at FROM responses
         WHERE job_id = ?
         ORDER BY submitted_at ASC, id ASC",
    )
    .bind(job_id)
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(response_from_row).collect()
}
