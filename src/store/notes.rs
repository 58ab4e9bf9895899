use crate::error::Result;
use crate::models::Note;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

fn from_row(row: &SqliteRow) -> Result<Note> {
    Ok(Note {
        id: row.try_get("id")?,
        candidate_id: row.try_get("candidate_id")?,
        text: row.try_get("text")?,
        at: row.try_get("at")?,
    })
}

pub async fn append(
    conn: &mut SqliteConnection,
    candidate_id: &str,
    text: &str,
    at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query("INSERT INTO notes (candidate_id, text, at) VALUES (?, ?, ?)")
        .bind(candidate_id)
        .bind(text)
        .bind(at)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Notes for one candidate, or every note when no filter is given. Absence
/// is an empty list, never an error.
pub async fn list(conn: &mut SqliteConnection, candidate_id: Option<&str>) -> Result<Vec<Note>> {
    let rows = sqlx::query(
        "SELECT id, candidate_id, text, at FROM notes
         WHERE (?1 IS NULL OR candidate_id = ?1)
         ORDER BY at ASC, id ASC",
    )
    .bind(candidate_id)
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(from_row).collect()
}
