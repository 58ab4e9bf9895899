use crate::error::Result;
use crate::models::{Stage, TimelineAction, TimelineEvent};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

fn from_row(row: &SqliteRow) -> Result<TimelineEvent> {
    let action: String = row.try_get("action")?;
    let to_stage: Option<String> = row.try_get("to_stage")?;
    Ok(TimelineEvent {
        id: row.try_get("id")?,
        candidate_id: row.try_get("candidate_id")?,
        at: row.try_get("at")?,
        action: TimelineAction::parse(&action)
            .ok_or_else(|| anyhow::anyhow!("unknown timeline action: {action}"))?,
        to_stage: to_stage.as_deref().and_then(Stage::parse),
    })
}

/// Append-only; there is deliberately no update or delete path.
pub async fn append(
    conn: &mut SqliteConnection,
    candidate_id: &str,
    action: TimelineAction,
    to_stage: Option<Stage>,
    at: DateTime<Utc>,
) -> Result<()> {
    sqlx::query("INSERT INTO timeline_events (candidate_id, at, action, to_stage) VALUES (?, ?, ?, ?)")
        .bind(candidate_id)
        .bind(at)
        .bind(action.as_str())
        .bind(to_stage.map(|s| s.as_str()))
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn list_for(
    conn: &mut SqliteConnection,
    candidate_id: &str,
) -> Result<Vec<TimelineEvent>> {
    let rows = sqlx::query(
        "SELECT id, candidate_id, at, action, to_stage FROM timeline_events
         WHERE candidate_id = ?
         ORDER BY at ASC, id ASC",
    )
    .bind(candidate_id)
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(from_row).collect()
}
