use crate::error::Result;
use crate::models::{Candidate, Stage};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

const COLUMNS: &str = "id, name, email, stage, job_id, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub search: Option<String>,
    pub stage: Option<Stage>,
}

fn from_row(row: &SqliteRow) -> Result<Candidate> {
    let stage: String = row.try_get("stage")?;
    Ok(Candidate {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        stage: Stage::parse(&stage)
            .ok_or_else(|| anyhow::anyhow!("unknown candidate stage: {stage}"))?,
        job_id: row.try_get("job_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn filter_binds(filter: &CandidateFilter) -> (String, String, String) {
    let search = filter
        .search
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let pattern = format!("%{}%", search);
    let stage = filter.stage.map(|s| s.as_str()).unwrap_or("").to_string();
    (search, pattern, stage)
}

pub async fn get(conn: &mut SqliteConnection, id: &str) -> Result<Option<Candidate>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM candidates WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn insert(conn: &mut SqliteConnection, candidate: &Candidate) -> Result<()> {
    sqlx::query(
        "INSERT INTO candidates (id, name, email, stage, job_id, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&candidate.id)
    .bind(&candidate.name)
    .bind(&candidate.email)
    .bind(candidate.stage.as_str())
    .bind(&candidate.job_id)
    .bind(candidate.created_at)
    .bind(candidate.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn update(conn: &mut SqliteConnection, candidate: &Candidate) -> Result<()> {
    sqlx::query(
        "UPDATE candidates
         SET name = ?, email = ?, stage = ?, job_id = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&candidate.name)
    .bind(&candidate.email)
    .bind(candidate.stage.as_str())
    .bind(&candidate.job_id)
    .bind(candidate.updated_at)
    .bind(&candidate.id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn list(
    conn: &mut SqliteConnection,
    filter: &CandidateFilter,
    limit: i64,
    offset: i64,
) -> Result<Vec<Candidate>> {
    let (search, pattern, stage) = filter_binds(filter);
    let sql = format!(
        "SELECT {COLUMNS} FROM candidates
         WHERE (?1 = '' OR lower(name) LIKE ?2 OR lower(email) LIKE ?2)
           AND (?3 = '' OR stage = ?3)
         ORDER BY rowid ASC
         LIMIT ?4 OFFSET ?5"
    );
    let rows = sqlx::query(&sql)
        .bind(search)
        .bind(pattern)
        .bind(stage)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(from_row).collect()
}

pub async fn count(conn: &mut SqliteConnection, filter: &CandidateFilter) -> Result<i64> {
    let (search, pattern, stage) = filter_binds(filter);
    let row = sqlx::query(
        "SELECT COUNT(*) AS n FROM candidates
         WHERE (?1 = '' OR lower(name) LIKE ?2 OR lower(email) LIKE ?2)
           AND (?3 = '' OR stage = ?3)",
    )
    .bind(search)
    .bind(pattern)
    .bind(stage)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row.try_get("n")?)
}
