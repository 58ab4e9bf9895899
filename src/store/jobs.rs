use crate::error::Result;
use crate::models::{Job, JobStatus};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

const COLUMNS: &str = r#"id, title, slug, status, tags, "order", created_at, updated_at"#;

/// Filter applied to both the page query and the total count.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub search: Option<String>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSort {
    Order,
    Title,
}

fn from_row(row: &SqliteRow) -> Result<Job> {
    let status: String = row.try_get("status")?;
    let tags: String = row.try_get("tags")?;
    Ok(Job {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        slug: row.try_get("slug")?,
        status: JobStatus::parse(&status)
            .ok_or_else(|| anyhow::anyhow!("unknown job status: {status}"))?,
        tags: serde_json::from_str(&tags)?,
        order: row.try_get("order")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn filter_binds(filter: &JobFilter) -> (String, String, String) {
    let search = filter
        .search
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    let pattern = format!("%{}%", search);
    let status = filter.status.map(|s| s.as_str()).unwrap_or("").to_string();
    (search, pattern, status)
}

pub async fn get(conn: &mut SqliteConnection, id: &str) -> Result<Option<Job>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM jobs WHERE id = ?"))
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn get_by_slug(conn: &mut SqliteConnection, slug: &str) -> Result<Option<Job>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM jobs WHERE slug = ?"))
        .bind(slug)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(from_row).transpose()
}

pub async fn insert(conn: &mut SqliteConnection, job: &Job) -> Result<()> {
    sqlx::query(
        r#"INSERT INTO jobs (id, title, slug, status, tags, "order", created_at, updated_at)
           VALUES (?, ?, ?, ?, ?, ?, ?, ?)"#,
    )
    .bind(&job.id)
    .bind(&job.title)
    .bind(&job.slug)
    .bind(job.status.as_str())
    .bind(serde_json::to_string(&job.tags)?)
    .bind(job.order)
    .bind(job.created_at)
    .bind(job.updated_at)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

/// Replace every mutable column; the service layer owns the field merge.
pub async fn update(conn: &mut SqliteConnection, job: &Job) -> Result<()> {
    sqlx::query(
        r#"UPDATE jobs
           SET title = ?, slug = ?, status = ?, tags = ?, "order" = ?, updated_at = ?
           WHERE id = ?"#,
    )
    .bind(&job.title)
    .bind(&job.slug)
    .bind(job.status.as_str())
    .bind(serde_json::to_string(&job.tags)?)
    .bind(job.order)
    .bind(job.updated_at)
    .bind(&job.id)
    .execute(&mut *conn)
    .await?;
    Ok(())
}

pub async fn set_order(conn: &mut SqliteConnection, id: &str, order: i64) -> Result<()> {
    sqlx::query(r#"UPDATE jobs SET "order" = ? WHERE id = ?"#)
        .bind(order)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn count_all(conn: &mut SqliteConnection) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS n FROM jobs")
        .fetch_one(&mut *conn)
        .await?;
    Ok(row.try_get("n")?)
}

/// All jobs sorted by their `order` rank, for transactional resequencing.
pub async fn list_ordered(conn: &mut SqliteConnection) -> Result<Vec<Job>> {
    let rows = sqlx::query(&format!(
        r#"SELECT {COLUMNS} FROM jobs ORDER BY "order" ASC"#
    ))
    .fetch_all(&mut *conn)
    .await?;
    rows.iter().map(from_row).collect()
}

pub async fn list(
    conn: &mut SqliteConnection,
    filter: &JobFilter,
    sort: JobSort,
    limit: i64,
    offset: i64,
) -> Result<Vec<Job>> {
    let (search, pattern, status) = filter_binds(filter);
    let order_by = match sort {
        JobSort::Order => r#""order" ASC"#,
        JobSort::Title => "lower(title) ASC",
    };
    let sql = format!(
        r#"SELECT {COLUMNS} FROM jobs
           WHERE (?1 = '' OR lower(title) LIKE ?2 OR lower(tags) LIKE ?2)
             AND (?3 = '' OR status = ?3)
           ORDER BY {order_by}
           LIMIT ?4 OFFSET ?5"#
    );
    let rows = sqlx::query(&sql)
        .bind(search)
        .bind(pattern)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(from_row).collect()
}

pub async fn count(conn: &mut SqliteConnection, filter: &JobFilter) -> Result<i64> {
    let (search, pattern, status) = filter_binds(filter);
    let row = sqlx::query(
        r#"SELECT COUNT(*) AS n FROM jobs
           WHERE (?1 = '' OR lower(title) LIKE ?2 OR lower(tags) LIKE ?2)
             AND (?3 = '' OR status = ?3)"#,
    )
    .bind(search)
    .bind(pattern)
    .bind(status)
    .fetch_one(&mut *conn)
    .await?;
    Ok(row.try_get("n")?)
}
