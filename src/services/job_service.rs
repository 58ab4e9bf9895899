use crate::dto::{CreateJobPayload, JobListQuery, Page, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::{Job, JobStatus};
use crate::services::sim::SimPolicy;
use crate::store::jobs::{self, JobFilter};
use crate::utils::slug::slugify;
use crate::utils::time::now;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct JobService {
    pool: SqlitePool,
    sim: SimPolicy,
}

impl JobService {
    pub fn new(pool: SqlitePool, sim: SimPolicy) -> Self {
        Self { pool, sim }
    }

    pub async fn list(&self, query: &JobListQuery) -> Result<Page<Job>> {
        self.sim.latency().await;
        let filter = JobFilter {
            search: query.search.clone(),
            status: query.status,
        };
        let limit = query.page_size.max(1) as i64;
        let offset = (query.page.max(1) as i64 - 1) * limit;
        let mut conn = self.pool.acquire().await?;
        let items = jobs::list(&mut *conn, &filter, query.sort, limit, offset).await?;
        let total = jobs::count(&mut *conn, &filter).await?;
        Ok(Page { items, total })
    }

    pub async fn get(&self, id: &str) -> Result<Job> {
        self.sim.latency().await;
        let mut conn = self.pool.acquire().await?;
        jobs::get(&mut *conn, id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Job {id}")))
    }

    /// Server-assigned fields: id, order (count + 1), defaulted status, and
    /// a slug derived from the title when none is given.
    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        self.sim.latency().await;
        self.sim.roll_write_failure()?;
        payload.validate()?;

        let slug = match payload.slug.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim().to_string(),
            _ => slugify(&payload.title),
        };

        let mut tx = self.pool.begin().await?;
        if jobs::get_by_slug(&mut *tx, &slug).await?.is_some() {
            return Err(Error::DuplicateSlug(slug));
        }
        let order = jobs::count_all(&mut *tx).await? + 1;
        let at = now();
        let job = Job {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            slug,
            status: payload.status.unwrap_or(JobStatus::Active),
            tags: payload.tags,
            order,
            created_at: at,
            updated_at: at,
        };
        jobs::insert(&mut *tx, &job).await?;
        tx.commit().await?;

        tracing::debug!(job_id = %job.id, slug = %job.slug, "job created");
        Ok(job)
    }

    pub async fn patch(&self, id: &str, payload: UpdateJobPayload) -> Result<Job> {
        self.sim.latency().await;
        self.sim.roll_write_failure()?;
        payload.validate()?;

        let mut tx = self.pool.begin().await?;
        let mut job = jobs::get(&mut *tx, id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Job {id}")))?;

        // Uniqueness only matters when the slug actually changes.
        if let Some(slug) = payload.slug.as_deref() {
            if slug != job.slug && jobs::get_by_slug(&mut *tx, slug).await?.is_some() {
                return Err(Error::DuplicateSlug(slug.to_string()));
            }
        }

        if let Some(title) = payload.title {
            job.title = title;
        }
        if let Some(slug) = payload.slug {
            job.slug = slug;
        }
        if let Some(status) = payload.status {
            job.status = status;
        }
        if let Some(tags) = payload.tags {
            job.tags = tags;
        }
        job.updated_at = now();

        jobs::update(&mut *tx, &job).await?;
        tx.commit().await?;
        Ok(job)
    }

    /// Move a job to a 1-based target rank and renumber the whole
    /// collection densely, in one transaction. Out-of-range targets clamp.
    pub async fn reorder(&self, id: &str, to_order: i64) -> Result<()> {
        self.sim.latency().await;
        self.sim.roll_write_failure()?;

        let mut tx = self.pool.begin().await?;
        let ordered = jobs::list_ordered(&mut *tx).await?;
        let from = ordered
            .iter()
            .position(|j| j.id == id)
            .ok_or_else(|| Error::NotFound(format!("Job {id}")))?;

        let sequence = resequence(ordered, from, to_order);
        for (idx, job) in sequence.iter().enumerate() {
            let rank = idx as i64 + 1;
            if job.order != rank {
                jobs::set_order(&mut *tx, &job.id, rank).await?;
            }
        }
        tx.commit().await?;

        tracing::debug!(job_id = %id, to_order, "jobs resequenced");
        Ok(())
    }
}

/// Remove the moving job and reinsert it at the clamped 1-based target,
/// yielding the new display sequence.
fn resequence(mut ordered: Vec<Job>, from: usize, to_order: i64) -> Vec<Job> {
    let moving = ordered.remove(from);
    let target = to_order.clamp(1, ordered.len() as i64 + 1) as usize - 1;
    ordered.insert(target, moving);
    ordered
}
