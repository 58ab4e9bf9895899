use crate::dto::{CandidateListQuery, CreateCandidatePayload, Page, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::{Candidate, Stage, TimelineAction, TimelineEvent};
use crate::services::sim::SimPolicy;
use crate::store::candidates::{self, CandidateFilter};
use crate::store::timelines;
use crate::utils::time::now;
use sqlx::SqlitePool;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone)]
pub struct CandidateService {
    pool: SqlitePool,
    sim: SimPolicy,
}

impl CandidateService {
    pub fn new(pool: SqlitePool, sim: SimPolicy) -> Self {
        Self { pool, sim }
    }

    pub async fn list(&self, query: &CandidateListQuery) -> Result<Page<Candidate>> {
        self.sim.latency().await;
        let filter = CandidateFilter {
            search: query.search.clone(),
            stage: query.stage,
        };
        let limit = query.page_size.max(1) as i64;
        let offset = (query.page.max(1) as i64 - 1) * limit;
        let mut conn = self.pool.acquire().await?;
        let items = candidates::list(&mut *conn, &filter, limit, offset).await?;
        let total = candidates::count(&mut *conn, &filter).await?;
        Ok(Page { items, total })
    }

    pub async fn get(&self, id: &str) -> Result<Candidate> {
        self.sim.latency().await;
        let mut conn = self.pool.acquire().await?;
        candidates::get(&mut *conn, id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Candidate {id}")))
    }

    /// New candidates land in Applied unless told otherwise; the birth of
    /// the record is logged to the timeline in the same transaction.
    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        self.sim.latency().await;
        self.sim.roll_write_failure()?;
        payload.validate()?;

        let at = now();
        let candidate = Candidate {
            id: Uuid::new_v4().to_string(),
            name: payload.name,
            email: payload.email,
            stage: payload.stage.unwrap_or(Stage::Applied),
            job_id: payload.job_id,
            created_at: at,
            updated_at: at,
        };

        let mut tx = self.pool.begin().await?;
        candidates::insert(&mut *tx, &candidate).await?;
        timelines::append(&mut *tx, &candidate.id, TimelineAction::Created, None, at).await?;
        tx.commit().await?;

        tracing::debug!(candidate_id = %candidate.id, "candidate created");
        Ok(candidate)
    }

    /// Field merge; a stage change appends exactly one timeline event, and
    /// a patch that restates the current stage appends none.
    pub async fn patch(&self, id: &str, payload: UpdateCandidatePayload) -> Result<Candidate> {
        self.sim.latency().await;
        self.sim.roll_write_failure()?;
        payload.validate()?;

        let mut tx = self.pool.begin().await?;
        let mut candidate = candidates::get(&mut *tx, id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Candidate {id}")))?;

        let stage_before = candidate.stage;
        if let Some(name) = payload.name {
            candidate.name = name;
        }
        if let Some(email) = payload.email {
            candidate.email = email;
        }
        if let Some(stage) = payload.stage {
            candidate.stage = stage;
        }
        if let Some(job_id) = payload.job_id {
            candidate.job_id = Some(job_id);
        }
        let at = now();
        candidate.updated_at = at;

        candidates::update(&mut *tx, &candidate).await?;
        if candidate.stage != stage_before {
            timelines::append(
                &mut *tx,
                &candidate.id,
                TimelineAction::StageChange,
                Some(candidate.stage),
                at,
            )
            .await?;
        }
        tx.commit().await?;

        if candidate.stage != stage_before {
            tracing::debug!(
                candidate_id = %id,
                from = stage_before.as_str(),
                to = candidate.stage.as_str(),
                "stage changed"
            );
        }
        Ok(candidate)
    }

    pub async fn timeline(&self, candidate_id: &str) -> Result<Vec<TimelineEvent>> {
        self.sim.latency().await;
        let mut conn = self.pool.acquire().await?;
        timelines::list_for(&mut *conn, candidate_id).await
    }
}
