use crate::dto::{PutAssessmentPayload, SubmitAssessmentPayload};
use crate::error::Result;
use crate::models::{Assessment, SubmissionResponse};
use crate::services::sim::SimPolicy;
use crate::store::assessments;
use crate::utils::time::now;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AssessmentService {
    pool: SqlitePool,
    sim: SimPolicy,
}

impl AssessmentService {
    pub fn new(pool: SqlitePool, sim: SimPolicy) -> Self {
        Self { pool, sim }
    }

    /// A job with no assessment yet is `None`, not an error.
    pub async fn get(&self, job_id: &str) -> Result<Option<Assessment>> {
        self.sim.latency().await;
        let mut conn = self.pool.acquire().await?;
        assessments::get(&mut *conn, job_id).await
    }

    /// Replace the whole schema for the job (insert-or-update).
    pub async fn put(&self, job_id: &str, payload: PutAssessmentPayload) -> Result<()> {
        self.sim.latency().await;
        self.sim.roll_write_failure()?;
        let mut conn = self.pool.acquire().await?;
        assessments::put(&mut *conn, job_id, &payload.sections, now()).await?;
        tracing::debug!(job_id = %job_id, sections = payload.sections.len(), "assessment saved");
        Ok(())
    }

    /// Record a filled-in answer set. Answer-level validation is the
    /// caller's concern (see `engine::validate_answers`); the router stores
    /// whatever was submitted.
    pub async fn submit(&self, job_id: &str, payload: SubmitAssessmentPayload) -> Result<()> {
        self.sim.latency().await;
        self.sim.roll_write_failure()?;
        let mut conn = self.pool.acquire().await?;
        assessments::append_response(
            &mut *conn,
            job_id,
            payload.candidate_id.as_deref(),
            &payload.payload,
            now(),
        )
        .await?;
        tracing::debug!(job_id = %job_id, "assessment response recorded");
        Ok(())
    }

    pub async fn responses(&self, job_id: &str) -> Result<Vec<SubmissionResponse>> {
        self.sim.latency().await;
        let mut conn = self.pool.acquire().await?;
        assessments::list_responses(&mut *conn, job_id).await
    }
}
