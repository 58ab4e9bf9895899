use crate::dto::CreateNotePayload;
use crate::error::Result;
use crate::models::Note;
use crate::services::sim::SimPolicy;
use crate::store::notes;
use crate::utils::time::now;
use sqlx::SqlitePool;
use validator::Validate;

#[derive(Clone)]
pub struct NoteService {
    pool: SqlitePool,
    sim: SimPolicy,
}

impl NoteService {
    pub fn new(pool: SqlitePool, sim: SimPolicy) -> Self {
        Self { pool, sim }
    }

    /// Notes are plain appends and are not subject to failure injection.
    /// `@mention` tokens in the text are stored verbatim.
    pub async fn add(&self, payload: CreateNotePayload) -> Result<()> {
        self.sim.latency().await;
        payload.validate()?;
        let mut conn = self.pool.acquire().await?;
        notes::append(&mut *conn, &payload.candidate_id, &payload.text, now()).await
    }

    pub async fn list(&self, candidate_id: Option<&str>) -> Result<Vec<Note>> {
        self.sim.latency().await;
        let mut conn = self.pool.acquire().await?;
        notes::list(&mut *conn, candidate_id).await
    }
}
