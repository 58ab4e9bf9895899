pub mod client;
pub mod config;
pub mod database;
pub mod dto;
pub mod engine;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

pub use error::{Error, Result};

use crate::config::Config;
use crate::services::{
    assessment_service::AssessmentService, candidate_service::CandidateService,
    job_service::JobService, note_service::NoteService, sim::SimPolicy,
};
use sqlx::SqlitePool;

/// The simulated backend: every service the UI talks to, sharing one pool
/// and one injection policy. Only these services write to the store.
#[derive(Clone)]
pub struct Backend {
    pub pool: SqlitePool,
    pub jobs: JobService,
    pub candidates: CandidateService,
    pub assessments: AssessmentService,
    pub notes: NoteService,
}

impl Backend {
    pub fn new(pool: SqlitePool, sim: SimPolicy) -> Self {
        let jobs = JobService::new(pool.clone(), sim.clone());
        let candidates = CandidateService::new(pool.clone(), sim.clone());
        let assessments = AssessmentService::new(pool.clone(), sim.clone());
        let notes = NoteService::new(pool.clone(), sim);

        Self {
            pool,
            jobs,
            candidates,
            assessments,
            notes,
        }
    }

    /// Open the configured store and wire the services up with the
    /// configured injection policy.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = database::create_pool(std::path::Path::new(&config.database_path)).await?;
        Ok(Self::new(pool, config.sim_policy()))
    }
}
